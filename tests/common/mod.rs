//! Common test fixtures: a CRM-flavored row type, its column configuration,
//! and a shared storage handle for persistence tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gridcore::{CellValue, Column, Grid, GridConfig, KeyValueStorage, Result};

/// A row the engine treats as opaque; fields are reached only via accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub id: u64,
    pub name: String,
    pub company: String,
    pub status: String,
    pub score: Option<f64>,
}

pub fn lead(id: u64, name: &str, company: &str, status: &str, score: Option<f64>) -> Lead {
    Lead {
        id,
        name: name.to_string(),
        company: company.to_string(),
        status: status.to_string(),
        score,
    }
}

/// Deterministic synthetic rows: round-robin status, descending-ish scores.
pub fn sample_leads(count: usize) -> Vec<Lead> {
    let statuses = ["new", "contacted", "qualified", "lost"];
    (0..count)
        .map(|i| {
            lead(
                i as u64,
                &format!("Lead {i}"),
                &format!("Company {}", i % 7),
                statuses[i % statuses.len()],
                Some(((i * 37) % 101) as f64),
            )
        })
        .collect()
}

pub fn lead_columns() -> Vec<Column<Lead>> {
    vec![
        Column::new("name", "Name", |r: &Lead| Some(CellValue::text(r.name.clone()))),
        Column::new("company", "Company", |r: &Lead| {
            Some(CellValue::text(r.company.clone()))
        }),
        Column::new("status", "Status", |r: &Lead| {
            Some(CellValue::text(r.status.clone()))
        }),
        Column::new("score", "Score", |r: &Lead| r.score.map(CellValue::Number)),
    ]
}

pub fn lead_config(table_id: &str) -> GridConfig<Lead> {
    GridConfig::new(table_id, lead_columns(), |r: &Lead| r.id.to_string())
}

/// A paginated grid over `count` sample leads.
pub fn lead_grid(count: usize) -> Grid<Lead> {
    let mut config = lead_config("leads");
    config.rows = sample_leads(count);
    Grid::new(config).unwrap()
}

/// Storage handle that outlives any one grid instance, standing in for a
/// durable medium across page reloads.
#[derive(Clone, Default)]
pub struct SharedStorage(Rc<RefCell<HashMap<String, String>>>);

impl SharedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for SharedStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

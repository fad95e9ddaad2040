//! Virtual scroll window math and scroll-event throttling.

mod window;

pub use window::*;

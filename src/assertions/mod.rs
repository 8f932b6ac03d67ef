//! Response body assertions

mod json;

pub use json::{AssertionError, JsonBody};

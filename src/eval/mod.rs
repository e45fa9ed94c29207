pub mod harness;

pub use harness::{evaluate, parse_verdict};

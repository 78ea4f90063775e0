pub mod expression;
pub mod scheduler;

pub use expression::{next_run_for, validate};

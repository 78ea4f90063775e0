pub mod dispatch;
pub mod stats;

pub use dispatch::{dispatch, generate};

mod ai;
mod business;
mod output;

pub use ai::{AiAnswers, setup_ai};
pub use business::{BusinessAnswers, setup_business};
pub use output::{setup_output, setup_schedule};

pub mod domain;
pub mod flow;
pub mod prompts;
pub mod scaffold;
pub mod view;

pub use flow::run_wizard;

mod orchestrator;

pub use orchestrator::{Orchestrator, RunReport, RunState};

mod env_overrides;
mod loader;
pub mod schema;

pub use loader::DEFAULT_CONFIG_FILE;
pub use schema::{
    AiConfig, BlogConfig, BusinessConfig, Config, OutputConfig, PromptsConfig, ScheduleConfig,
    TopicStrategy,
};

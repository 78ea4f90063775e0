mod builder;
mod engine;

pub use builder::{build_content_prompt, build_image_prompt, build_topic_idea_prompt};
pub use engine::TeraEngine;

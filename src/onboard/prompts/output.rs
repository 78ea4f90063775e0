use crate::config::OutputConfig;
use anyhow::Result;
use dialoguer::{Input, Select};

use super::super::domain::{SCHEDULE_CHOICES, validate_non_empty};

pub fn setup_output() -> Result<OutputConfig> {
    let defaults = OutputConfig::default();

    let posts_path: String = Input::new()
        .with_prompt("  Where to save blog posts? (relative path)")
        .default(defaults.posts_path.clone())
        .validate_with(|input: &String| validate_non_empty("posts path", input).map(|_| ()))
        .interact_text()?;

    let images_path: String = Input::new()
        .with_prompt("  Where to save images? (relative path)")
        .default(defaults.images_path.clone())
        .validate_with(|input: &String| validate_non_empty("images path", input).map(|_| ()))
        .interact_text()?;

    Ok(OutputConfig {
        posts_path: posts_path.trim().to_string(),
        images_path: images_path.trim().to_string(),
        ..defaults
    })
}

/// Cron expression, or `manual`.
pub fn setup_schedule() -> Result<String> {
    let labels: Vec<&str> = SCHEDULE_CHOICES.iter().map(|(label, _)| *label).collect();
    let choice = Select::new()
        .with_prompt("  How often to generate posts?")
        .items(&labels)
        .default(3)
        .interact()?;
    Ok(SCHEDULE_CHOICES[choice].1.to_string())
}

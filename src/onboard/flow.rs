use crate::config::{AiConfig, BlogConfig, BusinessConfig, Config, ScheduleConfig};
use anyhow::{Context, Result};
use chrono::Datelike;
use console::style;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

use super::domain::{default_prompts, topics_for_business};
use super::prompts::{
    AiAnswers, BusinessAnswers, setup_ai, setup_business, setup_output, setup_schedule,
};
use super::scaffold::scaffold_site;
use super::view::{print_step, print_summary, print_welcome_banner};

/// Interactive setup. Returns `None` when the user declines to overwrite an
/// existing config.
pub fn run_wizard(config_path: &Path) -> Result<Option<Config>> {
    print_welcome_banner();

    if config_path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "  {} already exists. Overwrite?",
                config_path.display()
            ))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("  {}", style("Setup cancelled.").yellow());
            return Ok(None);
        }
    }

    print_step(1, 4, "Your Business");
    let business = setup_business()?;

    print_step(2, 4, "AI Provider & API Key");
    let ai = setup_ai()?;

    print_step(3, 4, "Output Folders");
    let output = setup_output()?;

    print_step(4, 4, "Posting Schedule");
    let cron = setup_schedule()?;

    let year = chrono::Local::now().year();
    let api_key_saved = ai.api_key.is_some();
    let mut config = build_config(config_path, business, ai, year);
    config.output = output;
    config.schedule = ScheduleConfig { cron };

    config.validate()?;
    config.save()?;
    scaffold_site(&config).context("Failed to prepare output folders")?;

    print_summary(&config, config.topics.len(), api_key_saved);
    Ok(Some(config))
}

/// Assemble a config from wizard answers with defaults everywhere else.
pub fn build_config(
    config_path: &Path,
    business: BusinessAnswers,
    ai: AiAnswers,
    year: i32,
) -> Config {
    let topics = topics_for_business(
        &business.type_key,
        &business.trade,
        &business.location,
        &business.nearby_areas,
        year,
    );
    let prompts = default_prompts(
        &business.name,
        &business.trade,
        &business.location,
        &business.nearby_areas,
    );

    Config {
        config_path: config_path.to_path_buf(),
        base_dir: base_dir_of(config_path),
        business: BusinessConfig {
            name: business.name,
            kind: business.trade,
            location: business.location,
            nearby_areas: business.nearby_areas,
            website: business.website,
        },
        blog: BlogConfig::default(),
        ai: AiConfig {
            api_key: ai.api_key,
            model: ai.model,
            generate_images: ai.generate_images,
            ..AiConfig::default()
        },
        output: crate::config::OutputConfig::default(),
        schedule: ScheduleConfig::default(),
        prompts,
        topics,
    }
}

fn base_dir_of(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

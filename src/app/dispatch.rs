use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::history::TopicHistoryStore;
use crate::media::ImageStore;
use crate::pipeline::{Orchestrator, RunReport};
use crate::providers::{build_download_client, create_provider};
use crate::topics::{ThreadRandom, TopicSource};
use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use std::path::Path;

use super::stats::stats_for;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            crate::onboard::run_wizard(&cli.config)?;
            Ok(())
        }
        Commands::Generate => {
            let config = Config::load(&cli.config)?;
            let report = generate(&config).await?;
            print_report(&report);
            Ok(())
        }
        Commands::Schedule => schedule(&cli.config).await,
        Commands::Stats => {
            let config = Config::load(&cli.config)?;
            println!("{}", stats_for(&config));
            Ok(())
        }
        Commands::Reset { force } => {
            let config = Config::load(&cli.config)?;
            reset(&config, force)
        }
    }
}

/// One orchestrator run against the configured provider.
pub async fn generate(config: &Config) -> Result<RunReport> {
    let provider = create_provider(config)?;
    let history = TopicHistoryStore::new(config.history_path());
    let images = ImageStore::from_config(config, build_download_client());
    let orchestrator = Orchestrator::new(config, &provider, &history, images);

    let mut rng = ThreadRandom;
    let report = orchestrator.run(&mut rng, chrono::Local::now()).await?;
    Ok(report)
}

async fn schedule(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    if config.schedule.is_manual() {
        println!(
            "  {} Schedule is set to manual. Run `blog-generator generate` to create a post.",
            style("›").cyan()
        );
        return Ok(());
    }

    println!(
        "  {} Scheduler started ({}). Press Ctrl-C to stop.",
        style("✓").green().bold(),
        style(&config.schedule.cron).cyan()
    );

    // Config is re-read before every run so edits apply without a restart.
    crate::cron::scheduler::run(&config.schedule.cron, move || async move {
        let config = Config::load(config_path)?;
        let report = generate(&config).await?;
        print_report(&report);
        Ok(())
    })
    .await
}

fn reset(config: &Config, force: bool) -> Result<()> {
    let history = TopicHistoryStore::new(config.history_path());
    if !force {
        let confirmed = Confirm::new()
            .with_prompt("  Clear the topic history? Used topics become available again")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  {}", style("Reset cancelled.").yellow());
            return Ok(());
        }
    }

    history
        .reset()
        .with_context(|| format!("Failed to reset {}", history.path().display()))?;
    println!(
        "  {} Topic history cleared: {}",
        style("✓").green().bold(),
        history.path().display()
    );
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "  {} Blog post generated: {}",
        style("✓").green().bold(),
        style(&report.title).white().bold()
    );
    println!("    Topic:  {} ({})", report.topic, report.topic_source);
    if let TopicSource::TemplateFallback { reason } = &report.topic_source {
        println!("    {} {reason}", style("Topic model unavailable:").yellow());
    }
    println!("    File:   {}", style(report.path.display()).green());
    match (&report.image, &report.image_error) {
        (Some(image), _) => println!("    Image:  {}", image.web_path),
        (None, Some(error)) => println!("    {} {error}", style("Image skipped:").yellow()),
        (None, None) => {}
    }
}

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `blog-generator` - SEO blog posts for local businesses, drafted by an LLM.
#[derive(Parser, Debug)]
#[command(name = "blog-generator")]
#[command(version)]
#[command(about = "Generate SEO blog posts for a local business website.", long_about = None)]
pub struct Cli {
    /// Path to the config file
    #[arg(short = 'c', long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive setup wizard
    Init,

    /// Generate one blog post now
    Generate,

    /// Generate posts on the configured cron schedule until Ctrl-C
    Schedule,

    /// Show topic history statistics
    Stats,

    /// Clear the topic history
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

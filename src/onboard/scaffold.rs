use crate::config::Config;
use crate::history::TopicHistoryStore;
use anyhow::{Context, Result};
use console::style;
use std::fs;

/// Create the output directories and an empty topic history. An existing
/// history file is left untouched.
pub fn scaffold_site(config: &Config) -> Result<()> {
    for dir in [config.posts_dir(), config.images_dir()] {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        println!(
            "  {} Directory: {}",
            style("✓").green().bold(),
            style(dir.display()).green()
        );
    }

    let history = TopicHistoryStore::new(config.history_path());
    if history.path().exists() {
        println!(
            "  {} Keeping existing topic history: {}",
            style("›").cyan(),
            history.path().display()
        );
    } else {
        history.reset()?;
        println!(
            "  {} Topic history: {}",
            style("✓").green().bold(),
            style(history.path().display()).green()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> Config {
        let mut config: Config = toml::from_str(
            r#"
            [business]
            name = "n"
            type = "t"
            location = "l"
            website = "https://x.example"
            "#,
        )
        .unwrap();
        config.base_dir = dir.path().to_path_buf();
        config
    }

    #[test]
    fn creates_dirs_and_empty_history() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        scaffold_site(&config).unwrap();

        assert!(config.posts_dir().is_dir());
        assert!(config.images_dir().is_dir());
        assert_eq!(fs::read_to_string(config.history_path()).unwrap(), "[]");
    }

    #[test]
    fn keeps_existing_history() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        TopicHistoryStore::new(config.history_path())
            .append("kept")
            .unwrap();
        scaffold_site(&config).unwrap();

        let history = TopicHistoryStore::new(config.history_path()).load().unwrap();
        assert_eq!(history.len(), 1);
    }
}

use crate::config::Config;
use crate::history::{TopicHistoryStore, TopicRecord};

/// Number of topics listed under "Recent topics".
pub const RECENT_LIMIT: usize = 5;

/// Stats for the configured history. A malformed history file reads as
/// empty, as it does for `generate`.
pub fn stats_for(config: &Config) -> String {
    render_stats(&TopicHistoryStore::new(config.history_path()).load_or_empty())
}

pub fn render_stats(history: &[TopicRecord]) -> String {
    let mut lines = vec![
        "◆ Blog Statistics".to_string(),
        String::new(),
        format!("  Total posts generated: {}", history.len()),
    ];

    let (Some(first), Some(latest)) = (history.first(), history.last()) else {
        lines.push(String::new());
        lines.push("  No posts generated yet. Run `blog-generator generate`.".to_string());
        return lines.join("\n");
    };

    lines.push(format!("  First post: {}", first.date.format("%Y-%m-%d")));
    lines.push(format!("  Latest post: {}", latest.date.format("%Y-%m-%d")));
    lines.push(String::new());
    lines.push("  Recent topics:".to_string());
    for record in history.iter().rev().take(RECENT_LIMIT) {
        lines.push(format!("    - {}", record.topic));
    }
    lines.join("\n")
}

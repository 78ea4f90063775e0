use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

// ── Top-level config ──────────────────────────────────────────────

/// Immutable snapshot of `blog-generator.toml` for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was loaded from - not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Directory relative paths resolve against - not serialized
    #[serde(skip)]
    pub base_dir: PathBuf,

    pub business: BusinessConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub prompts: PromptsConfig,

    /// Curated topic pool.
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Config {
    /// Resolve a configured path: `~` is expanded and relative paths are
    /// joined onto the config directory.
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        let expanded = shellexpand::tilde(raw);
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.resolve_path(&self.output.posts_path)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.resolve_path(&self.output.images_path)
    }

    pub fn history_path(&self) -> PathBuf {
        self.resolve_path(&self.output.history_path)
    }

    /// Root of the website the generator lives in. Defaults to the parent of
    /// the config directory (the generator is usually installed in a
    /// `.blog-generator/` folder inside the site).
    pub fn site_root(&self) -> Option<PathBuf> {
        match self.output.site_root.as_deref() {
            Some(raw) => Some(self.resolve_path(raw)),
            None => self.base_dir.parent().map(Path::to_path_buf),
        }
    }

    /// Business location up to the first comma ("Yeovil, Somerset" -> "Yeovil").
    pub fn location_name(&self) -> &str {
        self.business.location_name()
    }

    pub fn website(&self) -> &str {
        self.business.website.trim_end_matches('/')
    }
}

// ── Business identity ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub name: String,
    /// Trade, lower-cased ("window cleaner", "plumber").
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    #[serde(default)]
    pub nearby_areas: Vec<String>,
    pub website: String,
}

impl BusinessConfig {
    pub fn location_name(&self) -> &str {
        self.location
            .split(',')
            .next()
            .map_or(self.location.as_str(), str::trim)
    }
}

// ── Blog ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// URL segment the site serves posts under.
    #[serde(default = "default_blog_slug")]
    pub slug: String,
}

fn default_blog_slug() -> String {
    "blog".into()
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            slug: default_blog_slug(),
        }
    }
}

// ── AI ────────────────────────────────────────────────────────────

/// How topics are synthesized once the curated pool runs low.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TopicStrategy {
    #[default]
    Template,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Omitted from requests when unset; some models only accept the default.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_true")]
    pub generate_images: bool,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_image_size")]
    pub image_size: String,
    #[serde(default)]
    pub topic_strategy: TopicStrategy,
}

fn default_base_url() -> String {
    crate::providers::openai::DEFAULT_BASE_URL.into()
}

fn default_model() -> String {
    "gpt-5-nano-2025-08-07".into()
}

fn default_image_model() -> String {
    "dall-e-2".into()
}

fn default_image_size() -> String {
    "512x512".into()
}

fn default_true() -> bool {
    true
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: None,
            generate_images: true,
            image_model: default_image_model(),
            image_size: default_image_size(),
            topic_strategy: TopicStrategy::default(),
        }
    }
}

// ── Output ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_posts_path")]
    pub posts_path: String,
    #[serde(default = "default_images_path")]
    pub images_path: String,
    #[serde(default = "default_history_path")]
    pub history_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_root: Option<String>,
}

fn default_posts_path() -> String {
    "./content/posts".into()
}

fn default_images_path() -> String {
    "./public/images/blog".into()
}

fn default_history_path() -> String {
    "./topic-history.json".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            posts_path: default_posts_path(),
            images_path: default_images_path(),
            history_path: default_history_path(),
            site_root: None,
        }
    }
}

// ── Schedule ──────────────────────────────────────────────────────

pub const MANUAL_SCHEDULE: &str = "manual";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Cron expression, or `"manual"` to disable the scheduler.
    #[serde(default = "default_cron")]
    pub cron: String,
}

fn default_cron() -> String {
    "0 9 * * *".into()
}

impl ScheduleConfig {
    pub fn is_manual(&self) -> bool {
        self.cron.trim().eq_ignore_ascii_case(MANUAL_SCHEDULE)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
        }
    }
}

// ── Prompts ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub system: String,
}

use async_trait::async_trait;
use blog_generator::config::{Config, DEFAULT_CONFIG_FILE};
use blog_generator::error::{GenerationError, GeneratorError};
use blog_generator::history::TopicHistoryStore;
use blog_generator::media::ImageStore;
use blog_generator::pipeline::{Orchestrator, RunReport};
use blog_generator::providers::{CompletionRequest, GeneratedImage, ImageRequest, Provider};
use blog_generator::topics::{SeededRandom, TopicSource};
use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

const SITE_CONFIG: &str = r#"
topics = [
    "Gutter cleaning in autumn",
    "Conservatory roof cleaning",
    "Solar panel cleaning benefits",
]

[business]
name = "Sparkle Windows"
type = "window cleaner"
location = "Yeovil, Somerset"
nearby_areas = ["Sherborne", "Crewkerne"]
website = "https://sparkle.example"

[schedule]
cron = "manual"
"#;

/// Replays fixed responses and records every content prompt it receives.
struct StubProvider {
    content: Option<&'static str>,
    image: Option<Vec<u8>>,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    fn new(content: Option<&'static str>, image: Option<Vec<u8>>) -> Self {
        Self {
            content,
            image,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> anyhow::Result<String> {
        assert!(request.json_object);
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        self.content
            .map(ToOwned::to_owned)
            .ok_or_else(|| anyhow::anyhow!("OpenAI API error (503): overloaded"))
    }

    async fn generate_image(&self, _: &ImageRequest<'_>) -> anyhow::Result<GeneratedImage> {
        self.image
            .clone()
            .map(GeneratedImage::Bytes)
            .ok_or_else(|| anyhow::anyhow!("image endpoint unavailable"))
    }
}

/// `<site>/public/` plus the generator installed in `<site>/.blog-generator/`.
struct Site {
    dir: TempDir,
    config: Config,
}

impl Site {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        let config_path = dir.path().join(".blog-generator").join(DEFAULT_CONFIG_FILE);
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, SITE_CONFIG).unwrap();
        let config = Config::load(&config_path).unwrap();
        Self { dir, config }
    }

    fn history(&self) -> TopicHistoryStore {
        TopicHistoryStore::new(self.config.history_path())
    }

    fn posts(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.config.posts_dir()) else {
            return Vec::new();
        };
        let mut posts: Vec<_> = entries.map(|e| e.unwrap().path()).collect();
        posts.sort();
        posts
    }

    fn public_images(&self) -> PathBuf {
        self.dir.path().join("public").join("images").join("blog")
    }

    async fn run(
        &self,
        provider: &StubProvider,
        seed: u64,
        now: DateTime<Local>,
    ) -> Result<RunReport, GeneratorError> {
        let history = self.history();
        let images = ImageStore::from_config(&self.config, reqwest::Client::new());
        Orchestrator::new(&self.config, provider, &history, images)
            .run(&mut SeededRandom::new(seed), now)
            .await
    }
}

fn at(day: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 10, day, 9, 30, 0).unwrap()
}

fn stem(path: &Path) -> String {
    path.file_stem().unwrap().to_str().unwrap().to_string()
}

#[tokio::test]
async fn successful_run_writes_one_post_and_records_topic() {
    let site = Site::new();
    let provider = StubProvider::new(
        Some(r#"{"title":"T","content":"Body"}"#),
        Some(vec![0x89, b'P', b'N', b'G']),
    );

    let report = site.run(&provider, 7, at(14)).await.unwrap();

    let posts = site.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0], report.path);

    let doc = fs::read_to_string(&report.path).unwrap();
    assert!(doc.starts_with("---\n"));
    assert!(doc.contains("title: \"T\"\n"));
    assert!(doc.contains("author: \"Sparkle Windows\"\n"));
    assert!(doc.contains("---\n\nBody\n\n## Why Choose Professional window cleaner Services in Yeovil, Somerset?"));
    assert!(doc.ends_with("*Last updated: 14 October 2025*"));

    let history = site.history().load().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].topic, report.topic);
    assert_eq!(report.topic_source, TopicSource::Pool);

    let image = report.image.expect("image stored");
    let mirrored = site.public_images().join(&image.file_name);
    assert!(site.config.images_dir().join(&image.file_name).is_file());
    assert!(mirrored.is_file());
    assert_eq!(fs::read(mirrored).unwrap(), vec![0x89, b'P', b'N', b'G']);
    assert!(doc.contains(&format!("image: \"/images/blog/{}\"", image.file_name)));
}

#[tokio::test]
async fn content_failure_consumes_topic_without_writing_post() {
    let site = Site::new();
    let provider = StubProvider::new(None, None);

    let err = site.run(&provider, 7, at(14)).await.unwrap_err();

    assert!(matches!(
        err,
        GeneratorError::Generation(GenerationError::Content(_))
    ));
    assert!(err.to_string().contains("overloaded"));
    assert!(site.posts().is_empty());
    assert_eq!(site.history().load().unwrap().len(), 1);
}

#[tokio::test]
async fn image_failure_still_publishes_post() {
    let site = Site::new();
    let provider = StubProvider::new(Some(r#"{"title":"T","content":"Body"}"#), None);

    let report = site.run(&provider, 7, at(14)).await.unwrap();

    assert!(report.image.is_none());
    assert!(report.image_error.unwrap().contains("image endpoint unavailable"));
    assert_eq!(site.posts().len(), 1);
    let doc = fs::read_to_string(&report.path).unwrap();
    assert!(!doc.contains("imageAlt:"));
}

#[tokio::test]
async fn later_runs_link_earlier_posts_and_pick_fresh_topics() {
    let site = Site::new();
    let provider = StubProvider::new(
        Some(r#"{"title":"Clean Gutters","content":"Body"}"#),
        Some(vec![1, 2, 3]),
    );

    let first = site.run(&provider, 1, at(14)).await.unwrap();
    let second = site.run(&provider, 2, at(15)).await.unwrap();

    assert_ne!(first.topic, second.topic);
    assert_eq!(second.topic_source, TopicSource::Pool);
    assert_eq!(site.posts().len(), 2);

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains("EXISTING BLOG POSTS"));
    assert!(prompts[1].contains(&format!(
        "- \"Clean Gutters\" at /blog/{}\n",
        stem(&first.path)
    )));

    let topics: Vec<_> = site
        .history()
        .load()
        .unwrap()
        .into_iter()
        .map(|r| r.topic)
        .collect();
    assert_eq!(topics, [first.topic, second.topic]);
}

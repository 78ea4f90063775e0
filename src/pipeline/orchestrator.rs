use crate::config::Config;
use crate::content::{GeneratedPost, PostImage, assemble, filename, scan_existing_posts, slugify};
use crate::error::{GenerationError, GeneratorError, StorageError};
use crate::history::TopicHistoryStore;
use crate::media::{ImageStore, StoredImage};
use crate::prompt::{TeraEngine, build_content_prompt, build_image_prompt};
use crate::providers::{CompletionRequest, ImageRequest, Provider};
use crate::topics::{RandomSource, TopicChoice, TopicSelector, TopicSource, TopicSynthesizer};
use crate::utils::fs::atomic_write;
use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;
use strum::Display;

/// Steps of one generation run. `Failed` is reachable from every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunState {
    Idle,
    TopicSelected,
    ContentFetched,
    ImageFetched,
    Assembled,
    Written,
    Done,
    Failed,
}

/// Outcome of a successful run, including degraded parts.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub topic: String,
    pub topic_source: TopicSource,
    pub title: String,
    pub path: PathBuf,
    pub image: Option<StoredImage>,
    /// Set when image generation was enabled but failed.
    pub image_error: Option<String>,
    /// States visited, in order, ending in `Done`.
    pub states: Vec<RunState>,
}

struct Transitions {
    states: Vec<RunState>,
}

impl Transitions {
    fn new() -> Self {
        Self {
            states: vec![RunState::Idle],
        }
    }

    fn current(&self) -> RunState {
        self.states.last().copied().unwrap_or(RunState::Idle)
    }

    fn advance(&mut self, next: RunState) {
        tracing::debug!(from = %self.current(), to = %next, "run transition");
        self.states.push(next);
    }

    /// Enter the terminal `Failed` state; returns the step that failed.
    fn fail(&mut self) -> RunState {
        let failed_at = self.current();
        self.advance(RunState::Failed);
        failed_at
    }
}

/// Drives one complete attempt to produce and persist a single post.
pub struct Orchestrator<'a> {
    config: &'a Config,
    provider: &'a dyn Provider,
    history: &'a TopicHistoryStore,
    images: ImageStore,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a Config,
        provider: &'a dyn Provider,
        history: &'a TopicHistoryStore,
        images: ImageStore,
    ) -> Self {
        Self {
            config,
            provider,
            history,
            images,
        }
    }

    /// Run every step in order. Only a history/post write failure or a
    /// content-generation failure ends the run with an error; the topic is
    /// recorded in history before content is requested, so a failed run
    /// still uses up its topic.
    pub async fn run(
        &self,
        rng: &mut dyn RandomSource,
        now: DateTime<Local>,
    ) -> Result<RunReport, GeneratorError> {
        let mut transitions = Transitions::new();
        let result = self.run_steps(&mut transitions, rng, now).await;
        if let Err(e) = &result {
            let failed_at = transitions.fail();
            tracing::warn!(after = %failed_at, "generation run failed: {e}");
        }
        result
    }

    async fn run_steps(
        &self,
        transitions: &mut Transitions,
        rng: &mut dyn RandomSource,
        now: DateTime<Local>,
    ) -> Result<RunReport, GeneratorError> {
        let config = self.config;

        // Idle -> TopicSelected
        let history = self.history.load_or_empty();
        let synthesizer = TopicSynthesizer::new(config, now.date_naive(), Some(self.provider));
        let TopicChoice { topic, source } = TopicSelector::new(&config.topics, synthesizer)
            .select(&history, rng)
            .await;
        tracing::info!(topic = %topic, source = %source, "selected topic");
        self.history
            .append_at(&topic, now.with_timezone(&Utc))
            .map_err(GeneratorError::from)?;
        transitions.advance(RunState::TopicSelected);

        // TopicSelected -> ContentFetched
        let mut post = self.fetch_content(&topic).await?;
        transitions.advance(RunState::ContentFetched);

        // ContentFetched -> ImageFetched (optional, never fatal)
        let mut image = None;
        let mut image_error = None;
        if config.ai.generate_images {
            match self.fetch_image(&topic, &post.title, now).await {
                Ok(stored) => {
                    post.image = Some(PostImage {
                        url: stored.web_path.clone(),
                        alt: format!(
                            "{} - {} in {}",
                            post.title, config.business.name, config.business.location
                        ),
                    });
                    image = Some(stored);
                    transitions.advance(RunState::ImageFetched);
                }
                Err(e) => {
                    tracing::warn!("continuing without image: {e}");
                    image_error = Some(e.to_string());
                }
            }
        }

        // -> Assembled
        let slug = slugify(&post.title, post.focus_keyword.as_deref());
        let document = assemble(&post, config, &now);
        transitions.advance(RunState::Assembled);

        // Assembled -> Written
        let path = config.posts_dir().join(filename(&slug, &now));
        atomic_write(&path, document.as_bytes()).map_err(|e| StorageError::write(&path, e))?;
        transitions.advance(RunState::Written);

        transitions.advance(RunState::Done);
        tracing::info!(path = %path.display(), title = %post.title, "blog post saved");

        Ok(RunReport {
            topic,
            topic_source: source,
            title: post.title,
            path,
            image,
            image_error,
            states: transitions.states.clone(),
        })
    }

    async fn fetch_content(&self, topic: &str) -> Result<GeneratedPost, GeneratorError> {
        let config = self.config;
        let existing = scan_existing_posts(&config.posts_dir(), &config.blog.slug);
        tracing::debug!(
            provider = self.provider.name(),
            existing = existing.len(),
            "requesting post content"
        );

        let mut engine = TeraEngine::new();
        let prompt = build_content_prompt(&mut engine, config, topic, &existing)?;
        let request = CompletionRequest::new(&config.ai.model, &prompt)
            .with_system(&config.prompts.system)
            .with_temperature(config.ai.temperature)
            .json();

        let raw = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| GenerationError::Content(format!("{e:#}")))?;
        Ok(GeneratedPost::parse(&raw, topic)?)
    }

    async fn fetch_image(
        &self,
        topic: &str,
        title: &str,
        now: DateTime<Local>,
    ) -> Result<StoredImage, GenerationError> {
        let ai = &self.config.ai;
        let mut engine = TeraEngine::new();
        let prompt = build_image_prompt(&mut engine, topic, &self.config.business.kind)
            .map_err(|e| GenerationError::Image(e.to_string()))?;
        let request = ImageRequest {
            model: &ai.image_model,
            prompt: &prompt,
            size: &ai.image_size,
        };

        let generated = self
            .provider
            .generate_image(&request)
            .await
            .map_err(|e| GenerationError::Image(format!("{e:#}")))?;
        let stored = self.images.save(generated, now.timestamp_millis()).await?;
        tracing::debug!(title, web_path = %stored.web_path, "image attached");
        Ok(stored)
    }
}

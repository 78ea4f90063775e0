use super::calendar::{Season, month_name};
use super::rng::RandomSource;
use crate::config::{Config, TopicStrategy};
use crate::error::GenerationError;
use crate::history::TopicRecord;
use crate::prompt::{TeraEngine, build_topic_idea_prompt};
use crate::providers::{CompletionRequest, Provider};
use crate::utils::text::strip_quotes;
use chrono::{Datelike, NaiveDate};

/// How many of the most recent history entries the model sees.
pub const RECENT_TOPICS_CONTEXT: usize = 30;

/// Model suggestions shorter than this are treated as a failed call.
const MIN_MODEL_TOPIC_CHARS: usize = 10;

/// The fixed candidate list: a pure function of the date and business.
pub fn template_candidates(config: &Config, today: NaiveDate) -> Vec<String> {
    let kind = &config.business.kind;
    let location = &config.business.location;
    let place = config.location_name();
    let month = month_name(today);
    let season = Season::for_date(today);
    let year = today.year();

    vec![
        format!("{month} {kind} tips for {place} properties"),
        format!("{season} maintenance guide for {location}"),
        format!("{year} {kind} costs in {place}"),
        format!("Emergency {kind} services in {location}"),
        format!("Eco-friendly {kind} solutions for {place}"),
        format!("Common {kind} problems in {place} homes"),
        format!("{kind} safety guide for {location}"),
        format!("Choosing a {kind} in {place}: What to ask"),
        format!("DIY vs professional {kind} in {location}"),
        format!("{kind} regulations in {place} {year}"),
    ]
}

/// Where a synthesized topic came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesized {
    Template(String),
    Model(String),
    /// Model strategy was configured but failed; a template was used instead.
    Fallback { topic: String, reason: String },
}

/// Produces a topic outside the curated pool. Never fails: the model path
/// degrades to the template list.
pub struct TopicSynthesizer<'a> {
    config: &'a Config,
    today: NaiveDate,
    provider: Option<&'a dyn Provider>,
}

impl<'a> TopicSynthesizer<'a> {
    pub fn new(config: &'a Config, today: NaiveDate, provider: Option<&'a dyn Provider>) -> Self {
        Self {
            config,
            today,
            provider,
        }
    }

    pub async fn synthesize(
        &self,
        history: &[TopicRecord],
        rng: &mut dyn RandomSource,
    ) -> Synthesized {
        if self.config.ai.topic_strategy == TopicStrategy::Template {
            return Synthesized::Template(self.pick_template(rng));
        }

        match self.ask_model(history).await {
            Ok(topic) => Synthesized::Model(topic),
            Err(e) => {
                tracing::warn!("topic synthesis fell back to templates: {e}");
                Synthesized::Fallback {
                    topic: self.pick_template(rng),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn pick_template(&self, rng: &mut dyn RandomSource) -> String {
        let mut candidates = template_candidates(self.config, self.today);
        let index = rng.next_index(candidates.len());
        candidates.swap_remove(index)
    }

    async fn ask_model(&self, history: &[TopicRecord]) -> Result<String, GenerationError> {
        let provider = self
            .provider
            .ok_or_else(|| GenerationError::TopicSynthesis("no provider available".into()))?;

        let recent: Vec<&str> = history
            .iter()
            .rev()
            .take(RECENT_TOPICS_CONTEXT)
            .map(|record| record.topic.as_str())
            .collect();

        let mut engine = TeraEngine::new();
        let prompt = build_topic_idea_prompt(&mut engine, self.config, &recent, self.today)
            .map_err(|e| GenerationError::TopicSynthesis(e.to_string()))?;

        let request = CompletionRequest::new(&self.config.ai.model, &prompt)
            .with_system(&self.config.prompts.system)
            .with_temperature(self.config.ai.temperature);
        let raw = provider
            .complete(&request)
            .await
            .map_err(|e| GenerationError::TopicSynthesis(format!("{e:#}")))?;

        let topic = raw.lines().map(strip_quotes).find(|line| !line.is_empty()).unwrap_or("");
        if topic.chars().count() < MIN_MODEL_TOPIC_CHARS {
            return Err(GenerationError::TopicSynthesis(format!(
                "model suggestion too short: {topic:?}"
            )));
        }
        Ok(topic.to_string())
    }
}

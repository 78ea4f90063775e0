use super::rng::RandomSource;
use super::synth::{Synthesized, TopicSynthesizer};
use crate::history::TopicRecord;
use std::collections::HashSet;
use strum::Display;

/// Where the selected topic came from.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TopicSource {
    Pool,
    Template,
    Model,
    /// Model synthesis failed and a template was used; carries the reason.
    #[strum(to_string = "template_fallback")]
    TemplateFallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicChoice {
    pub topic: String,
    pub source: TopicSource,
}

impl TopicChoice {
    fn pool(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            source: TopicSource::Pool,
        }
    }
}

impl From<Synthesized> for TopicChoice {
    fn from(value: Synthesized) -> Self {
        match value {
            Synthesized::Template(topic) => Self {
                topic,
                source: TopicSource::Template,
            },
            Synthesized::Model(topic) => Self {
                topic,
                source: TopicSource::Model,
            },
            Synthesized::Fallback { topic, reason } => Self {
                topic,
                source: TopicSource::TemplateFallback { reason },
            },
        }
    }
}

/// Picks the next topic from the curated pool, blending in synthesized
/// topics as the pool is used up.
pub struct TopicSelector<'a> {
    pool: &'a [String],
    synthesizer: TopicSynthesizer<'a>,
}

impl<'a> TopicSelector<'a> {
    pub fn new(pool: &'a [String], synthesizer: TopicSynthesizer<'a>) -> Self {
        Self { pool, synthesizer }
    }

    /// Pool topics not yet present in `history`, in pool order.
    pub fn available<'p>(pool: &'p [String], history: &[TopicRecord]) -> Vec<&'p str> {
        let used: HashSet<&str> = history.iter().map(|r| r.topic.as_str()).collect();
        pool.iter()
            .map(String::as_str)
            .filter(|topic| !topic.trim().is_empty() && !used.contains(topic))
            .collect()
    }

    /// Always yields a non-empty topic.
    ///
    /// More than half the pool fresh: a random fresh pool topic. Some fresh:
    /// a coin flip between a fresh pool topic and a synthesized one. None
    /// fresh: synthesized.
    pub async fn select(
        &self,
        history: &[TopicRecord],
        rng: &mut dyn RandomSource,
    ) -> TopicChoice {
        let available = Self::available(self.pool, history);
        tracing::debug!(
            pool = self.pool.len(),
            available = available.len(),
            "selecting topic"
        );

        if available.len() * 2 > self.pool.len() {
            return TopicChoice::pool(available[rng.next_index(available.len())]);
        }

        if !available.is_empty() && rng.chance(0.5) {
            return TopicChoice::pool(available[rng.next_index(available.len())]);
        }

        self.synthesizer.synthesize(history, rng).await.into()
    }
}

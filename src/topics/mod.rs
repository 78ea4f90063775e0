pub mod calendar;
pub mod rng;
mod selector;
mod synth;

pub use rng::{RandomSource, SeededRandom, ThreadRandom};
pub use selector::{TopicChoice, TopicSelector, TopicSource};
pub use synth::{RECENT_TOPICS_CONTEXT, Synthesized, TopicSynthesizer, template_candidates};

mod store;

pub use store::{TopicHistoryStore, TopicRecord};

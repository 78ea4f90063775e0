use crate::error::GenerationError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Structured article returned by the content-generation call.
///
/// The model output is untrusted: every field is optional on the wire and
/// malformed scalar/list fields degrade to empty instead of failing the run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedPost {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub meta_description: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub focus_keyword: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub secondary_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    pub schema: Option<Value>,
    /// Filled in by the image step, never by the model.
    #[serde(skip)]
    pub image: Option<PostImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostImage {
    /// Site-relative URL, e.g. `/images/blog/1741165200000.png`.
    pub url: String,
    pub alt: String,
}

impl GeneratedPost {
    /// Parse the model's JSON reply. A leading/trailing Markdown code fence is
    /// tolerated; anything that is not a JSON object is a content error.
    pub fn parse(raw: &str, topic: &str) -> Result<Self, GenerationError> {
        let body = strip_code_fence(raw);
        let value: Value = serde_json::from_str(body).map_err(|e| {
            GenerationError::Content(format!("model response is not valid JSON: {e}"))
        })?;
        if !value.is_object() {
            return Err(GenerationError::Content(
                "model response is not a JSON object".into(),
            ));
        }
        let mut post: GeneratedPost = serde_json::from_value(value).map_err(|e| {
            GenerationError::Content(format!("model response has unexpected shape: {e}"))
        })?;
        if post.title.trim().is_empty() {
            post.title = topic.to_string();
        }
        post.title = post.title.trim().to_string();
        Ok(post)
    }

    /// `@type` of the JSON-LD schema the model supplied, if any.
    pub fn schema_type(&self) -> Option<String> {
        match self.schema.as_ref()? {
            Value::String(kind) if !kind.trim().is_empty() => Some(kind.trim().to_string()),
            Value::Object(map) => map
                .get("@type")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned),
            _ => None,
        }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_to_string(Value::deserialize(d)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_to_string(Value::deserialize(d)?)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Arrays of scalars, or a single comma-separated string.
fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let items = match Value::deserialize(d)? {
        Value::Array(values) => values.into_iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => s.split(',').map(ToOwned::to_owned).collect(),
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

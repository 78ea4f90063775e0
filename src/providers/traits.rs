use async_trait::async_trait;

/// One text-generation call: a system prompt plus a single user prompt.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system_prompt: Option<&'a str>,
    pub prompt: &'a str,
    /// Left to the model's default when unset.
    pub temperature: Option<f64>,
    /// Ask the model for a single JSON object instead of free text.
    pub json_object: bool,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            system_prompt: None,
            prompt,
            temperature: None,
            json_object: false,
        }
    }

    #[must_use]
    pub fn with_system(mut self, system_prompt: &'a str) -> Self {
        if !system_prompt.trim().is_empty() {
            self.system_prompt = Some(system_prompt);
        }
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_object = true;
        self
    }
}

/// One image-generation call producing a single image.
#[derive(Debug, Clone, Copy)]
pub struct ImageRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    /// `"<width>x<height>"`, e.g. `512x512`.
    pub size: &'a str,
}

/// An image as the API handed it back: a short-lived URL to fetch, or the
/// decoded bytes when the API returned base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    Url(String),
    Bytes(Vec<u8>),
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable name used in logs and error messages.
    fn name(&self) -> &str;

    /// Run a text completion and return the first choice's text.
    async fn complete(&self, request: &CompletionRequest<'_>) -> anyhow::Result<String>;

    async fn generate_image(&self, request: &ImageRequest<'_>) -> anyhow::Result<GeneratedImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_system_prompt_is_dropped() {
        let req = CompletionRequest::new("gpt", "hi").with_system("  ");
        assert!(req.system_prompt.is_none());
        let req = CompletionRequest::new("gpt", "hi").with_system("be brief");
        assert_eq!(req.system_prompt, Some("be brief"));
    }

    #[test]
    fn builder_defaults() {
        let req = CompletionRequest::new("gpt", "hi");
        assert!(req.temperature.is_none());
        assert!(!req.json_object);
        let req = req.with_temperature(Some(0.4)).json();
        assert_eq!(req.temperature, Some(0.4));
        assert!(req.json_object);
    }
}

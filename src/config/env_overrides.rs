use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY")
            && !key.is_empty()
        {
            self.ai.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("BLOG_GENERATOR_MODEL")
            && !model.is_empty()
        {
            self.ai.model = model;
        }

        if let Ok(base_url) = std::env::var("BLOG_GENERATOR_BASE_URL")
            && !base_url.is_empty()
        {
            self.ai.base_url = base_url;
        }
    }
}

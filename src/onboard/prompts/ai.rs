use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Password, Select};

use super::super::domain::MODEL_CHOICES;
use super::super::view::print_bullet;

#[derive(Debug, Clone)]
pub struct AiAnswers {
    /// `None` when the key is left to `OPENAI_API_KEY`.
    pub api_key: Option<String>,
    pub model: String,
    pub generate_images: bool,
}

pub fn setup_ai() -> Result<AiAnswers> {
    let env_key_present = std::env::var("OPENAI_API_KEY").is_ok_and(|k| !k.trim().is_empty());
    if env_key_present {
        print_bullet(&format!(
            "{} found in the environment",
            style("OPENAI_API_KEY").green()
        ));
    }
    print_bullet("Leave the key blank to read it from OPENAI_API_KEY at run time");

    let api_key: String = Password::new()
        .with_prompt("  Enter your OpenAI API key")
        .allow_empty_password(true)
        .interact()?;
    let api_key = Some(api_key.trim().to_string()).filter(|k| !k.is_empty());

    let labels: Vec<&str> = MODEL_CHOICES.iter().map(|(label, _)| *label).collect();
    let choice = Select::new()
        .with_prompt("  Which AI model to use?")
        .items(&labels)
        .default(0)
        .interact()?;

    let generate_images = Confirm::new()
        .with_prompt("  Generate images for blog posts?")
        .default(true)
        .interact()?;

    Ok(AiAnswers {
        api_key,
        model: MODEL_CHOICES[choice].1.to_string(),
        generate_images,
    })
}

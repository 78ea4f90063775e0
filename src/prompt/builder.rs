use super::engine::TeraEngine;
use crate::config::Config;
use crate::content::ExistingPost;
use tera::Context;

const CONTENT_TEMPLATE: &str = "\
{% if context %}{{ context }}

{% endif %}\
Write a comprehensive, SEO-optimized blog post about: \"{{ topic }}\"
{% if existing_posts %}
EXISTING BLOG POSTS for internal linking:
{% for post in existing_posts %}- \"{{ post.title }}\" at {{ post.url }}
{% endfor %}{% endif %}
Requirements:
1. Title: Create a professional, compelling title (50-70 characters)
2. Content: 1500-2000 words for better SEO ranking
3. Structure: Use ## for H2 headings, ### for H3 subheadings
4. Local SEO: Mention {{ location }} 3-4 times naturally
5. Include nearby areas: {{ nearby_areas }}
6. Internal Linking: Add 3-5 internal links to {{ website }}
7. Human touches: Use contractions, personal observations
8. Include FAQ section with 3-5 questions
9. Meta description: 150-160 characters

Format the response as JSON with these fields:
- title: The blog post title
- excerpt: A 2-3 sentence summary
- metaDescription: SEO meta description
- focusKeyword: Main keyword to target
- secondaryKeywords: Array of 3-5 secondary keywords
- tags: Array of 5-8 relevant tags
- content: The full blog post in markdown format";

const TOPIC_IDEA_TEMPLATE: &str = "\
Suggest one new blog post topic for {{ name }}, a {{ kind }} business in {{ location }}.
It is {{ month }} {{ year }} ({{ season }}).
{% if recent_topics %}
Avoid repeating these recent topics:
{% for topic in recent_topics %}- {{ topic }}
{% endfor %}{% endif %}
Reply with the topic only: a single line of plain text, no quotes, no numbering.";

const IMAGE_TEMPLATE: &str = "\
Amateur smartphone photo of {{ topic }}, taken by {{ kind }} business owner, slightly blurry, \
natural lighting, real UK {{ kind }} work, authentic setting, consumer grade photo, imperfect \
composition, taken quickly, genuine documentary style, no stock photo quality, absolutely NO \
TEXT anywhere in image, no writing, no signs with text, no labels with words, no written words, \
no letters, no numbers, no typography, no captions, no watermarks, textless image only, \
wordless photograph, ensure completely text-free";

const CONTENT_NAME: &str = "content";
const TOPIC_IDEA_NAME: &str = "topic_idea";
const IMAGE_NAME: &str = "image";

/// Ensure the default templates are registered in the engine.
fn ensure_defaults(engine: &mut TeraEngine) -> anyhow::Result<()> {
    // `add_template` overwrites silently, so we always register.
    engine.add_template(CONTENT_NAME, CONTENT_TEMPLATE)?;
    engine.add_template(TOPIC_IDEA_NAME, TOPIC_IDEA_TEMPLATE)?;
    engine.add_template(IMAGE_NAME, IMAGE_TEMPLATE)?;
    Ok(())
}

/// User prompt for the content-generation call.
pub fn build_content_prompt(
    engine: &mut TeraEngine,
    config: &Config,
    topic: &str,
    existing_posts: &[ExistingPost],
) -> anyhow::Result<String> {
    ensure_defaults(engine)?;

    let mut ctx = Context::new();
    ctx.insert("context", config.prompts.context.trim());
    ctx.insert("topic", topic);
    ctx.insert("existing_posts", existing_posts);
    ctx.insert("location", &config.business.location);
    ctx.insert("nearby_areas", &config.business.nearby_areas.join(", "));
    ctx.insert("website", config.website());

    engine.render(CONTENT_NAME, &ctx)
}

/// Prompt asking the model for one fresh topic. `recent_topics` should
/// already be limited to the most recent entries.
pub fn build_topic_idea_prompt(
    engine: &mut TeraEngine,
    config: &Config,
    recent_topics: &[&str],
    today: chrono::NaiveDate,
) -> anyhow::Result<String> {
    use crate::topics::calendar::{Season, month_name};
    use chrono::Datelike;

    ensure_defaults(engine)?;

    let mut ctx = Context::new();
    ctx.insert("name", &config.business.name);
    ctx.insert("kind", &config.business.kind);
    ctx.insert("location", &config.business.location);
    ctx.insert("month", month_name(today));
    ctx.insert("year", &today.year());
    ctx.insert("season", &Season::for_date(today).to_string());
    ctx.insert("recent_topics", recent_topics);

    engine.render(TOPIC_IDEA_NAME, &ctx)
}

/// Prompt for the image-generation call.
pub fn build_image_prompt(
    engine: &mut TeraEngine,
    topic: &str,
    business_type: &str,
) -> anyhow::Result<String> {
    ensure_defaults(engine)?;

    let mut ctx = Context::new();
    ctx.insert("topic", &topic.to_lowercase());
    ctx.insert("kind", business_type);

    engine.render(IMAGE_NAME, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> Config {
        toml::from_str(
            r#"
            [business]
            name = "Sparkle Windows"
            type = "window cleaner"
            location = "Yeovil, Somerset"
            nearby_areas = ["Sherborne", "Martock"]
            website = "https://sparkle.example/"

            [prompts]
            context = "You are a friendly local window cleaner."
            "#,
        )
        .unwrap()
    }

    #[test]
    fn content_prompt_includes_business_details() {
        let mut engine = TeraEngine::new();
        let prompt = build_content_prompt(&mut engine, &config(), "Gutter care", &[]).unwrap();

        assert!(prompt.starts_with("You are a friendly local window cleaner.\n\n"));
        assert!(prompt.contains("blog post about: \"Gutter care\""));
        assert!(prompt.contains("Mention Yeovil, Somerset 3-4 times"));
        assert!(prompt.contains("Include nearby areas: Sherborne, Martock"));
        assert!(prompt.contains("internal links to https://sparkle.example\n"));
        assert!(prompt.contains("- focusKeyword: Main keyword to target"));
        assert!(!prompt.contains("EXISTING BLOG POSTS"));
    }

    #[test]
    fn content_prompt_lists_existing_posts() {
        let mut engine = TeraEngine::new();
        let posts = vec![ExistingPost {
            title: "Roof Checks".into(),
            url: "/blog/2025-01-01-roof-checks-1".into(),
            slug: "2025-01-01-roof-checks-1".into(),
        }];
        let prompt = build_content_prompt(&mut engine, &config(), "Gutters", &posts).unwrap();
        assert!(prompt.contains(
            "EXISTING BLOG POSTS for internal linking:\n- \"Roof Checks\" at /blog/2025-01-01-roof-checks-1\n"
        ));
    }

    #[test]
    fn content_prompt_without_context_starts_with_request() {
        let mut config = config();
        config.prompts.context = String::new();
        let mut engine = TeraEngine::new();
        let prompt = build_content_prompt(&mut engine, &config, "Gutters", &[]).unwrap();
        assert!(prompt.starts_with("Write a comprehensive"));
    }

    #[test]
    fn topic_idea_prompt_lists_recent_topics() {
        let mut engine = TeraEngine::new();
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let prompt =
            build_topic_idea_prompt(&mut engine, &config(), &["Roof checks", "Gutters"], today)
                .unwrap();
        assert!(prompt.contains("Sparkle Windows, a window cleaner business in Yeovil, Somerset"));
        assert!(prompt.contains("It is March 2025 (spring)."));
        assert!(prompt.contains("- Roof checks\n- Gutters\n"));
    }

    #[test]
    fn topic_idea_prompt_without_history() {
        let mut engine = TeraEngine::new();
        let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let prompt = build_topic_idea_prompt(&mut engine, &config(), &[], today).unwrap();
        assert!(!prompt.contains("Avoid repeating"));
        assert!(prompt.contains("(winter)"));
    }

    #[test]
    fn image_prompt_is_text_free_photo() {
        let mut engine = TeraEngine::new();
        let prompt = build_image_prompt(&mut engine, "Clean Gutters", "plumber").unwrap();
        assert!(prompt.starts_with("Amateur smartphone photo of clean gutters, taken by plumber"));
        assert!(prompt.ends_with("ensure completely text-free"));
    }
}

use super::frontmatter::Frontmatter;
use super::post::GeneratedPost;
use super::slug::slugify;
use crate::config::Config;
use crate::topics::calendar::uk_long_date;
use crate::utils::text::word_count;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

const WORDS_PER_MINUTE: usize = 200;

/// `"<minutes> min read"`, rounded up, never below one minute.
pub fn reading_time(words: usize) -> String {
    format!("{} min read", words.div_ceil(WORDS_PER_MINUTE).max(1))
}

/// Metadata block for `post`, derived from the post, the config and `at`.
pub fn build_frontmatter<Tz: TimeZone>(
    post: &GeneratedPost,
    config: &Config,
    slug: &str,
    at: &DateTime<Tz>,
) -> Frontmatter {
    let words = word_count(&post.content);
    let image = post.image.as_ref();
    let canonical = format!("{}/{}/{slug}", config.website(), config.blog.slug);

    let mut fm = Frontmatter::new();
    // Keys are the declared constants; `set` cannot fail for them.
    let entries: [(&str, Option<super::FrontmatterValue>); 15] = [
        ("title", Some(post.title.clone().into())),
        (
            "date",
            Some(
                at.with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
                    .into(),
            ),
        ),
        ("excerpt", post.excerpt.clone().map(Into::into)),
        ("tags", Some(post.tags.clone().into())),
        ("author", Some(config.business.name.clone().into())),
        ("featured", Some(false.into())),
        ("readingTime", Some(reading_time(words).into())),
        ("wordCount", Some((words as u64).into())),
        ("metaDescription", post.meta_description.clone().map(Into::into)),
        ("focusKeyword", post.focus_keyword.clone().map(Into::into)),
        ("secondaryKeywords", Some(post.secondary_keywords.clone().into())),
        ("image", image.map(|i| i.url.clone().into())),
        ("imageAlt", image.map(|i| i.alt.clone().into())),
        ("canonicalUrl", Some(canonical.into())),
        ("schemaType", post.schema_type().map(Into::into)),
    ];
    for (key, value) in entries {
        if let Err(e) = fm.set(key, value) {
            tracing::debug!("skipping frontmatter entry: {e}");
        }
    }
    fm
}

/// Final Markdown document: frontmatter, blank line, the model's body
/// verbatim, then the fixed call-to-action and attribution footer.
pub fn assemble<Tz: TimeZone>(post: &GeneratedPost, config: &Config, at: &DateTime<Tz>) -> String {
    let slug = slugify(&post.title, post.focus_keyword.as_deref());
    let frontmatter = build_frontmatter(post, config, &slug, at);

    let business = &config.business;
    let kind = &business.kind;
    let location = &business.location;
    let website = config.website();
    let updated = uk_long_date(at.date_naive());

    let mut doc = frontmatter.render();
    doc.push('\n');
    doc.push_str(&post.content);
    doc.push_str(&format!(
        "\n\n## Why Choose Professional {kind} Services in {location}?\n\n\
         If you're looking for reliable [{kind} services in {location}]({website}), we're here to help. \
         Our experienced team provides professional {kind} services for homes and businesses \
         throughout {location} and surrounding areas.\n\n\
         Ready to get started? [Contact us today]({website}#contact) for a free quote!\n\n\
         ---\n\n\
         *This article was written by {name}, your local {kind} experts serving {location} and surrounding areas.*\n\n\
         *Last updated: {updated}*",
        name = business.name,
    ));
    doc
}

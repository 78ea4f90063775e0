use chrono::{DateTime, TimeZone};

pub const MAX_SLUG_CHARS: usize = 60;

/// Slug used when a title has no ASCII letters or digits at all.
const FALLBACK_SLUG: &str = "post";

/// URL-safe, length-bounded identifier for a post.
///
/// The focus keyword is prefixed unless its slug form already appears in the
/// lower-cased title. Output matches `^[a-z0-9]+(-[a-z0-9]+)*$` and is at most
/// [`MAX_SLUG_CHARS`] long.
pub fn slugify(title: &str, focus_keyword: Option<&str>) -> String {
    let mut source = title.to_lowercase();

    if let Some(keyword) = focus_keyword {
        let keyword_slug = collapse_to_hyphens(&keyword.to_lowercase());
        if !keyword_slug.is_empty() && !source.contains(&keyword_slug) {
            source = format!("{keyword_slug}-{source}");
        }
    }

    let mut slug = collapse_to_hyphens(&source);
    if slug.len() > MAX_SLUG_CHARS {
        // ASCII only, so byte and char offsets agree.
        slug.truncate(MAX_SLUG_CHARS);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// `{YYYY}-{MM}-{DD}-{slug}-{epoch-ms}.md`. The millisecond suffix keeps two
/// same-day posts with the same slug apart.
pub fn filename<Tz: TimeZone>(slug: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}-{slug}-{}.md",
        at.format("%Y-%m-%d"),
        at.timestamp_millis()
    )
}

/// Runs of anything outside `[a-z0-9]` become one hyphen; no leading or
/// trailing hyphens.
fn collapse_to_hyphens(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && slug.len() <= MAX_SLUG_CHARS
            && slug.split('-').all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
    }

    #[test]
    fn keyword_prefixed_when_absent_from_title() {
        let slug = slugify("Best Window Cleaning Tips!", Some("window cleaning"));
        assert!(slug.starts_with("window-cleaning-"), "{slug}");
        assert_eq!(slug, "window-cleaning-best-window-cleaning-tips");
    }

    #[test]
    fn keyword_not_prefixed_when_slug_form_in_title() {
        let slug = slugify("Guide to gutter-cleaning in Bath", Some("Gutter Cleaning"));
        assert_eq!(slug, "guide-to-gutter-cleaning-in-bath");
    }

    #[test]
    fn no_keyword() {
        assert_eq!(
            slugify("  Boiler Maintenance: 5 Tips (2025)  ", None),
            "boiler-maintenance-5-tips-2025"
        );
    }

    #[test]
    fn blank_keyword_ignored() {
        assert_eq!(slugify("Roof Checks", Some(" - ")), "roof-checks");
    }

    #[test]
    fn truncates_without_trailing_hyphen() {
        let title = "a".repeat(59) + " bcd";
        let slug = slugify(&title, None);
        assert_eq!(slug.len(), 59);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn long_titles_are_bounded() {
        let title = "Emergency plumbing services across Yeovil, Sherborne, Crewkerne and Martock this winter";
        let slug = slugify(title, Some("emergency plumber yeovil"));
        assert!(slug.len() <= MAX_SLUG_CHARS);
        assert!(is_valid_slug(&slug), "{slug}");
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(slugify("Café Façade Cleaning", None), "caf-fa-ade-cleaning");
    }

    #[test]
    fn symbol_only_title_falls_back() {
        assert_eq!(slugify("!!! ???", None), "post");
        assert_eq!(slugify("日本語", None), "post");
    }

    #[test]
    fn property_holds_for_assorted_titles() {
        let repeated = "x-".repeat(80);
        let titles = [
            "A",
            "--leading and trailing--",
            "Why \"Streak-Free\" matters",
            "100% eco-friendly solutions for Victorian homes in Bath & Wells",
            "UPVC   door    problems",
            "Ünïcödé ünd émojis 🦀 everywhere",
            repeated.as_str(),
        ];
        for title in titles {
            let slug = slugify(title, None);
            assert!(is_valid_slug(&slug), "{title:?} -> {slug:?}");
            assert_eq!(slug, slugify(title, None));
        }
    }

    #[test]
    fn filename_has_date_slug_and_millis() {
        let at = Utc.with_ymd_and_hms(2025, 3, 5, 9, 7, 1).unwrap();
        let name = filename("roof-checks", &at);
        assert_eq!(name, format!("2025-03-05-roof-checks-{}.md", at.timestamp_millis()));
    }

    #[test]
    fn filename_uses_local_calendar_day() {
        let offset = FixedOffset::east_opt(10 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2025, 1, 1, 2, 0, 0).unwrap();
        assert!(filename("x", &at).starts_with("2025-01-01-x-"));
    }
}

use crate::config::PromptsConfig;
use crate::topics::calendar::Season;
use anyhow::Result;

/// A trade the wizard knows starter topics for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessType {
    pub key: &'static str,
    pub name: &'static str,
    pub base_topics: &'static [&'static str],
}

pub const OTHER_BUSINESS_KEY: &str = "other";

pub static BUSINESS_TYPES: [BusinessType; 11] = [
    BusinessType {
        key: "window_cleaner",
        name: "Window Cleaner",
        base_topics: &[
            "streak-free cleaning techniques",
            "seasonal cleaning schedules",
            "commercial vs residential cleaning",
            "safety equipment and procedures",
            "hard water stain removal",
            "eco-friendly cleaning solutions",
        ],
    },
    BusinessType {
        key: "plumber",
        name: "Plumber",
        base_topics: &[
            "emergency leak repairs",
            "boiler maintenance tips",
            "preventing frozen pipes",
            "bathroom renovation planning",
            "water pressure problems",
            "eco-friendly plumbing solutions",
        ],
    },
    BusinessType {
        key: "electrician",
        name: "Electrician",
        base_topics: &[
            "electrical safety at home",
            "smart home installations",
            "energy saving tips",
            "common wiring problems",
            "EV charger installation",
            "electrical inspection importance",
        ],
    },
    BusinessType {
        key: "gardener",
        name: "Gardener/Landscaper",
        base_topics: &[
            "seasonal garden maintenance",
            "lawn care techniques",
            "pest control solutions",
            "native plant benefits",
            "garden design trends",
            "composting guide",
        ],
    },
    BusinessType {
        key: "roofer",
        name: "Roofer",
        base_topics: &[
            "roof inspection checklist",
            "storm damage prevention",
            "gutter maintenance",
            "roof material comparison",
            "insulation benefits",
            "emergency repair tips",
        ],
    },
    BusinessType {
        key: "painter",
        name: "Painter/Decorator",
        base_topics: &[
            "paint type selection",
            "colour psychology",
            "preparation techniques",
            "wallpaper vs paint",
            "exterior painting tips",
            "eco-friendly paints",
        ],
    },
    BusinessType {
        key: "cleaner",
        name: "House Cleaner",
        base_topics: &[
            "deep cleaning checklist",
            "eco-friendly products",
            "time-saving techniques",
            "allergen removal",
            "organizing tips",
            "carpet care guide",
        ],
    },
    BusinessType {
        key: "builder",
        name: "Builder/Construction",
        base_topics: &[
            "home extension planning",
            "building regulations guide",
            "sustainable materials",
            "project timeline tips",
            "budget planning",
            "choosing contractors",
        ],
    },
    BusinessType {
        key: "carpenter",
        name: "Carpenter/Joiner",
        base_topics: &[
            "wood type selection",
            "furniture restoration",
            "custom storage solutions",
            "tool maintenance",
            "sustainable woodworking",
            "repair vs replace",
        ],
    },
    BusinessType {
        key: "locksmith",
        name: "Locksmith",
        base_topics: &[
            "home security assessment",
            "smart lock technology",
            "emergency lockout tips",
            "key management",
            "UPVC door problems",
            "security upgrades",
        ],
    },
    BusinessType {
        key: OTHER_BUSINESS_KEY,
        name: "Other Business Type",
        base_topics: &[],
    },
];

pub fn business_type(key: &str) -> Option<&'static BusinessType> {
    BUSINESS_TYPES.iter().find(|t| t.key == key)
}

const PROPERTY_TYPES: [&str; 5] = [
    "Victorian homes",
    "modern flats",
    "listed buildings",
    "commercial properties",
    "new builds",
];

/// Starter topic pool for a trade.
///
/// `trade` is the lower-cased display name used in generated phrases; for
/// unknown keys there are no base topics but the generic families are still
/// produced.
pub fn topics_for_business(
    key: &str,
    trade: &str,
    location: &str,
    nearby_areas: &[String],
    year: i32,
) -> Vec<String> {
    let base_topics = business_type(key).map_or(&[][..], |t| t.base_topics);
    let place = location.split(',').next().map_or(location, str::trim);

    let mut topics = Vec::new();

    for topic in base_topics {
        topics.push((*topic).to_string());
        topics.push(format!("{topic} in {place}"));
        topics.push(format!("Best {topic} for {location} properties"));
    }

    for season in Season::ALL {
        topics.push(format!("{season} {trade} tips for {place}"));
        topics.push(format!("Preparing for {season} in {location}"));
    }

    topics.push(format!("DIY vs professional {trade} in {place}"));
    topics.push(format!("Cost guide for {location} {year}"));
    topics.push(format!("Common problems in {place} properties"));

    for area in nearby_areas {
        topics.push(format!("Services available in {area}"));
    }

    topics.push(format!("UK regulations for {trade}"));
    topics.push(format!("Insurance and liability in {location}"));
    topics.push("Health and safety requirements".to_string());

    for property in PROPERTY_TYPES {
        topics.push(format!("{trade} for {property} in {place}"));
    }

    topics
}

/// Starting `[prompts]` section for a freshly onboarded business.
pub fn default_prompts(name: &str, trade: &str, location: &str, nearby: &[String]) -> PromptsConfig {
    PromptsConfig {
        context: format!(
            "You are writing for {name}, a professional {trade} company in {location}.
- Always mention local context when relevant
- Use British English spelling and terminology
- Reference UK regulations when relevant
- Mention nearby areas occasionally: {nearby}
- Include seasonal considerations relevant to the local weather
- Be helpful and informative while subtly establishing local expertise

Writing style:
- Write in a conversational, human tone with natural variations in sentence length
- Include personal anecdotes or real-world examples when appropriate
- Add specific local details
- Use colloquialisms and natural speech patterns
- Vary paragraph lengths naturally",
            nearby = nearby.join(", ")
        ),
        system: format!(
            "You are a local {trade} in {location} who writes blog posts based on real \
             experience. Write naturally with personality. Always respond with valid JSON."
        ),
    }
}

/// Selectable posting schedules: (label, cron expression or `manual`).
pub const SCHEDULE_CHOICES: [(&str, &str); 6] = [
    ("Every hour", "0 * * * *"),
    ("Every 3 hours", "0 */3 * * *"),
    ("Every 6 hours", "0 */6 * * *"),
    ("Daily at 9am", "0 9 * * *"),
    ("Twice daily (9am & 3pm)", "0 9,15 * * *"),
    ("Manual only", crate::config::schema::MANUAL_SCHEDULE),
];

/// Selectable text models: (label, model id).
pub const MODEL_CHOICES: [(&str, &str); 3] = [
    ("GPT-5-nano (latest, most cost-effective)", "gpt-5-nano-2025-08-07"),
    ("GPT-4 Turbo", "gpt-4-turbo-preview"),
    ("GPT-3.5 Turbo", "gpt-3.5-turbo"),
];

pub fn validate_non_empty(label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{label} cannot be empty");
    }
    Ok(trimmed.to_string())
}

/// Absolute http(s) URL, returned without a trailing slash.
pub fn validate_website(value: &str) -> Result<String> {
    let trimmed = validate_non_empty("website", value)?;
    let url = url::Url::parse(&trimmed).map_err(|e| anyhow::anyhow!("not a valid URL: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("website must start with http:// or https://");
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Comma-separated list, blanks dropped.
pub fn parse_areas(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|area| !area.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

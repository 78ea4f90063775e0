use anyhow::Result;
use dialoguer::{Input, Select};

use super::super::domain::{
    BUSINESS_TYPES, OTHER_BUSINESS_KEY, parse_areas, validate_non_empty, validate_website,
};
use super::super::view::print_bullet;

/// Answers describing the business itself.
#[derive(Debug, Clone)]
pub struct BusinessAnswers {
    pub name: String,
    /// Key into the business type table (`other` for custom trades).
    pub type_key: String,
    /// Lower-cased trade name used in copy, e.g. `window cleaner`.
    pub trade: String,
    pub location: String,
    pub nearby_areas: Vec<String>,
    pub website: String,
}

pub fn setup_business() -> Result<BusinessAnswers> {
    let name: String = Input::new()
        .with_prompt("  What is your business name?")
        .validate_with(|input: &String| validate_non_empty("business name", input).map(|_| ()))
        .interact_text()?;

    let labels: Vec<&str> = BUSINESS_TYPES.iter().map(|t| t.name).collect();
    let choice = Select::new()
        .with_prompt("  What type of business is it?")
        .items(&labels)
        .default(0)
        .interact()?;
    let business_type = &BUSINESS_TYPES[choice];

    let trade = if business_type.key == OTHER_BUSINESS_KEY {
        let custom: String = Input::new()
            .with_prompt("  Please specify your business type")
            .validate_with(|input: &String| validate_non_empty("business type", input).map(|_| ()))
            .interact_text()?;
        custom.trim().to_lowercase()
    } else {
        business_type.name.to_lowercase()
    };

    print_bullet("Include the county so posts read naturally, e.g. \"Yeovil, Somerset\"");
    let location: String = Input::new()
        .with_prompt("  What is your business location?")
        .validate_with(|input: &String| validate_non_empty("location", input).map(|_| ()))
        .interact_text()?;

    let nearby: String = Input::new()
        .with_prompt("  List nearby areas you serve (comma-separated)")
        .allow_empty(true)
        .interact_text()?;

    let website: String = Input::new()
        .with_prompt("  What is your website URL?")
        .validate_with(|input: &String| validate_website(input).map(|_| ()))
        .interact_text()?;

    Ok(BusinessAnswers {
        name: name.trim().to_string(),
        type_key: business_type.key.to_string(),
        trade,
        location: location.trim().to_string(),
        nearby_areas: parse_areas(&nearby),
        website: validate_website(&website)?,
    })
}

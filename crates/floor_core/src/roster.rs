use shared::domain::{Company, CompanyId};

/// Exhibitors for the session, in pool order. `company-1` is the first entry.
pub const COMPANY_NAMES: [&str; 40] = [
    "Apple",
    "Google",
    "Microsoft",
    "Amazon",
    "Facebook",
    "Tesla",
    "Netflix",
    "Adobe",
    "IBM",
    "Intel",
    "Oracle",
    "Salesforce",
    "Twitter",
    "Uber",
    "Airbnb",
    "Spotify",
    "Dropbox",
    "Slack",
    "Zoom",
    "PayPal",
    "Square",
    "Stripe",
    "Shopify",
    "Twilio",
    "LinkedIn",
    "Pinterest",
    "Snapchat",
    "Reddit",
    "Yelp",
    "Lyft",
    "DoorDash",
    "Instacart",
    "Robinhood",
    "Coinbase",
    "Palantir",
    "Snowflake",
    "MongoDB",
    "Databricks",
    "Cloudflare",
    "Okta",
];

pub fn generate_companies() -> Vec<Company> {
    COMPANY_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| company(index + 1, name))
        .collect()
}

fn company(number: usize, name: &str) -> Company {
    Company {
        id: CompanyId::new(format!("company-{number}")),
        name: name.to_string(),
        symbol: name.chars().next().map(String::from).unwrap_or_default(),
    }
}

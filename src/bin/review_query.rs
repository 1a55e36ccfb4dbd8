//! Prints the list state and remote query a dashboard URL resolves to.
//!
//! Usage: `review_query <prefix> <url>`, e.g.
//! `review_query app '/applications?appPage=3&appSortBy=name'`.

use std::env;

use config::Config;
use dotenvy::dotenv;
use serde_json::json;
use validator::Validate;

use pushkind_review::domain::query::{QueryState, raw_page};
use pushkind_review::dto::remote::RemoteQueryInput;
use pushkind_review::models::config::DashboardConfig;
use pushkind_review::navigation::Location;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let [prefix, url] = args.as_slice() else {
        eprintln!("usage: review_query <prefix> <url>");
        std::process::exit(2);
    };

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default").required(false))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let dashboard_config = match settings.try_deserialize::<DashboardConfig>() {
        Ok(dashboard_config) => dashboard_config,
        Err(err) => {
            log::error!("Error loading dashboard config: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = dashboard_config.validate() {
        log::error!("Invalid dashboard config: {}", err);
        std::process::exit(1);
    }

    let Some(entity) = dashboard_config.entity(prefix) else {
        log::error!("No list is configured with prefix `{prefix}`");
        std::process::exit(1);
    };

    let location = Location::parse(url);
    let state = QueryState::read(entity, &location.query);
    let input = RemoteQueryInput::from(&state);
    log::debug!("Resolved {location} for `{prefix}`");

    let report = json!({
        "path": location.path,
        "raw_page": raw_page(&entity.prefix, &location.query),
        "state": state,
        "remote_query": input,
    });

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            log::error!("Failed to render report: {}", err);
            std::process::exit(1);
        }
    }
}

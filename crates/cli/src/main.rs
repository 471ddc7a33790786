//! `signup-cli` -- interactive signup wizard on the terminal.
//!
//! Prompts go to stdout, logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                       | Default                         | Description                         |
//! |--------------------------------|---------------------------------|-------------------------------------|
//! | `DADATA_BASE_URL`              | `https://suggestions.dadata.ru` | Suggestion service root             |
//! | `SUGGEST_DEBOUNCE_MS`          | `500`                           | Quiet period before a lookup        |
//! | `SUGGEST_MIN_QUERY_CHARS`      | `3`                             | Shorter queries are not sent        |
//! | `SUGGEST_MAX_RESULTS`          | `10`                            | Candidates per lookup               |
//! | `SUGGEST_REQUEST_TIMEOUT_SECS` | `10`                            | HTTP timeout                        |
//! | `SIGNUP_LOG_FORMAT`            | `text`                          | `json` for structured log lines     |
//!
//! Pass `--json` to print the final summary as JSON.

use std::sync::Arc;

use signup_cli::flow::{FlowOptions, Wizard};
use signup_suggest::api::DadataApi;
use signup_suggest::config::SuggestConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let json = std::env::args().skip(1).any(|arg| arg == "--json");
    let config = SuggestConfig::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        debounce_ms = config.debounce_ms,
        max_results = config.max_results,
        "Starting signup wizard",
    );

    let api = DadataApi::new(config.base_url.clone(), config.request_timeout())?;
    let options = FlowOptions::from_config(&config, json);

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut wizard = Wizard::new(input, tokio::io::stdout(), options);
    let session = wizard.run(Arc::new(api)).await?;

    tracing::info!(
        interests = session.interests.len(),
        "Signup wizard finished",
    );
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "signup_cli=info,signup_suggest=info".into());

    let structured = std::env::var("SIGNUP_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let (text_layer, json_layer) = if structured {
        (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .init();
}

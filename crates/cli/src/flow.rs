//! Line-oriented wizard over async input and output.
//!
//! Steps run in order: personal data, address (with live suggestions),
//! interests, summary. Each step keeps its own controller; only a successful
//! save writes into the [`SessionRecord`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use chrono::NaiveDate;
use signup_core::error::CoreError;
use signup_core::interests::{save_interests, INTEREST_CATALOG};
use signup_core::personal_info::PersonalInfoForm;
use signup_core::session::SessionRecord;
use signup_core::summary::Summary;
use signup_core::validation::ErrorNotice;
use signup_suggest::address::AddressStep;
use signup_suggest::config::SuggestConfig;
use signup_suggest::fetcher::FetcherConfig;
use signup_suggest::lookup::AddressLookup;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const ADDRESS_PROMPT: &str = "Address: ";
const PICK_PROMPT: &str = "Pick a number, press Enter to keep the text, or keep typing: ";

/// Knobs for a wizard run.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    pub fetcher: FetcherConfig,
    /// Longest wait for suggestions after an address line.
    pub suggestion_wait: Duration,
    /// Print the summary as JSON instead of labelled lines.
    pub json: bool,
    /// Reference date for the age check; `None` reads the local clock.
    pub today: Option<NaiveDate>,
}

impl FlowOptions {
    pub fn from_config(config: &SuggestConfig, json: bool) -> Self {
        let fetcher = config.fetcher();
        Self {
            fetcher,
            suggestion_wait: fetcher.debounce + config.request_timeout(),
            json,
            today: None,
        }
    }
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self::from_config(&SuggestConfig::default(), false)
    }
}

/// Drives the wizard over any buffered reader and writer.
pub struct Wizard<R, W> {
    input: R,
    output: W,
    options: FlowOptions,
}

impl<R, W> Wizard<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, options: FlowOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run every step and return the completed session.
    pub async fn run(&mut self, lookup: Arc<dyn AddressLookup>) -> anyhow::Result<SessionRecord> {
        let mut session = SessionRecord::new();

        self.personal_info(&mut session).await?;
        tracing::info!("Personal data saved");

        self.address(lookup, &mut session).await?;
        tracing::info!(has_address = !session.address.is_empty(), "Address saved");

        self.interests(&mut session).await?;
        tracing::info!(count = session.interests.len(), "Interests saved");

        self.summary(&session).await?;
        Ok(session)
    }

    // ---- steps ----

    async fn personal_info(&mut self, session: &mut SessionRecord) -> anyhow::Result<()> {
        let mut form = match self.options.today {
            Some(today) => PersonalInfoForm::as_of(today),
            None => PersonalInfoForm::new(),
        };
        let mut notice = ErrorNotice::new();

        self.say("== Personal data ==").await?;
        loop {
            let first_name = self.ask("First name: ").await?;
            form.on_first_name_change(first_name);
            let last_name = self.ask("Last name: ").await?;
            form.on_last_name_change(last_name);
            let birth_date = self.ask("Birth date (DD.MM.YYYY): ").await?;
            form.on_birth_date_change(birth_date);

            let shown = notice.observe(form.state());
            if let Some(message) = shown {
                self.say(&format!("! {message}")).await?;
            }

            match form.save_and_proceed(session) {
                Ok(()) => return Ok(()),
                Err(CoreError::Validation(message)) => {
                    tracing::debug!(reason = %message, "Personal data refused");
                    if shown.is_none() {
                        self.say(&format!("! {message}")).await?;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn address(
        &mut self,
        lookup: Arc<dyn AddressLookup>,
        session: &mut SessionRecord,
    ) -> anyhow::Result<()> {
        let mut step = AddressStep::new(lookup, self.options.fetcher);

        self.say("== Address ==").await?;
        let country = self.ask("Country: ").await?;
        step.on_country_change(country);
        let city = self.ask("City: ").await?;
        step.on_city_change(city);

        let entered = self.address_text(&mut step).await;
        step.shutdown().await;
        entered?;

        step.save_and_proceed(session);
        Ok(())
    }

    /// Read address edits until one is accepted or a suggestion is picked.
    ///
    /// Picks are resolved against the list last printed, not whatever the
    /// fetcher holds when the line arrives.
    async fn address_text(&mut self, step: &mut AddressStep) -> anyhow::Result<()> {
        let mut rx = step.subscribe();
        let mut shown: Vec<String> = Vec::new();
        let mut prompt = ADDRESS_PROMPT;

        loop {
            let line = self.ask(prompt).await?;
            if line.is_empty() {
                return Ok(());
            }

            if let Some(picked) = pick_from(&shown, &line) {
                step.accept_suggestion(picked.clone());
                self.say(&format!("Address: {picked}")).await?;
                return Ok(());
            }

            rx.mark_unchanged();
            step.on_address_change(line);
            match tokio::time::timeout(self.options.suggestion_wait, rx.changed()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => bail!("Suggestion channel closed"),
                Err(_) => tracing::debug!(
                    wait_ms = self.options.suggestion_wait.as_millis() as u64,
                    "No suggestions published in time",
                ),
            }

            shown = rx.borrow_and_update().clone();
            self.show_suggestions(&shown).await?;
            prompt = if shown.is_empty() {
                ADDRESS_PROMPT
            } else {
                PICK_PROMPT
            };
        }
    }

    async fn interests(&mut self, session: &mut SessionRecord) -> anyhow::Result<()> {
        let catalog = INTEREST_CATALOG
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {name}", i + 1))
            .collect::<Vec<_>>()
            .join("  ");

        self.say("== Interests ==").await?;
        self.say(&catalog).await?;
        loop {
            let line = self
                .ask("Pick interests (names or numbers, comma-separated): ")
                .await?;
            let picked = parse_interest_list(&line);

            match save_interests(session, &picked) {
                Ok(()) => return Ok(()),
                Err(CoreError::Validation(message)) => self.say(&format!("! {message}")).await?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn summary(&mut self, session: &SessionRecord) -> anyhow::Result<()> {
        let summary = Summary::from_session(session);
        if self.options.json {
            let json = summary.to_json()?;
            self.say(&json).await
        } else {
            self.say("== Summary ==").await?;
            self.output.write_all(summary.to_string().as_bytes()).await?;
            self.output.flush().await?;
            Ok(())
        }
    }

    // ---- I/O helpers ----

    async fn show_suggestions(&mut self, suggestions: &[String]) -> anyhow::Result<()> {
        if suggestions.is_empty() {
            return self.say("  (no suggestions)").await;
        }
        for (i, value) in suggestions.iter().enumerate() {
            self.say(&format!("  {}. {value}", i + 1)).await?;
        }
        Ok(())
    }

    async fn say(&mut self, line: &str) -> anyhow::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line.
    async fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            bail!("Input closed before the wizard finished");
        }
        Ok(line.trim().to_string())
    }
}

/// The displayed suggestion a 1-based number refers to.
///
/// Numbers outside the displayed list are address text, e.g. a house number.
fn pick_from<'a>(shown: &'a [String], line: &str) -> Option<&'a String> {
    let position = line.parse::<usize>().ok()?;
    shown.get(position.checked_sub(1)?)
}

/// Split a comma-separated selection, mapping catalog numbers to names.
fn parse_interest_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| INTEREST_CATALOG.get(i))
                .map_or_else(|| token.to_string(), |name| name.to_string())
        })
        .collect()
}

//! Interactive city prompt fed by the debounced search orchestrator.

use anyhow::{Context, bail};
use inquire::{Autocomplete, CustomUserError, Text, autocompletion::Replacement};
use tokio::runtime::Handle;
use weather_core::{LocationCandidate, SearchOrchestrator};

/// Suggestion source for `inquire::Text`.
///
/// inquire calls back synchronously on every edit, so each call registers the
/// input with the orchestrator and blocks on the runtime until that input has
/// settled. Must not be used from an async worker thread.
#[derive(Debug, Clone)]
pub struct CityAutocomplete {
    orchestrator: SearchOrchestrator,
    runtime: Handle,
}

impl CityAutocomplete {
    pub fn new(orchestrator: SearchOrchestrator, runtime: Handle) -> Self {
        Self {
            orchestrator,
            runtime,
        }
    }
}

impl Autocomplete for CityAutocomplete {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let orchestrator = &self.orchestrator;
        let state = self.runtime.block_on(async {
            orchestrator.input(input);
            orchestrator.settled().await
        });

        Ok(state
            .candidates()
            .iter()
            .map(LocationCandidate::label)
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

/// Ask for a city with live suggestions and return the submitted text.
pub async fn prompt_location(
    orchestrator: SearchOrchestrator,
    initial: Option<String>,
) -> anyhow::Result<String> {
    let completer = CityAutocomplete::new(orchestrator, Handle::current());

    // The prompt owns the terminal until submit; keep it off the async workers.
    let answer = tokio::task::spawn_blocking(move || {
        let mut prompt = Text::new("City:")
            .with_autocomplete(completer)
            .with_help_message("type at least two letters, tab completes the highlighted city");
        if let Some(initial) = initial.as_deref() {
            prompt = prompt.with_initial_value(initial);
        }
        prompt.prompt()
    })
    .await
    .context("Location prompt stopped unexpectedly")?
    .context("No location selected")?;

    let location = answer.trim();
    if location.is_empty() {
        bail!("Location must not be empty");
    }
    Ok(location.to_string())
}

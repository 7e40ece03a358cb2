use crate::config::Credentials;
use crate::output::{self, Tee};
use crate::prompt::Prompter;
use crate::storage::CredentialStore;
use anyhow::{Context, Result};

const TOKEN_PROMPT: &str = "GitHub personal access token";
const USERNAME_PROMPT: &str = "GitHub username";
const MAX_ATTEMPTS: usize = 3;

/// Collects token and username interactively and replaces the stored credentials.
///
/// Answers are trimmed; an empty answer is asked again up to three times.
/// The token is not checked against the API.
pub fn run_setup(
    prompter: &mut dyn Prompter,
    store: &dyn CredentialStore,
    writer: &mut Tee<'_>,
) -> Result<Credentials> {
    let token = ask(writer, || prompter.prompt_secret(TOKEN_PROMPT), "token")?;
    let username = ask(writer, || prompter.prompt_text(USERNAME_PROMPT), "username")?;

    let credentials = Credentials::new(username, token);
    store
        .save(&credentials)
        .with_context(|| format!("Failed to save credentials to {}", store.location()))?;

    tracing::info!(location = %store.location(), "credentials saved");
    output::println(
        &format!("Credentials saved to {}.", store.location()),
        writer,
    )?;
    Ok(credentials)
}

fn ask<F>(writer: &mut Tee<'_>, mut read: F, what: &str) -> Result<String>
where
    F: FnMut() -> std::io::Result<String>,
{
    for _ in 0..MAX_ATTEMPTS {
        let answer = read().with_context(|| format!("Failed to read {what}"))?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        output::eprintln(&format!("The {what} must not be empty."), writer)?;
    }
    anyhow::bail!("No {what} entered")
}

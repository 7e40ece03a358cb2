use crate::cli::parser::{self, Action, Cli};
use crate::config::{self, Credentials};
use crate::error::{AppError, ConfigError, ValidationError};
use crate::github::GitHubClient;
use crate::github::issues;
use crate::github::repos::{self, RepoTarget};
use crate::logging;
use crate::output::{self, Tee};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::setup;
use crate::storage::{CredentialStore, FileCredentialStore};

const NO_TOKEN_ADVISORY: &str =
    "GitHub token is required. Use --token or save it in the config with `repoman setup`.";

/// Parses `args` (including program name), runs the chosen action against the
/// credentials file and the terminal, and reports any failure on stderr.
///
/// Every console line is also copied into `stdout_additional` when given.
pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> Result<(), AppError> {
    let cli = match parser::parse_args(&args) {
        Ok(cli) => cli,
        Err(err) => return report_usage(err, &mut stdout_additional),
    };
    logging::init(cli.verbose);

    let result = match open_store(&cli) {
        Ok(store) => {
            let mut prompter = TerminalPrompter;
            dispatch(&cli, &store, &mut prompter, &mut stdout_additional).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        tracing::debug!(error = ?err, "action failed");
        let _ = output::eprintln(&err.to_string(), &mut stdout_additional);
        if let Some(hint) = err.hint() {
            let _ = output::eprintln(hint, &mut stdout_additional);
        }
    }
    result
}

fn open_store(cli: &Cli) -> Result<FileCredentialStore, AppError> {
    match &cli.config {
        Some(path) => Ok(FileCredentialStore::new(path)),
        None => Ok(FileCredentialStore::in_home_dir()?),
    }
}

/// Help and version requests are printed and count as success.
fn report_usage(err: clap::Error, writer: &mut Tee<'_>) -> Result<(), AppError> {
    let rendered = err.to_string();
    let rendered = rendered.trim_end();
    if err.use_stderr() {
        let _ = output::eprintln(rendered, writer);
        Err(AppError::Usage(err))
    } else {
        output::println(rendered, writer)?;
        Ok(())
    }
}

/// Runs one parsed action with injected storage and input.
pub async fn dispatch(
    cli: &Cli,
    store: &dyn CredentialStore,
    prompter: &mut dyn Prompter,
    writer: &mut Tee<'_>,
) -> Result<(), AppError> {
    tracing::info!(action = cli.action.as_str(), "dispatching");
    match cli.action {
        Action::Setup => {
            setup::run_setup(prompter, store, writer).map_err(AppError::Setup)?;
            Ok(())
        }
        Action::SetToken => save_token(cli, store, writer),
        Action::List => {
            let credentials = resolve(cli, store, writer)?;
            let client = connect(cli, &credentials)?;
            let repositories = client
                .list_repositories()
                .await
                .map_err(|e| AppError::api("Failed to fetch repositories", e))?;
            tracing::info!(count = repositories.len(), "repositories fetched");
            for repo in &repositories {
                output::println(&repos::format_repository(repo), writer)?;
            }
            Ok(())
        }
        Action::Visibility => {
            let credentials = resolve(cli, store, writer)?;
            let (Some(repo), Some(visibility)) = (cli.repo.as_deref(), cli.visibility) else {
                return Err(ValidationError::MissingVisibility.into());
            };
            let target = require_target(repo, &credentials, cli.action)?;
            let client = connect(cli, &credentials)?;
            client
                .set_visibility(&target, visibility)
                .await
                .map_err(|e| AppError::api("Failed to change visibility", e))?;
            output::println(
                &format!("Visibility of {target} has been changed to {visibility}."),
                writer,
            )?;
            Ok(())
        }
        Action::Issues => {
            let credentials = resolve(cli, store, writer)?;
            let repo = cli.repo.as_deref().ok_or(ValidationError::MissingRepo {
                action: cli.action.as_str(),
            })?;
            let target = require_target(repo, &credentials, cli.action)?;
            let client = connect(cli, &credentials)?;
            let fetched = client
                .list_issues(&target)
                .await
                .map_err(|e| AppError::api("Failed to fetch issues", e))?;
            tracing::info!(count = fetched.len(), repo = %target, "issues fetched");
            for issue in &fetched {
                output::println(&issues::format_issue(issue), writer)?;
            }
            Ok(())
        }
    }
}

/// Loads stored credentials and merges them with the flags.
fn resolve(
    cli: &Cli,
    store: &dyn CredentialStore,
    writer: &mut Tee<'_>,
) -> Result<Credentials, AppError> {
    let stored = store.load()?;
    if stored.is_none() {
        output::eprintln(
            &format!(
                "No saved credentials found at {}. Run `repoman setup` to create them.",
                store.location()
            ),
            writer,
        )?;
    }

    let credentials = config::resolve_credentials(
        stored.as_ref(),
        cli.username.as_deref(),
        cli.token.as_deref(),
        cli.precedence,
    );
    tracing::debug!(
        precedence = ?cli.precedence,
        has_username = credentials.username.is_some(),
        has_token = credentials.token.is_some(),
        "credentials resolved"
    );
    if credentials.token.is_none() {
        output::eprintln(NO_TOKEN_ADVISORY, writer)?;
    }
    Ok(credentials)
}

fn require_target(
    repo: &str,
    credentials: &Credentials,
    action: Action,
) -> Result<RepoTarget, ValidationError> {
    RepoTarget::parse(repo, credentials.username.as_deref())?.ok_or(
        ValidationError::MissingUsername {
            action: action.as_str(),
        },
    )
}

fn connect(cli: &Cli, credentials: &Credentials) -> Result<GitHubClient, AppError> {
    GitHubClient::new(&cli.api_url, credentials.token.clone())
        .map_err(|e| AppError::api("Failed to reach GitHub", e))
}

/// Stores `--token`, keeping the username already on file.
///
/// An unparsable file is replaced rather than aborting, so the token can
/// still be rotated when the config is broken.
fn save_token(cli: &Cli, store: &dyn CredentialStore, writer: &mut Tee<'_>) -> Result<(), AppError> {
    let token = cli
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(ValidationError::MissingToken)?;

    let mut credentials = match store.load() {
        Ok(stored) => stored.unwrap_or_default(),
        Err(err @ ConfigError::Parse { .. }) => {
            tracing::warn!(error = %err, "replacing unreadable config");
            output::eprintln(&format!("{err}. It will be replaced."), writer)?;
            Credentials::default()
        }
        Err(err) => return Err(err.into()),
    };
    credentials.token = Some(token.trim().to_string());
    if credentials.username.is_none() {
        credentials.username = cli.username.clone();
    }
    store.save(&credentials)?;

    output::println(
        &format!("Token saved to {}.", store.location()),
        writer,
    )?;
    Ok(())
}

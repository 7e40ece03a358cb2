use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the credentials file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the home directory; pass --config or set REPOMAN_CONFIG")]
    NoHomeDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize credentials: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// A required parameter for the chosen action is missing or malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("--repo is required for the `{action}` action.")]
    MissingRepo { action: &'static str },

    #[error("both --repo and --visibility are required for this action.")]
    MissingVisibility,

    #[error(
        "A username is required for the `{action}` action. Use --username, run `setup`, or pass --repo <owner>/<repo>."
    )]
    MissingUsername { action: &'static str },

    #[error("--token is required to save it to the config.")]
    MissingToken,

    #[error("Invalid repository format '{0}'. Please use <repo> or <owner>/<repo>.")]
    InvalidRepo(String),

    #[error("Invalid username '{0}'. Use letters, digits, '.', '_' or '-'.")]
    InvalidOwner(String),
}

/// Failures talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint} returned HTTP {status}")]
    Status { status: u16, endpoint: String },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response body from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Top-level error of a single invocation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{action}: {source}")]
    Api {
        action: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Setup failed: {0:#}")]
    Setup(anyhow::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    pub fn api(action: &'static str, source: ApiError) -> Self {
        AppError::Api { action, source }
    }

    /// Follow-up advice printed after the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Api { source, .. } if source.status() == Some(401) => {
                Some("The token was rejected. Run `repoman setup` or `repoman set-token` with a valid token.")
            }
            _ => None,
        }
    }

    /// Process exit code: 1 for usage/validation, 2 for config/API/setup.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) | AppError::Validation(_) => 1,
            AppError::Config(_)
            | AppError::Api { .. }
            | AppError::Setup(_)
            | AppError::Output(_) => 2,
        }
    }
}

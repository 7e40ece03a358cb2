use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default credentials file name, placed in the user's home directory.
pub const CONFIG_FILENAME: &str = ".github_config.yaml";
/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Username and token as persisted in the credentials file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// `github_token` is the key older versions of the tool wrote.
    #[serde(default, alias = "github_token", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            token: Some(token.into()),
        }
    }
}

/// Which source wins when both the credentials file and flags provide a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Precedence {
    /// Stored credentials win; flags only fill in missing fields.
    #[default]
    Config,
    /// Flags win; stored credentials only fill in missing fields.
    Flags,
}

/// Parses the YAML content of a credentials file.
///
/// - Returns `Ok(None)` if `content` is empty or whitespace only.
/// - Returns `Err` for malformed YAML or unknown keys.
pub fn parse_credentials(content: &[u8]) -> Result<Option<Credentials>, serde_yaml::Error> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }
    serde_yaml::from_slice(content).map(Some)
}

/// Renders credentials as the YAML document written to disk.
pub fn render_credentials(credentials: &Credentials) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(credentials)
}

/// Merges stored credentials with values given on the command line.
///
/// Resolution is field by field: the preferred source is used when it has a
/// value, otherwise the other source fills the gap.
pub fn resolve_credentials(
    stored: Option<&Credentials>,
    flag_username: Option<&str>,
    flag_token: Option<&str>,
    precedence: Precedence,
) -> Credentials {
    let stored_username = stored.and_then(|c| c.username.as_deref());
    let stored_token = stored.and_then(|c| c.token.as_deref());

    let pick = |from_file: Option<&str>, from_flag: Option<&str>| {
        let (first, second) = match precedence {
            Precedence::Config => (from_file, from_flag),
            Precedence::Flags => (from_flag, from_file),
        };
        first
            .filter(|v| !v.is_empty())
            .or(second.filter(|v| !v.is_empty()))
            .map(str::to_string)
    };

    Credentials {
        username: pick(stored_username, flag_username),
        token: pick(stored_token, flag_token),
    }
}

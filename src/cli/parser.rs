use crate::config::{self, Precedence};
use crate::github::repos::Visibility;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Enum representing CLI actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// List repositories of the authenticated user
    List,
    /// Change the visibility of a repository
    Visibility,
    /// List issues of a repository
    Issues,
    /// Prompt for a token and username and save them
    Setup,
    /// Save the token given with --token, keeping the stored username
    SetToken,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Visibility => "visibility",
            Action::Issues => "issues",
            Action::Setup => "setup",
            Action::SetToken => "set-token",
        }
    }
}

/// GitHub repository manager
#[derive(Debug, Parser)]
#[command(name = "repoman", version)]
pub struct Cli {
    /// Action to perform
    #[arg(value_enum)]
    pub action: Action,

    /// GitHub personal access token
    #[arg(long)]
    pub token: Option<String>,

    /// GitHub username, used as the owner of --repo
    #[arg(long)]
    pub username: Option<String>,

    /// Repository name, either <repo> or <owner>/<repo> (visibility and issues)
    #[arg(long)]
    pub repo: Option<String>,

    /// Visibility to set
    #[arg(long, value_enum)]
    pub visibility: Option<Visibility>,

    /// Whether stored credentials or flags win when both are present
    #[arg(long, value_enum, env = "REPOMAN_PRECEDENCE", default_value_t = Precedence::Config)]
    pub precedence: Precedence,

    /// Credentials file [default: ~/.github_config.yaml]
    #[arg(long, env = "REPOMAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// REST API base URL
    #[arg(long, env = "REPOMAN_API_URL", default_value = config::DEFAULT_API_URL)]
    pub api_url: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments (including program name)
pub fn parse_args(args: &[String]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

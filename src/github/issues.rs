use serde::Deserialize;
use std::fmt;

/// An entry of `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GitHubIssue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Console line for one issue.
pub fn format_issue(issue: &GitHubIssue) -> String {
    format!(
        "Issue #{}: {} (State: {})",
        issue.number, issue.title, issue.state
    )
}

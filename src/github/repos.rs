use crate::error::ValidationError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository access scope that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility as reported by the API, which may be a value this tool
/// cannot request (e.g. `internal` on GitHub Enterprise).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReportedVisibility {
    Known(Visibility),
    Other(String),
}

impl fmt::Display for ReportedVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportedVisibility::Known(v) => fmt::Display::fmt(v, f),
            ReportedVisibility::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<Visibility> for ReportedVisibility {
    fn from(visibility: Visibility) -> Self {
        ReportedVisibility::Known(visibility)
    }
}

/// An entry of `GET /user/repos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub visibility: ReportedVisibility,
}

/// Console line for one repository.
pub fn format_repository(repo: &Repository) -> String {
    format!("{} - {}", repo.name, repo.visibility)
}

/// `owner/name` pair addressed by the per-repository endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub name: String,
}

impl RepoTarget {
    /// Parses `--repo`, which is either `<repo>` or `<owner>/<repo>`.
    ///
    /// Both segments become URL path segments, so each must be made of
    /// `[A-Za-z0-9._-]` and must not be `.` or `..`.
    /// Returns `Ok(None)` for a bare name when no `default_owner` is known.
    pub fn parse(repo: &str, default_owner: Option<&str>) -> Result<Option<Self>, ValidationError> {
        let invalid = || ValidationError::InvalidRepo(repo.to_string());
        let repo_trimmed = repo.trim();

        let (owner, name) = match repo_trimmed.split_once('/') {
            Some((owner, name)) => {
                if !is_path_segment(owner) {
                    return Err(invalid());
                }
                (owner, name)
            }
            None => match default_owner.filter(|o| !o.is_empty()) {
                Some(owner) => {
                    if !is_path_segment(owner) {
                        return Err(ValidationError::InvalidOwner(owner.to_string()));
                    }
                    (owner, repo_trimmed)
                }
                None => {
                    if !is_path_segment(repo_trimmed) {
                        return Err(invalid());
                    }
                    return Ok(None);
                }
            },
        };
        if !is_path_segment(name) {
            return Err(invalid());
        }

        Ok(Some(RepoTarget {
            owner: owner.to_string(),
            name: name.to_string(),
        }))
    }

    /// API path `/repos/{owner}/{name}`.
    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

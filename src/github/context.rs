//! Repository context and identity wrappers for the runner environment.

use std::fmt;

use url::Url;

use crate::error::BotError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner segment is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `BotError::InvalidRepository` when the segment is empty.
    pub fn new(value: &str) -> Result<Self, BotError> {
        if value.is_empty() {
            return Err(BotError::InvalidRepository {
                value: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the repository segment is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `BotError::InvalidRepository` when the segment is empty.
    pub fn new(value: &str) -> Result<Self, BotError> {
        if value.is_empty() {
            return Err(BotError::InvalidRepository {
                value: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Commit SHA the check runs are attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSha(String);

impl CommitSha {
    /// Wraps a commit SHA string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the SHA value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns `BotError::InvalidPullRequestNumber` when the value is zero.
    pub const fn new(value: u64) -> Result<Self, BotError> {
        if value == 0 {
            return Err(BotError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Authentication token wrapper enforcing presence.
///
/// The token value is deliberately excluded from `Debug` output so it can
/// never leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `BotError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, BotError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BotError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

/// Immutable repository coordinates for one bot run.
///
/// Resolved once per process from the runner environment and shared by every
/// remote operation. The pull request number is absent for non-pull-request
/// triggers; pull-request-scoped operations fail with
/// [`BotError::NoPullRequest`] in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    sha: CommitSha,
    git_ref: String,
    pull_request: Option<PullRequestNumber>,
}

impl RepoContext {
    /// Assembles a context from already-validated parts.
    #[must_use]
    pub fn new(
        api_base: Url,
        owner: RepositoryOwner,
        repository: RepositoryName,
        sha: CommitSha,
        git_ref: impl Into<String>,
        pull_request: Option<PullRequestNumber>,
    ) -> Self {
        Self {
            api_base,
            owner,
            repository,
            sha,
            git_ref: git_ref.into(),
            pull_request,
        }
    }

    /// API base URL for the hosting service.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Commit SHA the trigger ran against.
    #[must_use]
    pub const fn sha(&self) -> &CommitSha {
        &self.sha
    }

    /// Fully qualified git ref of the trigger.
    #[must_use]
    pub const fn git_ref(&self) -> &str {
        self.git_ref.as_str()
    }

    /// Pull request number, when the trigger carries one.
    #[must_use]
    pub const fn pull_request(&self) -> Option<PullRequestNumber> {
        self.pull_request
    }
}

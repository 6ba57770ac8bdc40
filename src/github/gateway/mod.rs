//! Gateways for the remote operations the bot consumes.
//!
//! Each trait covers one concern of the hosting API: page-scoped pull
//! request listings, check-run lifecycle calls, and repository content
//! retrieval. The trait-based design enables mocking in tests while the
//! Octocrab implementations handle real HTTP requests.

mod checks;
mod client;
mod contents;
mod error_mapping;
mod pull_request;

pub use checks::OctocrabChecksGateway;
pub use contents::OctocrabContentsGateway;
pub use pull_request::OctocrabPullRequestGateway;

pub(crate) use client::build_octocrab_client;

use async_trait::async_trait;

use crate::error::BotError;
use crate::github::context::{PullRequestNumber, RepoContext};
use crate::github::models::{
    ChangedFile, CheckConclusion, CheckRun, CheckRunId, CheckRunOutput, Review,
};

/// Gateway for page-scoped pull request listings.
///
/// Implementations fetch exactly one page per call; aggregation across pages
/// belongs to [`crate::github::pagination::drain_pages`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch one page of files changed by the pull request.
    async fn changed_files_page(
        &self,
        context: &RepoContext,
        number: PullRequestNumber,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<ChangedFile>, BotError>;

    /// Fetch one page of submitted reviews for the pull request.
    async fn reviews_page(
        &self,
        context: &RepoContext,
        number: PullRequestNumber,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Review>, BotError>;
}

/// Gateway for the check-run lifecycle operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChecksGateway: Send + Sync {
    /// Open a check run named after the approval group, in progress, against
    /// the context's commit SHA.
    async fn create_check_run(
        &self,
        context: &RepoContext,
        name: &str,
    ) -> Result<CheckRun, BotError>;

    /// Complete an existing check run with the given conclusion and output.
    async fn update_check_run(
        &self,
        context: &RepoContext,
        id: CheckRunId,
        conclusion: CheckConclusion,
        output: &CheckRunOutput,
    ) -> Result<CheckRun, BotError>;
}

/// Gateway for retrieving repository file content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentsGateway: Send + Sync {
    /// Fetch the decoded text content of the file at `path`, scoped to the
    /// context's repository and ref.
    async fn file_content(&self, context: &RepoContext, path: &str) -> Result<String, BotError>;
}

//! Pull-request-scoped collection intake used by the entry point.

use crate::error::BotError;
use crate::github::context::{PullRequestNumber, RepoContext};
use crate::github::gateway::PullRequestGateway;
use crate::github::models::{ChangedFile, Review};
use crate::github::pagination::{PER_PAGE, drain_pages};

/// Aggregates the changed files and submitted reviews of a pull request.
///
/// Both collections share the same pagination contract; only the remote
/// listing operation and item shape differ. Operations fail with
/// [`BotError::NoPullRequest`] before any request is issued when the context
/// carries no pull-request number.
pub struct PullRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    client: &'client Gateway,
    context: &'client RepoContext,
}

impl<'client, Gateway> PullRequestIntake<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Create a new intake facade over the provided gateway and context.
    #[must_use]
    pub const fn new(client: &'client Gateway, context: &'client RepoContext) -> Self {
        Self { client, context }
    }

    /// Fetch the paths of every file changed by the pull request, in the
    /// order the remote service returns them.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::NoPullRequest`] outside a pull request trigger,
    /// or the first gateway failure otherwise.
    pub async fn changed_files(&self) -> Result<Vec<ChangedFile>, BotError> {
        let number = self.require_pull_request()?;
        drain_pages(PER_PAGE, async |page, per_page| {
            self.client
                .changed_files_page(self.context, number, page, per_page)
                .await
        })
        .await
    }

    /// Fetch every submitted review of the pull request, in submission order
    /// as returned by the remote service.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::NoPullRequest`] outside a pull request trigger,
    /// or the first gateway failure otherwise.
    pub async fn reviews(&self) -> Result<Vec<Review>, BotError> {
        let number = self.require_pull_request()?;
        drain_pages(PER_PAGE, async |page, per_page| {
            self.client
                .reviews_page(self.context, number, page, per_page)
                .await
        })
        .await
    }

    fn require_pull_request(&self) -> Result<PullRequestNumber, BotError> {
        self.context.pull_request().ok_or(BotError::NoPullRequest)
    }
}

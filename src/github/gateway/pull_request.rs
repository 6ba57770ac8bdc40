//! Octocrab implementation of the page-scoped pull request listings.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::error::BotError;
use crate::github::context::{AccessToken, PullRequestNumber, RepoContext};
use crate::github::models::{ApiPullRequestFile, ApiReview, ChangedFile, Review};

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Octocrab-backed pull request gateway.
pub struct OctocrabPullRequestGateway {
    client: Octocrab,
}

impl OctocrabPullRequestGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns `BotError::InvalidUrl` when the base URI cannot be parsed or
    /// `BotError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &AccessToken, api_base: &str) -> Result<Self, BotError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }
}

fn files_path(context: &RepoContext, number: PullRequestNumber) -> String {
    format!(
        "/repos/{}/{}/pulls/{}/files",
        context.owner().as_str(),
        context.repository().as_str(),
        number.get()
    )
}

fn reviews_path(context: &RepoContext, number: PullRequestNumber) -> String {
    format!(
        "/repos/{}/{}/pulls/{}/reviews",
        context.owner().as_str(),
        context.repository().as_str(),
        number.get()
    )
}

fn page_query(page: u32, per_page: u8) -> [(&'static str, String); 2] {
    [
        ("page", page.to_string()),
        ("per_page", per_page.to_string()),
    ]
}

#[async_trait]
impl PullRequestGateway for OctocrabPullRequestGateway {
    async fn changed_files_page(
        &self,
        context: &RepoContext,
        number: PullRequestNumber,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<ChangedFile>, BotError> {
        let files: Vec<ApiPullRequestFile> = self
            .client
            .get(
                files_path(context, number),
                Some(&page_query(page, per_page)),
            )
            .await
            .map_err(|error| map_octocrab_error("list pull request files", &error))?;

        Ok(files.into_iter().map(Into::into).collect())
    }

    async fn reviews_page(
        &self,
        context: &RepoContext,
        number: PullRequestNumber,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Review>, BotError> {
        let reviews: Vec<ApiReview> = self
            .client
            .get(
                reviews_path(context, number),
                Some(&page_query(page, per_page)),
            )
            .await
            .map_err(|error| map_octocrab_error("list pull request reviews", &error))?;

        Ok(reviews.into_iter().map(Into::into).collect())
    }
}

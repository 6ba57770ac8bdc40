//! Octocrab implementation of repository content retrieval.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::Octocrab;

use crate::error::BotError;
use crate::github::context::{AccessToken, RepoContext};

use super::ContentsGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Octocrab-backed contents gateway.
pub struct OctocrabContentsGateway {
    client: Octocrab,
}

impl OctocrabContentsGateway {
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

/// Maps content-lookup failures, folding 404 into `ConfigNotFound` so callers
/// can distinguish a missing document from other API failures.
fn map_content_error(path: &str, error: &octocrab::Error) -> BotError {
    match error {
        octocrab::Error::GitHub { source, .. } if source.status_code == StatusCode::NOT_FOUND => {
            BotError::ConfigNotFound {
                message: format!("`{path}`: {message}", message = source.message),
            }
        }
        _ => map_octocrab_error("get content", error),
    }
}

#[async_trait]
impl ContentsGateway for OctocrabContentsGateway {
    async fn file_content(&self, context: &RepoContext, path: &str) -> Result<String, BotError> {
        let contents = self
            .client
            .repos(
                context.owner().as_str().to_owned(),
                context.repository().as_str().to_owned(),
            )
            .get_content()
            .path(path)
            .r#ref(context.git_ref())
            .send()
            .await
            .map_err(|error| map_content_error(path, &error))?;

        let item = contents
            .items
            .into_iter()
            .next()
            .ok_or_else(|| BotError::ConfigNotFound {
                message: format!("no content returned for `{path}`"),
            })?;

        item.decoded_content().ok_or_else(|| BotError::ConfigNotFound {
            message: format!("`{path}` has no decodable content"),
        })
    }
}

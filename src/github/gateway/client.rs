//! Octocrab client construction shared by gateway implementations and the
//! process runtime.

use http::Uri;
use octocrab::Octocrab;

use crate::error::BotError;
use crate::github::context::AccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `BotError::InvalidUrl` when the base URI cannot be parsed or
/// `BotError::Api` when Octocrab fails to construct a client.
pub(crate) fn build_octocrab_client(
    token: &AccessToken,
    api_base: &str,
) -> Result<Octocrab, BotError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| BotError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| BotError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

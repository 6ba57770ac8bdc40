//! Error types surfaced by the approval-check layer.

use thiserror::Error;

/// Errors surfaced while resolving runner context, talking to GitHub, or
/// driving check-run state.
///
/// The bot is fail-fast: no variant is retried internally, and every failure
/// propagates unchanged to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BotError {
    /// A pull-request-scoped operation was invoked outside a pull request
    /// trigger.
    #[error("no pull request in the trigger context")]
    NoPullRequest,

    /// A check run was resolved for a group that was never created.
    #[error("no check run was created for group `{group}`")]
    UnknownGroup {
        /// Name of the approval group.
        group: String,
    },

    /// A check run was resolved a second time.
    #[error("check run for group `{group}` is already resolved")]
    AlreadyResolved {
        /// Name of the approval group.
        group: String,
    },

    /// A check run was created twice for the same group.
    #[error("a check run already exists for group `{group}`")]
    DuplicateGroup {
        /// Name of the approval group.
        group: String,
    },

    /// The approval-group configuration could not be retrieved.
    #[error("approval configuration not found: {message}")]
    ConfigNotFound {
        /// Detail from the failed content lookup.
        message: String,
    },

    /// The external parser rejected the configuration document.
    #[error("approval configuration could not be parsed: {message}")]
    ConfigParse {
        /// Detail reported by the parser.
        message: String,
    },

    /// The authentication token input was missing or blank.
    #[error("authentication token is required")]
    MissingToken,

    /// A required runner variable was not set.
    #[error("runner variable `{name}` is not set")]
    MissingVariable {
        /// Name of the missing environment variable.
        name: String,
    },

    /// A required action input was not supplied.
    #[error("action input `{name}` is not set")]
    MissingInput {
        /// Name of the missing action input.
        name: String,
    },

    /// The runner-supplied repository slug was not `owner/repo`.
    #[error("repository must be `owner/repo`, got `{value}`")]
    InvalidRepository {
        /// The malformed slug.
        value: String,
    },

    /// The pull request number in the event payload was not positive.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The trigger event payload could not be read or decoded.
    #[error("event payload is invalid: {message}")]
    InvalidEventPayload {
        /// Detail from the read or decode failure.
        message: String,
    },

    /// A URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// GitHub rejected the supplied credential.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}

//! Data access and status reporting for a pull-request approval bot.
//!
//! The crate covers the plumbing between a GitHub Actions trigger and an
//! external approval-policy evaluator:
//!
//! - [`runtime`] resolves the runner environment (repository coordinates,
//!   credential, config path, client handle) once per process and memoizes
//!   each value.
//! - [`github`] wraps Octocrab behind narrow gateway traits, aggregates
//!   paginated pull request collections, and maps remote failures into
//!   [`BotError`].
//! - [`config`] retrieves the approval-group configuration document from the
//!   repository tree and hands it to an external parser.
//! - [`checks`] drives one check run per approval group from `in_progress`
//!   to `completed`.
//!
//! Deciding whether a group's approval requirements are met is out of scope;
//! callers combine these components with their own policy evaluation.

pub mod checks;
pub mod config;
pub mod error;
pub mod github;
pub mod runtime;

pub use checks::{CheckRunRegistry, GroupCheckRun};
pub use config::{ApprovalConfig, ConfigLoader, ConfigParser, GroupRules, ParseRejection};
pub use error::BotError;
pub use github::{
    AccessToken, ChangedFile, CheckConclusion, CheckRun, CheckRunId, CheckRunOutput, CheckStatus,
    ChecksGateway, CommitSha, ContentsGateway, OctocrabChecksGateway, OctocrabContentsGateway,
    OctocrabPullRequestGateway, PullRequestGateway, PullRequestIntake, PullRequestNumber,
    RepoContext, RepositoryName, RepositoryOwner, Review,
};
pub use runtime::{ActionRuntime, ProcessEnv, RunnerEnv};

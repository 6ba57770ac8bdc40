//! GitHub data access for the approval-check bot.
//!
//! This module wraps Octocrab behind narrow gateway traits, aggregates
//! paginated pull request collections, and maps failures into the typed
//! variants of [`crate::error::BotError`] so that callers never see Octocrab
//! internals.

pub mod context;
pub mod gateway;
pub mod intake;
pub mod models;
pub mod pagination;

pub use context::{
    AccessToken, CommitSha, PullRequestNumber, RepoContext, RepositoryName, RepositoryOwner,
};
pub use gateway::{
    ChecksGateway, ContentsGateway, OctocrabChecksGateway, OctocrabContentsGateway,
    OctocrabPullRequestGateway, PullRequestGateway,
};
pub use intake::PullRequestIntake;
pub use models::{
    ChangedFile, CheckConclusion, CheckRun, CheckRunId, CheckRunOutput, CheckStatus, Review,
};

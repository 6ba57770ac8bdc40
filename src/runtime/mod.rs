//! Lazily-resolved, memoized process context for one bot run.
//!
//! The GitHub Actions runner supplies repository coordinates through
//! `GITHUB_*` variables, action inputs through `INPUT_*` variables, and the
//! trigger payload through a JSON file. [`ActionRuntime`] resolves each of
//! the four process-wide values (repository context, credential, config
//! path, client handle) from that environment on first access and memoizes
//! it for the lifetime of the process.

use once_cell::sync::OnceCell;
use octocrab::Octocrab;
use serde::Deserialize;
use url::Url;

use crate::error::BotError;
use crate::github::context::{
    AccessToken, CommitSha, PullRequestNumber, RepoContext, RepositoryName, RepositoryOwner,
};
use crate::github::gateway::build_octocrab_client;

const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
const SHA_VAR: &str = "GITHUB_SHA";
const REF_VAR: &str = "GITHUB_REF";
const API_URL_VAR: &str = "GITHUB_API_URL";
const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";
const TOKEN_INPUT_VAR: &str = "INPUT_TOKEN";
const CONFIG_INPUT_VAR: &str = "INPUT_CONFIG";

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Source of runner-provided variables and files.
///
/// The process implementation reads the real environment; tests substitute
/// an in-memory fake to observe how often each value is resolved.
pub trait RunnerEnv {
    /// Returns the value of an environment variable, if set.
    fn var(&self, name: &str) -> Option<String>;

    /// Reads the file at `path` to a string.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O failure.
    fn read_file(&self, path: &str) -> std::io::Result<String>;
}

/// [`RunnerEnv`] backed by the real process environment and filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl RunnerEnv for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn read_file(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[derive(Debug, Deserialize)]
struct ApiEventPullRequest {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct ApiEventPayload {
    pull_request: Option<ApiEventPullRequest>,
}

fn required_var<Env: RunnerEnv>(env: &Env, name: &str) -> Result<String, BotError> {
    env.var(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| BotError::MissingVariable {
            name: name.to_owned(),
        })
}

/// Extracts the pull-request number from the trigger event payload.
///
/// Non-pull-request triggers carry no `pull_request` object; that is valid
/// and yields `None`. A missing event path likewise yields `None`.
fn pull_request_from_event<Env: RunnerEnv>(
    env: &Env,
) -> Result<Option<PullRequestNumber>, BotError> {
    let Some(path) = env.var(EVENT_PATH_VAR).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    let payload = env
        .read_file(&path)
        .map_err(|error| BotError::InvalidEventPayload {
            message: error.to_string(),
        })?;
    let event: ApiEventPayload =
        serde_json::from_str(&payload).map_err(|error| BotError::InvalidEventPayload {
            message: error.to_string(),
        })?;

    event
        .pull_request
        .map(|pull_request| PullRequestNumber::new(pull_request.number))
        .transpose()
}

fn resolve_context<Env: RunnerEnv>(env: &Env) -> Result<RepoContext, BotError> {
    let slug = required_var(env, REPOSITORY_VAR)?;
    let (owner_segment, repo_segment) =
        slug.split_once('/').ok_or_else(|| BotError::InvalidRepository {
            value: slug.clone(),
        })?;
    let owner = RepositoryOwner::new(owner_segment)?;
    let repository = RepositoryName::new(repo_segment)?;

    let sha = CommitSha::new(required_var(env, SHA_VAR)?);
    let git_ref = required_var(env, REF_VAR)?;

    let api_base_raw = env
        .var(API_URL_VAR)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());
    let api_base =
        Url::parse(&api_base_raw).map_err(|error| BotError::InvalidUrl(error.to_string()))?;

    let pull_request = pull_request_from_event(env)?;

    Ok(RepoContext::new(
        api_base,
        owner,
        repository,
        sha,
        git_ref,
        pull_request,
    ))
}

/// Lazily-initialized, memoized process context.
///
/// Each accessor computes its value from the runner environment on first
/// access and returns the identical cached value on every later call; the
/// underlying source is never re-read. All four values are immutable for
/// the lifetime of the runtime.
pub struct ActionRuntime<Env: RunnerEnv> {
    env: Env,
    context: OnceCell<RepoContext>,
    token: OnceCell<AccessToken>,
    config_path: OnceCell<String>,
    client: OnceCell<Octocrab>,
}

impl ActionRuntime<ProcessEnv> {
    /// Creates a runtime over the real process environment.
    #[must_use]
    pub const fn from_process_env() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<Env: RunnerEnv> ActionRuntime<Env> {
    /// Creates a runtime over the given environment source.
    #[must_use]
    pub const fn new(env: Env) -> Self {
        Self {
            env,
            context: OnceCell::new(),
            token: OnceCell::new(),
            config_path: OnceCell::new(),
            client: OnceCell::new(),
        }
    }

    /// Repository context of the trigger, resolved once.
    ///
    /// # Errors
    ///
    /// Returns `BotError::MissingVariable`, `BotError::InvalidRepository`,
    /// `BotError::InvalidUrl`, or `BotError::InvalidEventPayload` when the
    /// runner environment is incomplete or malformed.
    pub fn context(&self) -> Result<&RepoContext, BotError> {
        self.context.get_or_try_init(|| resolve_context(&self.env))
    }

    /// Authentication credential, resolved once and never logged.
    ///
    /// # Errors
    ///
    /// Returns `BotError::MissingToken` when the token input is absent or
    /// blank.
    pub fn token(&self) -> Result<&AccessToken, BotError> {
        self.token.get_or_try_init(|| {
            let raw = self.env.var(TOKEN_INPUT_VAR).ok_or(BotError::MissingToken)?;
            AccessToken::new(raw)
        })
    }

    /// Repository-relative path of the approval configuration, resolved
    /// once.
    ///
    /// # Errors
    ///
    /// Returns `BotError::MissingInput` when the config input is absent or
    /// blank.
    pub fn config_path(&self) -> Result<&str, BotError> {
        self.config_path
            .get_or_try_init(|| {
                self.env
                    .var(CONFIG_INPUT_VAR)
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| BotError::MissingInput {
                        name: "config".to_owned(),
                    })
            })
            .map(String::as_str)
    }

    /// Authenticated remote client handle, constructed once from the
    /// credential and the context's API base and reused for every call.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`Self::token`] and [`Self::context`], or
    /// returns `BotError::Api` when client construction fails.
    pub fn client(&self) -> Result<&Octocrab, BotError> {
        self.client.get_or_try_init(|| {
            let token = self.token()?;
            let api_base = self.context()?.api_base().as_str().to_owned();
            build_octocrab_client(token, &api_base)
        })
    }
}

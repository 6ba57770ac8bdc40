//! Octocrab implementation of the check-run lifecycle operations.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::error::BotError;
use crate::github::context::{AccessToken, RepoContext};
use crate::github::models::{
    ApiCheckRun, CheckConclusion, CheckRun, CheckRunId, CheckRunOutput, CheckStatus,
};

use super::ChecksGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Octocrab-backed checks gateway.
pub struct OctocrabChecksGateway {
    client: Octocrab,
}

impl OctocrabChecksGateway {
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

fn check_runs_path(context: &RepoContext) -> String {
    format!(
        "/repos/{}/{}/check-runs",
        context.owner().as_str(),
        context.repository().as_str()
    )
}

#[async_trait]
impl ChecksGateway for OctocrabChecksGateway {
    async fn create_check_run(
        &self,
        context: &RepoContext,
        name: &str,
    ) -> Result<CheckRun, BotError> {
        let body = serde_json::json!({
            "name": name,
            "head_sha": context.sha().as_str(),
            "status": CheckStatus::InProgress.as_str(),
            "output": {
                "title": name,
                "summary": "",
            },
        });

        let created: ApiCheckRun = self
            .client
            .post(check_runs_path(context), Some(&body))
            .await
            .map_err(|error| map_octocrab_error("create check run", &error))?;

        Ok(created.into())
    }

    async fn update_check_run(
        &self,
        context: &RepoContext,
        id: CheckRunId,
        conclusion: CheckConclusion,
        output: &CheckRunOutput,
    ) -> Result<CheckRun, BotError> {
        let route = format!("{}/{}", check_runs_path(context), id.get());
        let body = serde_json::json!({
            "status": CheckStatus::Completed.as_str(),
            "conclusion": conclusion.as_str(),
            "output": {
                "title": output.title,
                "summary": output.summary,
                "text": output.text,
            },
        });

        let updated: ApiCheckRun = self
            .client
            .patch(route, Some(&body))
            .await
            .map_err(|error| map_octocrab_error("update check run", &error))?;

        Ok(updated.into())
    }
}

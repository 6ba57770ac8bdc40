//! Check-run lifecycle management, one run per approval group.
//!
//! The registry is the exclusive owner of the group-to-check-run mapping.
//! Other components interact with it only through group-scoped `create` and
//! `resolve` calls; the mapping itself is never handed out mutably.

use std::collections::HashMap;

use crate::error::BotError;
use crate::github::context::RepoContext;
use crate::github::gateway::ChecksGateway;
use crate::github::models::{CheckConclusion, CheckRunId, CheckRunOutput, CheckStatus};

/// Local record of the check run opened for one approval group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCheckRun {
    id: CheckRunId,
    url: Option<String>,
    html_url: Option<String>,
    status: CheckStatus,
    conclusion: Option<CheckConclusion>,
}

impl GroupCheckRun {
    /// Remote identifier, assigned at creation and never reassigned.
    #[must_use]
    pub const fn id(&self) -> CheckRunId {
        self.id
    }

    /// API URL of the check run, when the remote service returned one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Browser URL of the check run, when the remote service returned one.
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        self.html_url.as_deref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> CheckStatus {
        self.status
    }

    /// Conclusion, set exactly once at resolution.
    #[must_use]
    pub const fn conclusion(&self) -> Option<CheckConclusion> {
        self.conclusion
    }
}

/// Output block announcing a group's approval verdict.
fn approval_output(group: &str) -> CheckRunOutput {
    let message = format!("{group} Approvals.");
    CheckRunOutput {
        title: message.clone(),
        summary: message.clone(),
        text: Some(message),
    }
}

/// Drives the open/resolve lifecycle of one remote check run per approval
/// group.
///
/// Check runs transition `in_progress` to `completed` exactly once. Local
/// state is only updated after the corresponding remote call succeeds, so a
/// failed resolution leaves the entry open and resolvable again.
pub struct CheckRunRegistry<'client, Gateway>
where
    Gateway: ChecksGateway,
{
    client: &'client Gateway,
    context: &'client RepoContext,
    runs: HashMap<String, GroupCheckRun>,
}

impl<'client, Gateway> CheckRunRegistry<'client, Gateway>
where
    Gateway: ChecksGateway,
{
    /// Creates an empty registry over the provided gateway and context.
    #[must_use]
    pub fn new(client: &'client Gateway, context: &'client RepoContext) -> Self {
        Self {
            client,
            context,
            runs: HashMap::new(),
        }
    }

    /// Opens an `in_progress` check run named after the group, against the
    /// context's commit SHA.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::DuplicateGroup`] when a check run already exists
    /// for `group` (duplicate creation is a programming error, not a
    /// transient condition), or the gateway failure otherwise.
    pub async fn create(&mut self, group: &str) -> Result<(), BotError> {
        if self.runs.contains_key(group) {
            return Err(BotError::DuplicateGroup {
                group: group.to_owned(),
            });
        }

        tracing::info!(group, "creating check run");
        let created = self.client.create_check_run(self.context, group).await?;
        tracing::info!(
            group,
            id = created.id.get(),
            url = created.url.as_deref(),
            html_url = created.html_url.as_deref(),
            "check run created"
        );

        self.runs.insert(
            group.to_owned(),
            GroupCheckRun {
                id: created.id,
                url: created.url,
                html_url: created.html_url,
                status: CheckStatus::InProgress,
                conclusion: None,
            },
        );
        Ok(())
    }

    /// Completes the group's check run with the given conclusion.
    ///
    /// The local entry flips to `completed` only after the remote update
    /// succeeds; on failure it stays `in_progress` and the remote check run
    /// is left open.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::UnknownGroup`] when no check run was created for
    /// `group`, [`BotError::AlreadyResolved`] when the run is already
    /// completed, or the gateway failure otherwise.
    pub async fn resolve(
        &mut self,
        group: &str,
        conclusion: CheckConclusion,
    ) -> Result<(), BotError> {
        let id = match self.runs.get(group) {
            None => {
                return Err(BotError::UnknownGroup {
                    group: group.to_owned(),
                });
            }
            Some(run) if run.status == CheckStatus::Completed => {
                return Err(BotError::AlreadyResolved {
                    group: group.to_owned(),
                });
            }
            Some(run) => run.id,
        };

        let output = approval_output(group);
        let updated = self
            .client
            .update_check_run(self.context, id, conclusion, &output)
            .await?;
        tracing::info!(
            group,
            conclusion = conclusion.as_str(),
            url = updated.url.as_deref(),
            html_url = updated.html_url.as_deref(),
            "check run resolved"
        );

        if let Some(run) = self.runs.get_mut(group) {
            run.status = CheckStatus::Completed;
            run.conclusion = Some(conclusion);
        }
        Ok(())
    }

    /// Read-only view of the group's check run, if one was created.
    #[must_use]
    pub fn get(&self, group: &str) -> Option<&GroupCheckRun> {
        self.runs.get(group)
    }

    /// Number of check runs created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether any check run has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

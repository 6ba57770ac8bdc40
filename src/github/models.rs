//! Data models for pull request contents, reviews, and check runs.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use serde::Deserialize;

/// A file touched by the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Repository-relative path of the file.
    pub path: String,
}

/// A submitted pull request review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Review {
    /// Review identifier.
    pub id: u64,
    /// Reviewer login.
    pub author: Option<String>,
    /// Review state (e.g. `APPROVED`, `CHANGES_REQUESTED`).
    pub state: Option<String>,
    /// Review body text.
    pub body: Option<String>,
    /// Commit SHA the review was submitted against.
    pub commit_sha: Option<String>,
    /// Submission timestamp (ISO 8601 format).
    pub submitted_at: Option<String>,
}

/// Remote check run identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckRunId(u64);

impl CheckRunId {
    /// Wraps a remote check run identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Check run record returned by the create and update operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRun {
    /// Remote identifier assigned at creation.
    pub id: CheckRunId,
    /// API URL of the check run.
    pub url: Option<String>,
    /// Browser URL of the check run.
    pub html_url: Option<String>,
}

/// Lifecycle state of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// The check run is open and awaiting a conclusion.
    InProgress,
    /// The check run has been resolved.
    Completed,
}

impl CheckStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Terminal conclusion of a resolved check run.
///
/// ```
/// use groupcheck::github::models::CheckConclusion;
///
/// assert_eq!(CheckConclusion::Success.as_str(), "success");
/// assert_eq!(CheckConclusion::Failure.as_str(), "failure");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckConclusion {
    /// The group's approval policy is satisfied.
    Success,
    /// The group's approval policy is not satisfied.
    Failure,
}

impl CheckConclusion {
    /// Wire representation of the conclusion.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// Output block attached to a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRunOutput {
    /// Output title.
    pub title: String,
    /// Output summary.
    pub summary: String,
    /// Optional detail text.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestFile {
    pub(super) filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiReview {
    pub(super) id: u64,
    pub(super) user: Option<ApiUser>,
    pub(super) state: Option<String>,
    pub(super) body: Option<String>,
    pub(super) commit_id: Option<String>,
    pub(super) submitted_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCheckRun {
    pub(super) id: u64,
    pub(super) url: Option<String>,
    pub(super) html_url: Option<String>,
}

impl From<ApiPullRequestFile> for ChangedFile {
    fn from(value: ApiPullRequestFile) -> Self {
        Self {
            path: value.filename,
        }
    }
}

impl From<ApiReview> for Review {
    fn from(value: ApiReview) -> Self {
        Self {
            id: value.id,
            author: value.user.and_then(|user| user.login),
            state: value.state,
            body: value.body,
            commit_sha: value.commit_id,
            submitted_at: value.submitted_at,
        }
    }
}

impl From<ApiCheckRun> for CheckRun {
    fn from(value: ApiCheckRun) -> Self {
        Self {
            id: CheckRunId::new(value.id),
            url: value.url,
            html_url: value.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ApiCheckRun, ApiPullRequestFile, ApiReview, ChangedFile, CheckRun, Review};

    #[test]
    fn api_review_converts_into_review() {
        let value = json!({
            "id": 80,
            "user": { "login": "alice" },
            "state": "APPROVED",
            "body": "Looks good.",
            "commit_id": "abc123",
            "submitted_at": "2025-01-01T00:00:00Z"
        });

        let api: ApiReview = serde_json::from_value(value).expect("review should deserialise");
        let review: Review = api.into();
        assert_eq!(review.id, 80);
        assert_eq!(review.author.as_deref(), Some("alice"));
        assert_eq!(review.state.as_deref(), Some("APPROVED"));
        assert_eq!(review.commit_sha.as_deref(), Some("abc123"));
    }

    #[rstest]
    #[case::all_optional_fields_null(json!({
        "id": 81,
        "user": null,
        "state": null,
        "body": null,
        "commit_id": null,
        "submitted_at": null
    }))]
    #[case::optional_fields_absent(json!({ "id": 81 }))]
    fn api_review_tolerates_missing_optional_fields(#[case] value: serde_json::Value) {
        let api: ApiReview =
            serde_json::from_value(value).expect("should deserialise with missing fields");
        let review: Review = api.into();
        assert_eq!(review.id, 81);
        assert!(review.author.is_none());
        assert!(review.state.is_none());
    }

    #[test]
    fn api_check_run_converts_into_check_run() {
        let value = json!({
            "id": 4,
            "url": "https://api.github.com/repos/octo/repo/check-runs/4",
            "html_url": "https://github.com/octo/repo/runs/4",
            "status": "in_progress"
        });

        let api: ApiCheckRun = serde_json::from_value(value).expect("check run should deserialise");
        let run: CheckRun = api.into();
        assert_eq!(run.id.get(), 4);
        assert!(run.url.is_some());
        assert!(run.html_url.is_some());
    }

    #[test]
    fn api_file_maps_filename_to_path() {
        let api: ApiPullRequestFile =
            serde_json::from_value(json!({ "filename": "src/lib.rs", "status": "modified" }))
                .expect("file should deserialise");
        let file: ChangedFile = api.into();
        assert_eq!(file.path, "src/lib.rs");
    }
}

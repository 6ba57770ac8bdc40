//! End-to-end flow over a mocked GitHub API: load the approval
//! configuration, aggregate the pull request's files and reviews, then open
//! and resolve one check run per configured group.

use groupcheck::{
    AccessToken, ApprovalConfig, CheckConclusion, CheckRunRegistry, CheckStatus, CommitSha,
    ConfigLoader, ConfigParser, GroupRules, OctocrabChecksGateway, OctocrabContentsGateway,
    OctocrabPullRequestGateway, ParseRejection, PullRequestIntake, PullRequestNumber, RepoContext,
    RepositoryName, RepositoryOwner,
};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// "teamA:\n  required: 2\n"
const ENCODED_CONFIG: &str = "dGVhbUE6CiAgcmVxdWlyZWQ6IDIK";
const CONFIG_PATH: &str = ".github/approvals.yml";

/// Stand-in for the external configuration parser, pinned to the document
/// the mocked repository serves.
struct FixedParser;

impl ConfigParser for FixedParser {
    fn parse(&self, document: &str) -> Result<ApprovalConfig, ParseRejection> {
        if document != "teamA:\n  required: 2\n" {
            return Err(ParseRejection::new("unexpected document"));
        }
        let mut config = ApprovalConfig::new();
        config.insert(
            "teamA".to_owned(),
            GroupRules::new(serde_json::json!({ "required": 2 })),
        );
        Ok(config)
    }
}

fn context_for(server_uri: &str) -> RepoContext {
    RepoContext::new(
        Url::parse(server_uri).expect("server URI should parse"),
        RepositoryOwner::new("octo").expect("owner should be valid"),
        RepositoryName::new("repo").expect("repo should be valid"),
        CommitSha::new("abc123"),
        "refs/pull/7/merge",
        Some(PullRequestNumber::new(7).expect("number should be valid")),
    )
}

async fn mount_config(server: &MockServer) {
    let body = serde_json::json!({
        "type": "file",
        "encoding": "base64",
        "size": 22,
        "name": "approvals.yml",
        "path": CONFIG_PATH,
        "content": ENCODED_CONFIG,
        "sha": "3d21ec53a331a6f037a91c368710b99387d012c1",
        "url": format!("{}/repos/octo/repo/contents/{CONFIG_PATH}", server.uri()),
        "git_url": format!("{}/repos/octo/repo/git/blobs/3d21ec53", server.uri()),
        "html_url": "https://github.com/octo/repo/blob/main/.github/approvals.yml",
        "download_url":
            "https://raw.githubusercontent.com/octo/repo/main/.github/approvals.yml",
        "_links": {
            "git": format!("{}/repos/octo/repo/git/blobs/3d21ec53", server.uri()),
            "self": format!("{}/repos/octo/repo/contents/{CONFIG_PATH}", server.uri()),
            "html": "https://github.com/octo/repo/blob/main/.github/approvals.yml"
        }
    });
    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/contents/.github/approvals.yml"))
        .and(query_param("ref", "refs/pull/7/merge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_pull_request_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/pulls/7/files"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "filename": "src/core/lib.rs", "status": "modified" },
            { "filename": "README.md", "status": "added" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/pulls/7/reviews"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 501,
                "user": { "login": "alice" },
                "state": "APPROVED",
                "body": "",
                "commit_id": "abc123",
                "submitted_at": "2025-01-01T00:00:00Z"
            },
            {
                "id": 502,
                "user": { "login": "bob" },
                "state": "APPROVED",
                "body": "",
                "commit_id": "abc123",
                "submitted_at": "2025-01-01T01:00:00Z"
            }
        ])))
        .mount(server)
        .await;
}

async fn mount_check_run_lifecycle(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/repos/octo/repo/check-runs"))
        .and(body_partial_json(serde_json::json!({
            "name": "teamA",
            "head_sha": "abc123",
            "status": "in_progress"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 9001,
            "url": format!("{}/repos/octo/repo/check-runs/9001", server.uri()),
            "html_url": "https://github.com/octo/repo/runs/9001"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/repos/octo/repo/check-runs/9001"))
        .and(body_partial_json(serde_json::json!({
            "status": "completed",
            "conclusion": "success",
            "output": {
                "title": "teamA Approvals.",
                "summary": "teamA Approvals.",
                "text": "teamA Approvals."
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 9001,
            "url": format!("{}/repos/octo/repo/check-runs/9001", server.uri()),
            "html_url": "https://github.com/octo/repo/runs/9001"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn approval_flow_opens_and_resolves_one_check_run_per_group() {
    let server = MockServer::start().await;
    mount_config(&server).await;
    mount_pull_request_listings(&server).await;
    mount_check_run_lifecycle(&server).await;

    let context = context_for(&server.uri());
    let token = AccessToken::new("valid-token").expect("token should be valid");

    let contents = OctocrabContentsGateway::for_token(&token, &server.uri())
        .expect("contents gateway should be constructible");
    let pulls = OctocrabPullRequestGateway::for_token(&token, &server.uri())
        .expect("pull request gateway should be constructible");
    let checks = OctocrabChecksGateway::for_token(&token, &server.uri())
        .expect("checks gateway should be constructible");

    let parser = FixedParser;
    let config = ConfigLoader::new(&contents, &parser)
        .load(&context, CONFIG_PATH)
        .await
        .expect("configuration should load");
    assert_eq!(config.len(), 1);

    let intake = PullRequestIntake::new(&pulls, &context);
    let files = intake.changed_files().await.expect("files should list");
    let reviews = intake.reviews().await.expect("reviews should list");
    assert_eq!(files.len(), 2);
    assert_eq!(reviews.len(), 2);

    let mut registry = CheckRunRegistry::new(&checks, &context);
    for group in config.keys() {
        registry.create(group).await.expect("create should succeed");
    }

    let approvals = reviews
        .iter()
        .filter(|review| review.state.as_deref() == Some("APPROVED"))
        .count();
    assert!(approvals >= 2, "fixture grants two approvals");

    registry
        .resolve("teamA", CheckConclusion::Success)
        .await
        .expect("resolve should succeed");

    let run = registry.get("teamA").expect("entry should exist");
    assert_eq!(run.status(), CheckStatus::Completed);
    assert_eq!(run.conclusion(), Some(CheckConclusion::Success));
    server.verify().await;
}

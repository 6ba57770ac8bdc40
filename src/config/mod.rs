//! Approval-group configuration retrieval.
//!
//! The loader fetches the raw configuration document through the contents
//! gateway and hands the text to an external parser. Only the group-name
//! keys are structurally relevant here; the shape of each group's rules is
//! opaque to this layer and validated by the external policy evaluator.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::error::BotError;
use crate::github::context::RepoContext;
use crate::github::gateway::ContentsGateway;

/// Opaque rule body of one approval group.
///
/// Carried as raw JSON so the external policy evaluator can interpret it;
/// this layer never inspects the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRules(serde_json::Value);

impl GroupRules {
    /// Wraps a parsed rule body.
    #[must_use]
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the raw rule body.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Approval-group configuration keyed by unique group name.
pub type ApprovalConfig = BTreeMap<String, GroupRules>;

/// Rejection reported by an external configuration parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseRejection {
    message: String,
}

impl ParseRejection {
    /// Creates a rejection with the given detail.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External parser turning a raw configuration document into an
/// [`ApprovalConfig`].
///
/// The document syntax (YAML in practice) is deliberately outside this
/// crate; implementations live with the policy evaluator.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigParser: Send + Sync {
    /// Parse the raw document text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseRejection`] describing why the document was not a
    /// valid approval-group configuration.
    fn parse(&self, document: &str) -> Result<ApprovalConfig, ParseRejection>;
}

/// Retrieves and parses the approval-group configuration document.
pub struct ConfigLoader<'client, Gateway, Parser>
where
    Gateway: ContentsGateway,
    Parser: ConfigParser,
{
    client: &'client Gateway,
    parser: &'client Parser,
}

impl<'client, Gateway, Parser> ConfigLoader<'client, Gateway, Parser>
where
    Gateway: ContentsGateway,
    Parser: ConfigParser,
{
    /// Creates a loader over the provided gateway and parser.
    #[must_use]
    pub const fn new(client: &'client Gateway, parser: &'client Parser) -> Self {
        Self { client, parser }
    }

    /// Loads the configuration document at `path`, scoped to the context's
    /// repository and ref.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ConfigNotFound`] when the remote lookup fails and
    /// [`BotError::ConfigParse`] when the external parser rejects the text.
    pub async fn load(
        &self,
        context: &RepoContext,
        path: &str,
    ) -> Result<ApprovalConfig, BotError> {
        let document = self.client.file_content(context, path).await?;
        self.parser
            .parse(&document)
            .map_err(|rejection| BotError::ConfigParse {
                message: rejection.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{ApprovalConfig, ConfigLoader, GroupRules, MockConfigParser, ParseRejection};
    use crate::error::BotError;
    use crate::github::context::{CommitSha, RepoContext, RepositoryName, RepositoryOwner};
    use crate::github::gateway::MockContentsGateway;

    const CONFIG_PATH: &str = ".github/approvals.yml";
    const DOCUMENT: &str = "teamA:\n  required: 2\n";

    fn context() -> RepoContext {
        RepoContext::new(
            Url::parse("https://api.github.com").expect("URL should parse"),
            RepositoryOwner::new("octo").expect("owner should be valid"),
            RepositoryName::new("repo").expect("repo should be valid"),
            CommitSha::new("abc123"),
            "refs/heads/main",
            None,
        )
    }

    fn parsed_config() -> ApprovalConfig {
        let mut config = ApprovalConfig::new();
        config.insert(
            "teamA".to_owned(),
            GroupRules::new(serde_json::json!({ "required": 2 })),
        );
        config
    }

    #[tokio::test]
    async fn load_hands_document_to_parser() {
        let repo_context = context();
        let mut gateway = MockContentsGateway::new();
        gateway
            .expect_file_content()
            .withf(|_, path| path == CONFIG_PATH)
            .times(1)
            .returning(|_, _| Ok(DOCUMENT.to_owned()));

        let mut parser = MockConfigParser::new();
        parser
            .expect_parse()
            .withf(|document| document == DOCUMENT)
            .times(1)
            .returning(|_| Ok(parsed_config()));

        let loader = ConfigLoader::new(&gateway, &parser);
        let config = loader
            .load(&repo_context, CONFIG_PATH)
            .await
            .expect("load should succeed");

        assert_eq!(config.len(), 1);
        assert!(config.contains_key("teamA"));
    }

    #[tokio::test]
    async fn remote_lookup_failure_propagates_config_not_found() {
        let repo_context = context();
        let mut gateway = MockContentsGateway::new();
        gateway.expect_file_content().times(1).returning(|_, path| {
            Err(BotError::ConfigNotFound {
                message: format!("`{path}`: Not Found"),
            })
        });

        let parser = MockConfigParser::new();
        let loader = ConfigLoader::new(&gateway, &parser);
        let error = loader
            .load(&repo_context, CONFIG_PATH)
            .await
            .expect_err("load should fail");

        assert!(
            matches!(error, BotError::ConfigNotFound { .. }),
            "expected ConfigNotFound, got {error:?}"
        );
    }

    #[tokio::test]
    async fn parser_rejection_maps_to_config_parse_error() {
        let repo_context = context();
        let mut gateway = MockContentsGateway::new();
        gateway
            .expect_file_content()
            .times(1)
            .returning(|_, _| Ok("not: [valid".to_owned()));

        let mut parser = MockConfigParser::new();
        parser
            .expect_parse()
            .times(1)
            .returning(|_| Err(ParseRejection::new("unexpected end of flow sequence")));

        let loader = ConfigLoader::new(&gateway, &parser);
        let error = loader
            .load(&repo_context, CONFIG_PATH)
            .await
            .expect_err("load should fail");

        assert_eq!(
            error,
            BotError::ConfigParse {
                message: "unexpected end of flow sequence".to_owned(),
            }
        );
    }
}

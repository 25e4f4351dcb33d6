//! GitHub tree queries over GraphQL

mod query;

use crate::config::Config;
use crate::error::GregError;
use crate::types::{FileContents, FileMetadata, QueryParams};
use query::{BranchRefData, GraphQlRequest, GraphQlResponse, TreeData};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const GITHUB_API_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// One child of a queried directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub metadata: FileMetadata,
    /// Present only for file entries
    pub contents: Option<FileContents>,
}

/// One remote query per directory level.
///
/// Implementations are moved into the fetch worker, hence `Send + 'static`.
pub trait TreeSource: Send + 'static {
    /// Name of the repository's default branch
    fn default_branch(&self, owner: &str, repo: &str) -> crate::Result<String>;

    /// Direct children of `params.path_prefix` at `params.commitish`
    fn children(&self, params: &QueryParams) -> crate::Result<Vec<TreeEntry>>;
}

/// GitHub GraphQL API client
pub struct GraphQlClient {
    api_url: String,
    access_token: String,
    client: reqwest::blocking::Client,
}

impl GraphQlClient {
    /// Every query made through this client fails after `timeout`.
    pub fn new(api_url: &str, access_token: &str, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("greg/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_url: api_url.to_string(),
            access_token: access_token.to_string(),
            client,
        })
    }

    pub fn github(access_token: &str) -> crate::Result<Self> {
        Self::new(GITHUB_API_URL, access_token, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn from_config(config: &Config, access_token: &str) -> crate::Result<Self> {
        Self::new(&config.fetch.api_url, access_token, config.query_timeout())
    }

    fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> crate::Result<T> {
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.access_token)
            .json(&GraphQlRequest { query, variables })
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GregError::HttpStatus {
                status: status.as_u16(),
                body: resp.text().unwrap_or_default(),
            });
        }

        resp.json::<GraphQlResponse<T>>()?.into_data()
    }
}

impl TreeSource for GraphQlClient {
    fn default_branch(&self, owner: &str, repo: &str) -> crate::Result<String> {
        let data: BranchRefData = self.query(
            query::DEFAULT_BRANCH_QUERY,
            serde_json::json!({ "owner": owner, "repo": repo }),
        )?;
        data.into_branch()
    }

    fn children(&self, params: &QueryParams) -> crate::Result<Vec<TreeEntry>> {
        let data: TreeData = self.query(
            query::TREE_QUERY,
            serde_json::json!({
                "owner": params.repo_owner,
                "repo": params.repo_name,
                "commitishAndPath": params.expression(),
            }),
        )?;
        data.into_entries(&params.path_prefix)
    }
}

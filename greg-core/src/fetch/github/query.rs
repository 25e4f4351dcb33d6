//! GraphQL documents and response shapes for the GitHub v4 API

use crate::error::GregError;
use crate::types::{EntryKind, FileContents, FileExtension, FileMetadata};
use serde::{Deserialize, Serialize};

use super::TreeEntry;

pub(crate) const TREE_QUERY: &str = r#"query($owner: String!, $repo: String!, $commitishAndPath: String!) {
  repository(owner: $owner, name: $repo) {
    object(expression: $commitishAndPath) {
      ... on Tree {
        entries {
          name
          type
          extension
          path
          object {
            ... on Blob {
              isBinary
              text
            }
          }
        }
      }
    }
  }
}"#;

pub(crate) const DEFAULT_BRANCH_QUERY: &str = r#"query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    defaultBranchRef {
      name
    }
  }
}"#;

#[derive(Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// Server-reported errors take precedence over partial data.
    pub fn into_data(self) -> crate::Result<T> {
        if !self.errors.is_empty() {
            return Err(GregError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data.ok_or(GregError::MissingData("data"))
    }
}

// ── Default branch ──

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BranchRefData {
    repository: Option<BranchRefRepository>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchRefRepository {
    default_branch_ref: Option<BranchRef>,
}

#[derive(Deserialize)]
struct BranchRef {
    name: String,
}

impl BranchRefData {
    pub fn into_branch(self) -> crate::Result<String> {
        self.repository
            .ok_or(GregError::MissingData("repository"))?
            .default_branch_ref
            .map(|r| r.name)
            .ok_or(GregError::MissingData("default branch"))
    }
}

// ── Tree listing ──

#[derive(Deserialize)]
pub(crate) struct TreeData {
    repository: Option<TreeRepository>,
}

#[derive(Deserialize)]
struct TreeRepository {
    object: Option<TreeObject>,
}

#[derive(Deserialize)]
struct TreeObject {
    // Absent when the expression resolves to something other than a tree
    entries: Option<Vec<RawEntry>>,
}

#[derive(Deserialize)]
struct RawEntry {
    name: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    object: Option<RawBlob>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawBlob {
    #[serde(default)]
    is_binary: Option<bool>,
    #[serde(default)]
    text: Option<String>,
}

impl TreeData {
    /// Convert the raw listing of `parent` into typed entries.
    pub fn into_entries(self, parent: &str) -> crate::Result<Vec<TreeEntry>> {
        let entries = self
            .repository
            .ok_or(GregError::MissingData("repository"))?
            .object
            .ok_or(GregError::MissingData("tree object"))?
            .entries
            .ok_or(GregError::MissingData("tree entries"))?;

        Ok(entries
            .into_iter()
            .map(|raw| raw.into_entry(parent))
            .collect())
    }
}

impl RawEntry {
    fn into_entry(self, parent: &str) -> TreeEntry {
        let path = self
            .path
            .unwrap_or_else(|| join_path(parent, &self.name));
        let contents = match self.kind {
            EntryKind::File => {
                let blob = self.object.unwrap_or_default();
                Some(FileContents {
                    is_binary: blob.is_binary.unwrap_or(false),
                    text: blob.text.unwrap_or_default(),
                })
            }
            EntryKind::Directory | EntryKind::Unknown(_) => None,
        };

        TreeEntry {
            metadata: FileMetadata {
                kind: self.kind,
                name: self.name,
                extension: FileExtension::new(self.extension.as_deref().unwrap_or_default()),
                path,
            },
            contents,
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

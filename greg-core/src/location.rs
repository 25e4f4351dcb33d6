//! Remote repository location

use crate::GregError;
use std::fmt;

pub const GITHUB_HOST: &str = "github.com";

const HTTP_SCHEME: &str = "https";
const SUPPORTED_HOSTS: &[&str] = &[GITHUB_HOST];

macro_rules! name_type {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

name_type!(HostName);
name_type!(OrganisationName);
name_type!(RepositoryName);

/// Identifies a remote repository; immutable once resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub host: HostName,
    pub organisation: OrganisationName,
    pub repository: RepositoryName,
}

impl Location {
    /// Build a location from separately supplied parts
    pub fn from_parts(host: &str, org: &str, repo: &str) -> crate::Result<Self> {
        let host = host.trim();
        let org = org.trim();
        let repo = repo.trim();

        if host.is_empty() {
            return Err(GregError::InvalidLocation("host cannot be empty".to_string()));
        }
        if org.is_empty() {
            return Err(GregError::InvalidLocation("org cannot be empty".to_string()));
        }
        if repo.is_empty() {
            return Err(GregError::InvalidLocation("repo cannot be empty".to_string()));
        }

        Ok(Self {
            host: HostName::new(host),
            organisation: OrganisationName::new(org),
            repository: RepositoryName::new(repo),
        })
    }

    /// Parse `[scheme://]host/org/repo[.git][/extra/path]`
    pub fn from_url(raw: &str) -> crate::Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GregError::InvalidLocation(
                "cannot parse empty string".to_string(),
            ));
        }

        let without_scheme = match trimmed.split_once("://") {
            Some((_, rest)) if rest.contains("://") => {
                return Err(GregError::InvalidLocation(format!(
                    "cannot parse malformed string '{}'",
                    trimmed
                )));
            }
            Some((_, rest)) => rest,
            None => trimmed,
        };

        let parts: Vec<&str> = without_scheme.split('/').collect();
        if parts.len() < 3 {
            return Err(GregError::InvalidLocation(format!(
                "unable to parse host, org, and repo from '{}'",
                without_scheme
            )));
        }

        let repo = parts[2].strip_suffix(".git").unwrap_or(parts[2]);
        Self::from_parts(parts[0], parts[1], repo)
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_HOSTS.contains(&self.host.as_str())
    }

    /// Reject hosts without a tree query implementation
    pub fn ensure_supported(&self) -> crate::Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(GregError::UnsupportedHost(self.host.to_string()))
        }
    }

    /// Browser URI of the repository
    pub fn uri(&self) -> String {
        format!(
            "{}://{}/{}/{}",
            HTTP_SCHEME, self.host, self.organisation, self.repository
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.organisation, self.repository)
    }
}

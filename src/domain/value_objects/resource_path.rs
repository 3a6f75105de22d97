use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use url::Url;

use crate::common::error::BatchError;
use crate::common::result::BatchResult;

/// Scheme of resources living on the local file system.
pub const FILE_SCHEME: &str = "file";

/// A reference to a resource: its scheme and, for local resources, an
/// absolute file system location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ResourcePathFields")]
pub struct ResourcePath {
    scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    authority: Option<String>,
    location: PathBuf,
}

/// Deserialized form, rebuilt through the constructors so local locations
/// are normalized the same way.
#[derive(Deserialize)]
struct ResourcePathFields {
    scheme: String,
    #[serde(default)]
    authority: Option<String>,
    location: PathBuf,
}

impl From<ResourcePathFields> for ResourcePath {
    fn from(fields: ResourcePathFields) -> Self {
        if fields.scheme.eq_ignore_ascii_case(FILE_SCHEME) {
            Self::local(fields.location)
        } else {
            Self::remote(fields.scheme, fields.authority, fields.location)
        }
    }
}

impl ResourcePath {
    /// A local file system resource. Relative paths are kept as given; use
    /// [`ResourcePath::parse`] to resolve them against a base directory.
    pub fn local(location: impl Into<PathBuf>) -> Self {
        Self {
            scheme: FILE_SCHEME.to_string(),
            authority: None,
            location: normalize(&location.into()),
        }
    }

    /// A resource that is not on the local file system, e.g. `sftp://host/srv`.
    pub fn remote(
        scheme: impl Into<String>,
        authority: Option<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            scheme: scheme.into().to_lowercase(),
            authority,
            location: location.into(),
        }
    }

    /// Parses either a URI (`file:///a/b`, `sftp://host/x`) or a plain path.
    /// Plain relative paths are resolved against `base`.
    pub fn parse(input: &str, base: &Path) -> BatchResult<Self> {
        if input.trim().is_empty() {
            return Err(BatchError::invalid_path(input, "path is empty"));
        }

        if looks_like_uri(input) {
            let url = Url::parse(input)
                .map_err(|e| BatchError::invalid_path(input, e.to_string()))?;

            if url.scheme() == FILE_SCHEME {
                let location = url.to_file_path().map_err(|_| {
                    BatchError::invalid_path(input, "file URI has no local path")
                })?;
                return Ok(Self::local(location));
            }

            return Ok(Self::remote(
                url.scheme(),
                url.host_str().map(str::to_string),
                url.path(),
            ));
        }

        let path = PathBuf::from(input);
        if path.is_absolute() {
            Ok(Self::local(path))
        } else {
            Ok(Self::local(base.join(path)))
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Whether the resource lives on the local file system.
    pub fn is_local(&self) -> bool {
        self.scheme == FILE_SCHEME
    }

    /// Whether `other` is this resource or lies underneath it.
    pub fn contains(&self, other: &ResourcePath) -> bool {
        self.scheme == other.scheme
            && self.authority == other.authority
            && other.location.starts_with(&self.location)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_local() {
            write!(f, "{}", self.location.display())
        } else {
            write!(
                f,
                "{}://{}{}",
                self.scheme,
                self.authority.as_deref().unwrap_or(""),
                self.location.display()
            )
        }
    }
}

/// A scheme needs at least two characters so `C:\dir` stays a path.
fn looks_like_uri(input: &str) -> bool {
    match input.find("://") {
        Some(idx) if idx >= 2 => input[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

/// Lexical normalization: drops `.` and folds `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

//! Project descriptor files (`*.graphcool`)
//!
//! A descriptor starts with a block of `# key: value` header comments,
//! followed by the project schema:
//!
//! ```text
//! # project: cj26898xqm9tz0126n34d64ey
//! # version: 3
//!
//! type User implements Node {
//!   id: ID! @isUnique
//! }
//! ```
//!
//! Keys are case-insensitive and plain comment lines in the header are
//! skipped. Only `project` is required.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Opaque identifier of a remote project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Returns `None` for empty or whitespace-only input
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contents of a parsed project descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub project_id: ProjectId,
    pub version: Option<u32>,
    pub schema: String,
}

/// Why a descriptor could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    MissingProjectId,
    EmptyProjectId,
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::MissingProjectId => write!(f, "no '# project: <id>' header"),
            DescriptorError::EmptyProjectId => write!(f, "the project header has no id"),
        }
    }
}

/// Parse descriptor text into its project id, version and schema.
///
/// Leading `#` lines are scanned for `key: value` pairs; comment lines
/// without a key are skipped. The schema starts at the first line that is
/// not a comment. A version that is not a number is dropped.
pub fn parse_project_file(content: &str) -> Result<ProjectInfo, DescriptorError> {
    let mut project_id: Option<Result<ProjectId, DescriptorError>> = None;
    let mut version = None;
    let mut schema_start = content.len();

    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            schema_start = offset;
            break;
        }
        offset += line.len();

        let Some((key, value)) = header_entry(trimmed) else {
            continue;
        };

        match key.to_ascii_lowercase().as_str() {
            "project" if project_id.is_none() => {
                project_id = Some(ProjectId::parse(value).ok_or(DescriptorError::EmptyProjectId));
            }
            "version" => match value.parse::<u32>() {
                Ok(parsed) => version = Some(parsed),
                Err(_) => warn!("Ignoring non-numeric project version '{}'", value),
            },
            _ => {}
        }
    }

    let project_id = project_id.ok_or(DescriptorError::MissingProjectId)??;

    Ok(ProjectInfo {
        project_id,
        version,
        schema: content[schema_start..].trim().to_string(),
    })
}

/// `# key: value` → `(key, value)`; `None` for plain comments
fn header_entry(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix('#')?;
    let (key, value) = body.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

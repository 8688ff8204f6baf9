//! Project source resolution: decide which single project a command acts on.
//!
//! Resolution strategy (in priority order):
//!
//! 1. **Explicit project id**: used as-is, storage is never consulted.
//! 2. **Explicit project file**: read and parsed for its project id.
//! 3. **Discovery**: the default project file plus every `*.graphcool` file
//!    directly inside the working directory.
//!    - exactly one candidate: parsed for its project id
//!    - several candidates: ambiguity error, the caller must choose
//!    - none: missing-source error

use crate::constants::{PROJECT_FILE_EXTENSION, PROJECT_FILE_NAME};
use crate::error::CliError;
use crate::project_file::{parse_project_file, ProjectId};
use crate::system::resolver::{normalize, Resolver};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Explicit inputs from the command line
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs {
    pub project_id: Option<String>,
    pub project_file: Option<PathBuf>,
}

/// Which files count as candidate project files when nothing explicit is given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryScope {
    /// Directory searched for candidates
    pub directory: PathBuf,
    /// Names always probed, whether or not they match `extension`
    pub conventional_names: Vec<PathBuf>,
    /// Any file in `directory` with this extension is also a candidate
    pub extension: Option<String>,
}

impl Default for DiscoveryScope {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            conventional_names: vec![PathBuf::from(PROJECT_FILE_NAME)],
            extension: Some(PROJECT_FILE_EXTENSION.to_string()),
        }
    }
}

impl DiscoveryScope {
    /// Only the listed names, no extension scan
    pub fn conventional_only(names: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            directory: PathBuf::from("."),
            conventional_names: names.into_iter().map(Into::into).collect(),
            extension: None,
        }
    }
}

/// Outcome of resolution, kept separate from errors so precedence can be
/// tested without going through command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ProjectId),
    Ambiguous(Vec<PathBuf>),
    /// Nothing found; carries the explicit project file when one was given
    Missing(Option<PathBuf>),
    Malformed { path: PathBuf, reason: String },
}

impl Resolution {
    pub fn into_result(self) -> Result<ProjectId, CliError> {
        match self {
            Resolution::Resolved(id) => Ok(id),
            Resolution::Ambiguous(candidates) => {
                Err(CliError::AmbiguousProjectSource { candidates })
            }
            Resolution::Missing(path) => Err(CliError::NoProjectSource { path }),
            Resolution::Malformed { path, reason } => Err(CliError::malformed(path, reason)),
        }
    }
}

/// Resolve the project to act on.
///
/// # Errors
///
/// Only storage failures other than "file not found" are returned as `Err`;
/// every resolution outcome, including failures, is a [`Resolution`].
pub fn resolve_project(
    args: &ResolveArgs,
    resolver: &dyn Resolver,
    scope: &DiscoveryScope,
) -> Result<Resolution, CliError> {
    // Strategy 1: explicit project id
    if let Some(id) = args.project_id.as_deref().and_then(ProjectId::parse) {
        debug!("Using project id from arguments: {}", id);
        return Ok(Resolution::Resolved(id));
    }

    // Strategy 2: explicit project file
    if let Some(path) = &args.project_file {
        if !resolver.exists(path) {
            debug!("Project file {} does not exist", path.display());
            return Ok(Resolution::Missing(Some(path.clone())));
        }
        return read_descriptor(path, resolver);
    }

    // Strategy 3: discovery
    let candidates = discover_project_files(resolver, scope)?;
    debug!("Discovered project files: {:?}", candidates);

    if candidates.len() > 1 {
        return Ok(Resolution::Ambiguous(candidates));
    }

    match candidates.first() {
        Some(path) => read_descriptor(path, resolver),
        None => Ok(Resolution::Missing(None)),
    }
}

/// Candidate project files present in storage, sorted and de-duplicated
pub fn discover_project_files(
    resolver: &dyn Resolver,
    scope: &DiscoveryScope,
) -> Result<Vec<PathBuf>, CliError> {
    let mut found = BTreeSet::new();

    for name in &scope.conventional_names {
        let path = normalize(&scope.directory.join(name));
        if resolver.exists(&path) {
            found.insert(path);
        }
    }

    if let Some(extension) = &scope.extension {
        for path in resolver.list(&scope.directory)? {
            if has_extension(&path, extension) {
                found.insert(normalize(&path));
            }
        }
    }

    Ok(found.into_iter().collect())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension)
}

fn read_descriptor(path: &Path, resolver: &dyn Resolver) -> Result<Resolution, CliError> {
    let content = match resolver.read(path) {
        Ok(content) => content,
        Err(CliError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Resolution::Missing(Some(path.to_path_buf())));
        }
        Err(e) => return Err(e),
    };

    Ok(match parse_project_file(&content) {
        Ok(info) => {
            debug!(
                "Read project id {} from {}",
                info.project_id,
                path.display()
            );
            Resolution::Resolved(info.project_id)
        }
        Err(reason) => Resolution::Malformed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MemoryResolver;

    const FILE_A: &str = "# project: cj26898xqm9tz0126n34d64ey\n# version: 1\n\ntype User {}\n";
    const FILE_B: &str = "# project: cj2ly3yxd0gn00102zybdkcbs\n# version: 4\n";

    fn resolve(args: &ResolveArgs, resolver: &MemoryResolver) -> Resolution {
        resolve_project(args, resolver, &DiscoveryScope::default()).unwrap()
    }

    fn id(raw: &str) -> ProjectId {
        ProjectId::parse(raw).unwrap()
    }

    #[test]
    fn test_explicit_id_wins_without_touching_storage() {
        let resolver = MemoryResolver::with_files([
            ("project.graphcool", FILE_A),
            ("example.graphcool", FILE_B),
        ]);
        let args = ResolveArgs {
            project_id: Some("explicit-id".to_string()),
            project_file: Some(PathBuf::from("example.graphcool")),
        };

        assert_eq!(resolve(&args, &resolver), Resolution::Resolved(id("explicit-id")));
        assert!(resolver.accessed_paths().is_empty());
    }

    #[test]
    fn test_blank_explicit_id_falls_through() {
        let resolver = MemoryResolver::with_files([("project.graphcool", FILE_A)]);
        let args = ResolveArgs {
            project_id: Some("  ".to_string()),
            project_file: None,
        };

        assert_eq!(
            resolve(&args, &resolver),
            Resolution::Resolved(id("cj26898xqm9tz0126n34d64ey"))
        );
    }

    #[test]
    fn test_explicit_file_beats_discovery() {
        let resolver = MemoryResolver::with_files([
            ("project.graphcool", FILE_A),
            ("example.graphcool", FILE_B),
        ]);
        let args = ResolveArgs {
            project_id: None,
            project_file: Some(PathBuf::from("example.graphcool")),
        };

        assert_eq!(
            resolve(&args, &resolver),
            Resolution::Resolved(id("cj2ly3yxd0gn00102zybdkcbs"))
        );
    }

    #[test]
    fn test_explicit_file_missing() {
        let resolver = MemoryResolver::with_files([("project.graphcool", FILE_A)]);
        let args = ResolveArgs {
            project_id: None,
            project_file: Some(PathBuf::from("gone.graphcool")),
        };

        assert_eq!(
            resolve(&args, &resolver),
            Resolution::Missing(Some(PathBuf::from("gone.graphcool")))
        );
    }

    #[test]
    fn test_single_default_file() {
        let resolver = MemoryResolver::with_files([("project.graphcool", FILE_A)]);
        assert_eq!(
            resolve(&ResolveArgs::default(), &resolver),
            Resolution::Resolved(id("cj26898xqm9tz0126n34d64ey"))
        );
    }

    #[test]
    fn test_single_custom_named_file() {
        let resolver = MemoryResolver::with_files([("example.graphcool", FILE_B)]);
        assert_eq!(
            resolve(&ResolveArgs::default(), &resolver),
            Resolution::Resolved(id("cj2ly3yxd0gn00102zybdkcbs"))
        );
    }

    #[test]
    fn test_multiple_files_are_ambiguous() {
        let resolver = MemoryResolver::with_files([
            ("example.graphcool", FILE_A),
            ("project.graphcool", FILE_A),
        ]);

        assert_eq!(
            resolve(&ResolveArgs::default(), &resolver),
            Resolution::Ambiguous(vec![
                PathBuf::from("example.graphcool"),
                PathBuf::from("project.graphcool"),
            ])
        );
    }

    #[test]
    fn test_no_files_is_missing() {
        let resolver = MemoryResolver::with_files([("README.md", "# project: nope")]);
        assert_eq!(
            resolve(&ResolveArgs::default(), &resolver),
            Resolution::Missing(None)
        );
    }

    #[test]
    fn test_malformed_file() {
        let resolver = MemoryResolver::with_files([("project.graphcool", "type User {}\n")]);
        match resolve(&ResolveArgs::default(), &resolver) {
            Resolution::Malformed { path, .. } => {
                assert_eq!(path, PathBuf::from("project.graphcool"))
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_version_still_resolves() {
        let resolver = MemoryResolver::with_files([(
            "project.graphcool",
            "# project: abc123\n# version: v2\n\ntype User {}\n",
        )]);
        assert_eq!(
            resolve(&ResolveArgs::default(), &resolver),
            Resolution::Resolved(id("abc123"))
        );
    }

    #[test]
    fn test_leading_comment_still_resolves() {
        let resolver = MemoryResolver::with_files([(
            "project.graphcool",
            "# generated by graphcool\n# project: abc123\n",
        )]);
        assert_eq!(
            resolve(&ResolveArgs::default(), &resolver),
            Resolution::Resolved(id("abc123"))
        );
    }

    #[test]
    fn test_nested_files_are_not_candidates() {
        let resolver = MemoryResolver::with_files([
            ("project.graphcool", FILE_A),
            ("backup/old.graphcool", FILE_B),
        ]);
        assert_eq!(
            resolve(&ResolveArgs::default(), &resolver),
            Resolution::Resolved(id("cj26898xqm9tz0126n34d64ey"))
        );
    }

    #[test]
    fn test_conventional_only_scope_ignores_other_names() {
        let resolver = MemoryResolver::with_files([
            ("example.graphcool", FILE_B),
            ("project.graphcool", FILE_A),
        ]);
        let scope = DiscoveryScope::conventional_only([PROJECT_FILE_NAME]);

        let resolution = resolve_project(&ResolveArgs::default(), &resolver, &scope).unwrap();
        assert_eq!(
            resolution,
            Resolution::Resolved(id("cj26898xqm9tz0126n34d64ey"))
        );
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let resolver = MemoryResolver::with_files([
            ("example.graphcool", FILE_A),
            ("project.graphcool", FILE_B),
        ]);
        let first = resolve(&ResolveArgs::default(), &resolver);
        let second = resolve(&ResolveArgs::default(), &resolver);
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_result_maps_error_kinds() {
        assert!(matches!(
            Resolution::Ambiguous(vec![]).into_result(),
            Err(CliError::AmbiguousProjectSource { .. })
        ));
        assert!(matches!(
            Resolution::Missing(None).into_result(),
            Err(CliError::NoProjectSource { path: None })
        ));
        assert!(matches!(
            Resolution::Malformed {
                path: PathBuf::from("x.graphcool"),
                reason: "bad".to_string()
            }
            .into_result(),
            Err(CliError::MalformedDescriptor { .. })
        ));
    }
}

use crate::error::CliError;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use walkdir::WalkDir;

/// Access to the files a command reads and writes.
///
/// Relative paths are interpreted against the working directory of the
/// implementation. Both implementations report directory listings in the
/// same form, so project file discovery behaves identically on either.
pub trait Resolver: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> Result<String, CliError>;

    fn write(&self, path: &Path, content: &str) -> Result<(), CliError>;

    /// Files directly inside `dir` (not recursive), sorted by path
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, CliError>;
}

/// Drop `.` components so `./a.graphcool` and `a.graphcool` name the same file
pub fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Resolver backed by the real filesystem
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    root: PathBuf,
}

impl FileSystemResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolver rooted at the process working directory
    pub fn current_dir() -> Result<Self, CliError> {
        Ok(Self::new(std::env::current_dir()?))
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Resolver for FileSystemResolver {
    fn exists(&self, path: &Path) -> bool {
        self.absolute(path).is_file()
    }

    fn read(&self, path: &Path) -> Result<String, CliError> {
        Ok(std::fs::read_to_string(self.absolute(path))?)
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), CliError> {
        let target = self.absolute(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, content)?;
        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, CliError> {
        let prefix = normalize(dir);
        let mut files = Vec::new();

        for entry in WalkDir::new(self.absolute(dir)).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| CliError::Io(e.into()))?;
            // Follows symlinks, like `exists`
            if entry.path().is_file() {
                files.push(prefix.join(entry.file_name()));
            }
        }

        files.sort();
        Ok(files)
    }
}

/// In-memory resolver for tests.
///
/// Clones share the same files, and every `exists`/`read`/`list` call is
/// recorded so tests can assert which paths a command looked at.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    accesses: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the resolver with `(path, content)` pairs
    pub fn with_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<String>,
    {
        let resolver = Self::new();
        {
            let mut map = resolver.lock_files();
            for (path, content) in files {
                map.insert(normalize(path.as_ref()), content.into());
            }
        }
        resolver
    }

    /// Paths looked at through `exists`, `read` or `list`, in call order
    pub fn accessed_paths(&self) -> Vec<PathBuf> {
        self.accesses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Current content of a file, without recording an access
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock_files().get(&normalize(path.as_ref())).cloned()
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, path: &Path) {
        self.accesses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_path_buf());
    }
}

impl Resolver for MemoryResolver {
    fn exists(&self, path: &Path) -> bool {
        self.record(path);
        self.lock_files().contains_key(&normalize(path))
    }

    fn read(&self, path: &Path) -> Result<String, CliError> {
        self.record(path);
        self.lock_files()
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| {
                CliError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                ))
            })
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), CliError> {
        self.lock_files()
            .insert(normalize(path), content.to_string());
        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, CliError> {
        self.record(dir);
        let dir = normalize(dir);
        // BTreeMap keys are already sorted
        Ok(self
            .lock_files()
            .keys()
            .filter(|path| path.parent() == Some(dir.as_path()))
            .cloned()
            .collect())
    }
}

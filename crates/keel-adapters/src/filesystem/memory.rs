//! In-memory filesystem for tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use keel_core::{application::ports::Filesystem, error::KeelResult};

/// Test double recording writes in memory. Cloning shares the backing
/// store, so a test can keep a handle while the service owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    /// Paths that fail on write, for failure-path tests.
    poisoned_paths: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes to `path` fail.
    pub fn poison(&self, path: impl Into<PathBuf>) {
        self.write_state().poisoned_paths.insert(path.into());
    }

    /// Read a previously written file.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read_state().files.get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.read_state().files.len()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> KeelResult<()> {
        let mut state = self.write_state();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            state.directories.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> KeelResult<()> {
        let mut state = self.write_state();
        if state.poisoned_paths.contains(path) {
            return Err(keel_core::application::ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "poisoned by test".into(),
            }
            .into());
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.read_state();
        state.files.contains_key(path) || state.directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> KeelResult<()> {
        let mut state = self.write_state();
        state.files.retain(|p, _| !p.starts_with(path));
        state.directories.retain(|p| !p.starts_with(path));
        Ok(())
    }
}

//! Port traits abstracting file access away from the patches.
//!
//! Paths handed to a port are relative to the project root. Absolute paths
//! are used as given.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;

/// Read-only view of the project tree.
pub trait RepoView {
    fn root(&self) -> &Utf8Path;

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String>;

    fn exists(&self, rel: &Utf8Path) -> bool;
}

/// File-system write operations.
pub trait WritePort {
    /// Replace the whole file. Parent directories are created as needed.
    fn write_file(&self, rel: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}

/// Everything a patch needs: read, probe and write.
pub trait ProjectIo: RepoView + WritePort {}

impl<T: RepoView + WritePort + ?Sized> ProjectIo for T {}

/// File-system backed project rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsProject {
    root: Utf8PathBuf,
}

impl FsProject {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn abs(&self, rel: &Utf8Path) -> Utf8PathBuf {
        abs_path(&self.root, rel)
    }
}

impl RepoView for FsProject {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        let abs = self.abs(rel);
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.abs(rel).is_file()
    }
}

impl WritePort for FsProject {
    fn write_file(&self, rel: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        let abs = self.abs(rel);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", abs))?;
        }
        fs::write(&abs, contents).with_context(|| format!("write {}", abs))
    }
}

pub fn abs_path(root: &Utf8Path, rel: &Utf8Path) -> Utf8PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

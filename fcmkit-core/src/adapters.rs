//! Port adapters layered over another project view.
//!
//! - [`DryRunProject`] keeps writes in memory so nothing reaches disk.
//! - [`TrackedIo`] passes everything through and remembers what each written
//!   file looked like before and after, for reports and diffs.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fcmkit_edit::{ProjectIo, RepoView, WritePort, render_patch};
use fcmkit_types::report::FileChange;
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;

fn utf8(rel: &Utf8Path, contents: &[u8]) -> anyhow::Result<String> {
    String::from_utf8(contents.to_vec()).with_context(|| format!("{} is not UTF-8", rel))
}

/// In-memory write overlay over a read-only view.
///
/// Reads see earlier pending writes.
pub struct DryRunProject<'a> {
    inner: &'a dyn RepoView,
    pending: RefCell<BTreeMap<Utf8PathBuf, String>>,
}

impl<'a> DryRunProject<'a> {
    pub fn new(inner: &'a dyn RepoView) -> Self {
        Self {
            inner,
            pending: RefCell::new(BTreeMap::new()),
        }
    }

    /// Pending file contents keyed by path.
    pub fn pending(&self) -> BTreeMap<Utf8PathBuf, String> {
        self.pending.borrow().clone()
    }
}

impl RepoView for DryRunProject<'_> {
    fn root(&self) -> &Utf8Path {
        self.inner.root()
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        if let Some(contents) = self.pending.borrow().get(rel) {
            return Ok(contents.clone());
        }
        self.inner.read_to_string(rel)
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.pending.borrow().contains_key(rel) || self.inner.exists(rel)
    }
}

impl WritePort for DryRunProject<'_> {
    fn write_file(&self, rel: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        debug!(path = %rel, bytes = contents.len(), "dry run: holding write");
        let text = utf8(rel, contents)?;
        self.pending.borrow_mut().insert(rel.to_path_buf(), text);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Tracked {
    before: Option<String>,
    after: String,
}

/// Pass-through adapter recording the first-seen and latest contents of
/// every file written.
pub struct TrackedIo<'a> {
    inner: &'a dyn ProjectIo,
    written: RefCell<BTreeMap<Utf8PathBuf, Tracked>>,
}

impl<'a> TrackedIo<'a> {
    pub fn new(inner: &'a dyn ProjectIo) -> Self {
        Self {
            inner,
            written: RefCell::new(BTreeMap::new()),
        }
    }

    /// One record per written file, sorted by path.
    pub fn changes(&self) -> Vec<FileChange> {
        self.written
            .borrow()
            .iter()
            .map(|(path, t)| FileChange {
                path: path.to_string(),
                before_sha256: t.before.as_deref().map(|b| sha256_hex(b.as_bytes())),
                after_sha256: sha256_hex(t.after.as_bytes()),
                before_bytes: t.before.as_ref().map(|b| b.len() as u64),
                after_bytes: t.after.len() as u64,
            })
            .collect()
    }

    /// Unified diff of everything written, skipping files whose text ended
    /// up unchanged.
    pub fn render_patch(&self) -> String {
        let written = self.written.borrow();
        let before: BTreeMap<Utf8PathBuf, String> = written
            .iter()
            .filter_map(|(path, t)| Some((path.clone(), t.before.clone()?)))
            .collect();
        let after: BTreeMap<Utf8PathBuf, String> = written
            .iter()
            .map(|(path, t)| (path.clone(), t.after.clone()))
            .collect();
        render_patch(&before, &after)
    }
}

impl RepoView for TrackedIo<'_> {
    fn root(&self) -> &Utf8Path {
        self.inner.root()
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        self.inner.read_to_string(rel)
    }

    fn exists(&self, rel: &Utf8Path) -> bool {
        self.inner.exists(rel)
    }
}

impl WritePort for TrackedIo<'_> {
    fn write_file(&self, rel: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        let after = utf8(rel, contents)?;
        let already_tracked = self.written.borrow().contains_key(rel);
        let before = if already_tracked || !self.inner.exists(rel) {
            None
        } else {
            Some(self.inner.read_to_string(rel)?)
        };

        self.inner.write_file(rel, contents)?;

        let mut written = self.written.borrow_mut();
        match written.get_mut(rel) {
            Some(t) => t.after = after,
            None => {
                written.insert(rel.to_path_buf(), Tracked { before, after });
            }
        }
        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

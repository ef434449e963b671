//! Project identity detection from version-control markers.
//!
//! A [`ProjectDetector`] walks a file's ancestor directories, innermost first,
//! asking each registered [`VcsProbe`] whether the directory is a repository
//! root. The first probe that recognizes a root and can read it decides the
//! project name and tags.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::vcs::{GitProbe, JjProbe, MercurialProbe};

/// Version-control families the detector knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    Git,
    Mercurial,
    Jj,
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Git => "git",
            Self::Mercurial => "hg",
            Self::Jj => "jj",
        };
        write!(f, "{s}")
    }
}

/// Project name and tags derived from a file's location.
///
/// `vcs` records which probe produced the name; it is never reported to the
/// API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    pub name: Option<String>,
    pub tags: BTreeSet<String>,
    pub vcs: Option<VcsKind>,
}

impl ProjectContext {
    /// Context for a file outside any recognized repository.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context named after the repository root directory, with no tags yet.
    pub fn at_root(kind: VcsKind, root: &Path) -> Self {
        Self {
            name: dir_name(root),
            tags: BTreeSet::new(),
            vcs: Some(kind),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.tags.is_empty()
    }
}

/// Formats a branch tag, e.g. `branch:main`.
pub fn branch_tag(branch: &str) -> String {
    format!("branch:{branch}")
}

/// Errors a probe can hit while reading repository metadata.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl ProbeError {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Recognizes one version-control family.
pub trait VcsProbe {
    fn kind(&self) -> VcsKind;

    /// Returns true if `dir` holds this family's marker.
    ///
    /// Must not fail: unreadable directories simply do not match.
    fn matches(&self, dir: &Path) -> bool;

    /// Derives the project context for the repository rooted at `root`.
    fn extract(&self, root: &Path) -> Result<ProjectContext, ProbeError>;
}

/// Walks ancestor directories and applies the registered probes.
pub struct ProjectDetector {
    probes: Vec<Box<dyn VcsProbe>>,
}

impl fmt::Debug for ProjectDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<VcsKind> = self.probes.iter().map(|probe| probe.kind()).collect();
        f.debug_struct("ProjectDetector")
            .field("probes", &kinds)
            .finish()
    }
}

impl Default for ProjectDetector {
    fn default() -> Self {
        Self::with_probes(vec![
            Box::new(GitProbe),
            Box::new(MercurialProbe),
            Box::new(JjProbe),
        ])
    }
}

impl ProjectDetector {
    /// Creates a detector that tries `probes` in order at each directory.
    pub fn with_probes(probes: Vec<Box<dyn VcsProbe>>) -> Self {
        Self { probes }
    }

    /// Appends a probe, tried after the ones already registered.
    pub fn register(&mut self, probe: impl VcsProbe + 'static) {
        self.probes.push(Box::new(probe));
    }

    /// Detects the project containing `target_file`.
    ///
    /// Symlinks are resolved first so the walk follows the real hierarchy.
    /// Never fails: unreadable markers are skipped, and a file outside any
    /// repository yields [`ProjectContext::empty`].
    pub fn detect(&self, target_file: &Path) -> ProjectContext {
        let resolved = resolve_real_path(target_file);
        let Some(start) = resolved.parent().filter(|p| !p.as_os_str().is_empty()) else {
            tracing::debug!(file = %resolved.display(), "file has no parent directory");
            return ProjectContext::empty();
        };

        for dir in start.ancestors() {
            for probe in &self.probes {
                if !probe.matches(dir) {
                    continue;
                }
                match probe.extract(dir) {
                    Ok(context) => {
                        tracing::debug!(
                            vcs = %probe.kind(),
                            root = %dir.display(),
                            project = ?context.name,
                            tags = ?context.tags,
                            "detected project"
                        );
                        return context;
                    }
                    Err(err) => {
                        tracing::debug!(
                            vcs = %probe.kind(),
                            root = %dir.display(),
                            error = %err,
                            "skipping unreadable VCS marker"
                        );
                    }
                }
            }
        }

        tracing::debug!(file = %resolved.display(), "no VCS root found");
        ProjectContext::empty()
    }
}

fn resolve_real_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Final path component as an owned string.
pub(crate) fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
}

//! Mercurial repositories.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::project::{ProbeError, ProjectContext, VcsKind, VcsProbe, branch_tag};

const MARKER: &str = ".hg";

/// Branch Mercurial uses when `.hg/branch` has never been written.
const DEFAULT_BRANCH: &str = "default";

#[derive(Debug, Clone, Copy, Default)]
pub struct MercurialProbe;

impl VcsProbe for MercurialProbe {
    fn kind(&self) -> VcsKind {
        VcsKind::Mercurial
    }

    fn matches(&self, dir: &Path) -> bool {
        dir.join(MARKER).is_dir()
    }

    fn extract(&self, root: &Path) -> Result<ProjectContext, ProbeError> {
        let context = ProjectContext::at_root(VcsKind::Mercurial, root);
        let branch_file = root.join(MARKER).join("branch");

        let branch = match fs::read_to_string(&branch_file) {
            Ok(contents) => contents.trim().to_string(),
            Err(err) if err.kind() == ErrorKind::NotFound => DEFAULT_BRANCH.to_string(),
            Err(err) => {
                tracing::debug!(path = %branch_file.display(), error = %err, "could not read branch");
                return Ok(context);
            }
        };

        if branch.is_empty() {
            Ok(context.with_tag(branch_tag(DEFAULT_BRANCH)))
        } else {
            Ok(context.with_tag(branch_tag(&branch)))
        }
    }
}

//! Git repositories, including linked worktrees and submodules.

use std::fs;
use std::path::{Path, PathBuf};

use crate::project::{ProbeError, ProjectContext, VcsKind, VcsProbe, branch_tag};

const MARKER: &str = ".git";

/// Recognizes a `.git` directory, or a `.git` file pointing at one.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitProbe;

impl VcsProbe for GitProbe {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    fn matches(&self, dir: &Path) -> bool {
        dir.join(MARKER).exists()
    }

    fn extract(&self, root: &Path) -> Result<ProjectContext, ProbeError> {
        let git_dir = resolve_git_dir(root)?;
        let context = ProjectContext::at_root(VcsKind::Git, root);

        let head = git_dir.join("HEAD");
        match fs::read_to_string(&head) {
            Ok(contents) => match parse_head(&contents) {
                Some(branch) => Ok(context.with_tag(branch_tag(&branch))),
                None => {
                    tracing::debug!(root = %root.display(), "detached HEAD, no branch tag");
                    Ok(context)
                }
            },
            Err(err) => {
                tracing::debug!(path = %head.display(), error = %err, "could not read HEAD");
                Ok(context)
            }
        }
    }
}

/// Follows a `gitdir:` pointer when `.git` is a file.
fn resolve_git_dir(root: &Path) -> Result<PathBuf, ProbeError> {
    let marker = root.join(MARKER);
    if marker.is_dir() {
        return Ok(marker);
    }

    let contents = fs::read_to_string(&marker).map_err(|err| ProbeError::read(&marker, err))?;
    let pointer = contents
        .lines()
        .find_map(|line| line.strip_prefix("gitdir:"))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ProbeError::Malformed {
            path: marker.clone(),
            reason: "missing gitdir pointer".to_string(),
        })?;

    let pointer = Path::new(pointer);
    Ok(if pointer.is_absolute() {
        pointer.to_path_buf()
    } else {
        root.join(pointer)
    })
}

/// Extracts the branch name from the contents of a `HEAD` file.
///
/// Returns `None` for a detached HEAD or anything that is not a local branch.
pub fn parse_head(contents: &str) -> Option<String> {
    let reference = contents.trim().strip_prefix("ref:")?.trim();
    let branch = reference.strip_prefix("refs/heads/")?;

    if branch.is_empty() {
        None
    } else {
        Some(branch.to_string())
    }
}

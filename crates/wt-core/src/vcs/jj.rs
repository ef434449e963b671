//! jj (Jujutsu) repositories and their workspaces.

use std::fs;
use std::path::{Path, PathBuf};

use crate::project::{ProbeError, ProjectContext, VcsKind, VcsProbe, dir_name};

const MARKER: &str = ".jj";

/// Recognizes a `.jj` directory.
///
/// A secondary workspace keeps a `.jj/repo` file pointing at the shared repo
/// store of the main workspace. Those report the main workspace's name as the
/// project and tag the workspace they came from.
#[derive(Debug, Clone, Copy, Default)]
pub struct JjProbe;

impl VcsProbe for JjProbe {
    fn kind(&self) -> VcsKind {
        VcsKind::Jj
    }

    fn matches(&self, dir: &Path) -> bool {
        dir.join(MARKER).is_dir()
    }

    fn extract(&self, root: &Path) -> Result<ProjectContext, ProbeError> {
        let context = ProjectContext::at_root(VcsKind::Jj, root);
        let repo = root.join(MARKER).join("repo");
        if !repo.is_file() {
            return Ok(context);
        }

        let contents = fs::read_to_string(&repo).map_err(|err| ProbeError::read(&repo, err))?;
        let store = shared_store_path(root, contents.trim());
        let main_workspace = store
            .parent()
            .and_then(Path::parent)
            .and_then(dir_name)
            .ok_or_else(|| ProbeError::Malformed {
                path: repo.clone(),
                reason: format!("cannot locate main workspace from {}", store.display()),
            })?;

        let mut context = context.with_name(main_workspace);
        if let Some(workspace) = dir_name(root) {
            context = context.with_tag(format!("workspace:{workspace}"));
        }
        Ok(context)
    }
}

/// Resolves the repo store path, relative paths being relative to `.jj`.
fn shared_store_path(root: &Path, pointer: &str) -> PathBuf {
    let pointer = Path::new(pointer);
    let store = if pointer.is_absolute() {
        pointer.to_path_buf()
    } else {
        root.join(MARKER).join(pointer)
    };
    fs::canonicalize(&store).unwrap_or(store)
}

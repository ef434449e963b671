//! Core domain logic for the wakatime event appender.
//!
//! This crate contains:
//! - Events: the single unit of coding activity reported per invocation
//! - Project detection: walking a file's ancestors for a version-control root
//! - VCS probes: git, Mercurial and jj marker recognition

pub mod event;
pub mod project;
pub mod vcs;

pub use event::{Event, now_epoch_seconds};
pub use project::{ProbeError, ProjectContext, ProjectDetector, VcsKind, VcsProbe};

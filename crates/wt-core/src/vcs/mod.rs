//! Built-in [`VcsProbe`](crate::VcsProbe) implementations.

mod git;
mod jj;
mod mercurial;

pub use git::{GitProbe, parse_head};
pub use jj::JjProbe;
pub use mercurial::MercurialProbe;

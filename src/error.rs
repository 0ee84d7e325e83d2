use std::io;

use thiserror::Error;

use crate::sys::FsKind;

/// Errors surfaced by the removal engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller passed a flag combination that cannot be honored.
    #[error("invalid removal options: {0}")]
    Config(&'static str),

    /// The target resolves to the filesystem root.
    #[error("refusing to remove the filesystem root")]
    FsRoot,

    /// The target sits on a pseudo filesystem and `physical` was not set.
    #[error("refusing to operate on a {0} filesystem without the physical flag")]
    UnsafeFilesystem(FsKind),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Concurrent removals race against us constantly; an entry vanishing
/// between readdir and the syscall acting on it is not a failure.
pub(crate) fn not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

use crate::error::Error;

/// Options accepted by every removal entry point. All fields default to
/// false, which gives the most conservative behavior: regular recursive
/// removal of the contents only, refusing pseudo filesystems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveFlags {
    /// Remove only directories, leaving every other file type in place.
    pub only_directories: bool,
    /// Allow operating on temporary and control-group filesystems.
    pub physical: bool,
    /// Try the btrfs subvolume fast path before recursing.
    pub subvolumes: bool,
    /// Remove the top-level target itself after its contents.
    pub remove_root: bool,
    /// Treat an already-missing target as success.
    pub missing_ok: bool,
    /// On permission errors, try widening a self-owned parent's mode.
    pub chmod_repair: bool,
}

impl RemoveFlags {
    pub(crate) fn validate(self) -> Result<(), Error> {
        if self.only_directories && self.subvolumes {
            return Err(Error::Config(
                "only_directories and subvolumes are mutually exclusive",
            ));
        }
        Ok(())
    }
}

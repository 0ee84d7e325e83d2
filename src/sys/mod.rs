//! Platform-facing collaborators: everything that talks to the kernel
//! about filesystems rather than individual entries lives behind
//! [`FsProbe`], so the walker can be exercised against stub backends.

use std::ffi::CStr;
use std::io;
use std::os::fd::BorrowedFd;
use std::path::Path;

mod btrfs;
pub(crate) mod fdio;
pub(crate) mod magic;
mod mountpoint;

pub use magic::FsKind;

/// Filesystem interrogation capabilities consumed by the removal engine.
pub trait FsProbe {
    /// Classify the filesystem an open directory lives on.
    fn fs_kind(&self, dir: BorrowedFd) -> io::Result<FsKind>;

    /// Classify the filesystem a path lives on, without opening it as a
    /// directory.
    fn fs_kind_of_path(&self, path: &Path) -> io::Result<FsKind>;

    /// Whether the path resolves to the root of the filesystem tree.
    fn is_fs_root(&self, path: &Path) -> io::Result<bool>;

    /// Whether the named entry under `parent` is the root of a mount.
    fn is_mount_point(&self, parent: BorrowedFd, name: &CStr) -> io::Result<bool>;

    /// Atomically destroy the named entry if it is a btrfs subvolume.
    /// `Ok(false)` means the entry is not an applicable subvolume and
    /// ordinary removal should proceed.
    fn remove_subvolume_at(&self, parent: BorrowedFd, name: &CStr) -> io::Result<bool>;

    /// Path-addressed variant of [`FsProbe::remove_subvolume_at`].
    fn remove_subvolume_tree(&self, path: &Path) -> io::Result<bool>;
}

/// The stock Linux implementation of [`FsProbe`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SysProbe;

impl FsProbe for SysProbe {
    fn fs_kind(&self, dir: BorrowedFd) -> io::Result<FsKind> {
        magic::classify_fd(dir)
    }

    fn fs_kind_of_path(&self, path: &Path) -> io::Result<FsKind> {
        magic::classify_path(path)
    }

    fn is_fs_root(&self, path: &Path) -> io::Result<bool> {
        fdio::is_fs_root(path)
    }

    fn is_mount_point(&self, parent: BorrowedFd, name: &CStr) -> io::Result<bool> {
        mountpoint::is_mount_point(parent, name)
    }

    fn remove_subvolume_at(&self, parent: BorrowedFd, name: &CStr) -> io::Result<bool> {
        btrfs::remove_subvolume_at(parent, name)
    }

    fn remove_subvolume_tree(&self, path: &Path) -> io::Result<bool> {
        btrfs::remove_subvolume_tree(path)
    }
}

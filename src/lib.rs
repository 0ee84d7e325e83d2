// Copyright 2026 Scythe Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recursive, privilege-aware removal of filesystem subtrees.
//!
//! The engine walks trees through directory file descriptors only, so a
//! path component swapped for a symlink mid-removal cannot redirect it
//! outside the target. It refuses the filesystem root unconditionally,
//! refuses pseudo filesystems (tmpfs, ramfs, cgroupfs) unless told
//! otherwise, never crosses mount boundaries, can repair missing owner
//! permissions on self-owned directories, and short-circuits btrfs
//! subvolumes into a single ioctl.
//!
//! Linux only.

mod core;
mod defs;
mod error;
mod flags;
mod sys;

pub use crate::core::remove::{remove_child_in, remove_tree, remove_tree_in};
pub use crate::core::walk::remove_dir_contents;
pub use crate::error::Error;
pub use crate::flags::RemoveFlags;
pub use crate::sys::{FsKind, FsProbe, SysProbe};

// Copyright 2026 Scythe Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Top-level entry points: flag validation, the root and filesystem
//! gates, the whole-path subvolume fast path, and the not-a-directory
//! fallback ladder.

use std::ffi::CStr;
use std::io;
use std::os::fd::BorrowedFd;
use std::path::Path;

use rustix::fs::{self, AtFlags, CWD};

use crate::core::walk;
use crate::error::{self, Error};
use crate::flags::RemoveFlags;
use crate::sys::{FsProbe, SysProbe, fdio};

/// Recursively remove the tree at `path` according to `flags`.
pub fn remove_tree<P: AsRef<Path>>(path: P, flags: RemoveFlags) -> Result<(), Error> {
    remove_tree_in(&SysProbe, path.as_ref(), flags)
}

/// [`remove_tree`] with an injected probe backend.
pub fn remove_tree_in(probe: &dyn FsProbe, path: &Path, flags: RemoveFlags) -> Result<(), Error> {
    flags.validate()?;

    if probe.is_fs_root(path)? {
        return Err(Error::FsRoot);
    }

    // The whole tree may be a single subvolume. Only attempted when the
    // caller asked for root removal in forced physical mode; this path
    // does not pass through the gate below.
    if flags.subvolumes && flags.remove_root && flags.physical {
        match probe.remove_subvolume_tree(path) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) if error::not_found(&e) && flags.missing_ok => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }

    let dir = match fdio::open_dir(path) {
        Ok(dir) => dir,
        Err(e) if error::not_found(&e) => {
            return if flags.missing_ok { Ok(()) } else { Err(e.into()) };
        }
        Err(e)
            if e.kind() == io::ErrorKind::NotADirectory
                || e.raw_os_error() == Some(libc::ELOOP) =>
        {
            return remove_non_directory(probe, path, flags);
        }
        Err(e) => return Err(e.into()),
    };

    let mut walked = walk::remove_children(probe, dir, flags, None, false);

    // A filesystem-type violation is fatal for the whole operation; the
    // root entry must not be touched either.
    if matches!(walked, Err(Error::UnsafeFilesystem(_))) {
        return walked;
    }

    if flags.remove_root {
        match fs::unlinkat(CWD, path, AtFlags::REMOVEDIR) {
            Ok(()) => {}
            Err(e) => {
                let e = io::Error::from(e);
                let benign = error::not_found(&e) && flags.missing_ok;
                // A root-removal failure only surfaces when the walk
                // itself had nothing worse to report.
                if walked.is_ok() && !benign {
                    walked = Err(e.into());
                }
            }
        }
    }

    walked
}

/// The target exists but is not traversable as a directory: a plain
/// file, a symlink, or a symlink loop.
fn remove_non_directory(probe: &dyn FsProbe, path: &Path, flags: RemoveFlags) -> Result<(), Error> {
    if flags.only_directories {
        return Ok(());
    }
    if !flags.remove_root {
        return Ok(());
    }
    if !flags.physical {
        let kind = match probe.fs_kind_of_path(path) {
            Ok(kind) => kind,
            Err(e) if error::not_found(&e) && flags.missing_ok => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        if kind.is_pseudo() {
            return Err(Error::UnsafeFilesystem(kind));
        }
    }
    match fs::unlinkat(CWD, path, AtFlags::empty()) {
        Ok(()) => Ok(()),
        Err(e) => {
            let e = io::Error::from(e);
            if error::not_found(&e) && flags.missing_ok {
                Ok(())
            } else {
                Err(e.into())
            }
        }
    }
}

/// Remove one named entry beneath an already-open parent directory,
/// recursing if it is a directory.
///
/// The caller must request `remove_root` (this call always removes the
/// entry itself); `missing_ok`, `only_directories` and `subvolumes`
/// have no sensible meaning here and are rejected.
pub fn remove_child_in(
    probe: &dyn FsProbe,
    parent: BorrowedFd,
    name: &CStr,
    flags: RemoveFlags,
) -> Result<(), Error> {
    flags.validate()?;

    let bytes = name.to_bytes();
    if bytes.is_empty() || bytes.contains(&b'/') || bytes == b"." || bytes == b".." {
        return Err(io::Error::from(io::ErrorKind::InvalidInput).into());
    }

    if !flags.remove_root {
        return Err(Error::Config("remove_child requires remove_root"));
    }
    if flags.missing_ok || flags.only_directories || flags.subvolumes {
        return Err(Error::Config(
            "remove_child supports neither missing_ok, only_directories nor subvolumes",
        ));
    }

    if !flags.physical {
        let kind = probe.fs_kind(parent)?;
        if kind.is_pseudo() {
            return Err(Error::UnsafeFilesystem(kind));
        }
    }

    walk::remove_entry(probe, parent, name, None, flags, None)
}

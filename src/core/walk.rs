// Copyright 2026 Scythe Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! The recursive walker. Each level owns exactly one directory handle,
//! consumes it, and reports the first substantive error it saw while
//! still attempting every sibling.

use std::ffi::CStr;
use std::io;
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};

use rustix::fs::{AtFlags, Dir, FileType};

use crate::core::repair;
use crate::error::{self, Error};
use crate::flags::RemoveFlags;
use crate::sys::{FsProbe, fdio};

/// First-error accumulator. NotFound is never recorded; a concurrent
/// remover winning a race is success, not failure.
struct Outcome {
    first: Option<Error>,
}

impl Outcome {
    fn new() -> Self {
        Self { first: None }
    }

    fn record(&mut self, err: Error) {
        if err.is_not_found() {
            tracing::debug!("entry vanished during removal, tolerating");
            return;
        }
        if self.first.is_none() {
            self.first = Some(err);
        }
    }

    fn record_io(&mut self, err: io::Error) {
        self.record(Error::Io(err));
    }

    fn into_result(self) -> Result<(), Error> {
        match self.first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Remove everything beneath `dir`, leaving `dir` itself in place.
///
/// `root_dev` pins the descent to one device: directories on any other
/// device are skipped outright. The handle is consumed and closed on
/// every path.
pub fn remove_dir_contents(
    probe: &dyn FsProbe,
    dir: OwnedFd,
    flags: RemoveFlags,
    root_dev: Option<u64>,
) -> Result<(), Error> {
    flags.validate()?;
    remove_children(probe, dir, flags, root_dev, false)
}

pub(crate) fn remove_children(
    probe: &dyn FsProbe,
    dir: OwnedFd,
    flags: RemoveFlags,
    root_dev: Option<u64>,
    validated: bool,
) -> Result<(), Error> {
    // A filesystem-type violation aborts outright, never best-effort.
    // The check holds transitively for children opened from this
    // handle, so recursion passes `validated`.
    if !validated && !flags.physical {
        let kind = probe.fs_kind(dir.as_fd())?;
        if kind.is_pseudo() {
            return Err(Error::UnsafeFilesystem(kind));
        }
    }

    let iter = match Dir::read_from(dir.as_fd()) {
        Ok(iter) => iter,
        Err(e) if e == rustix::io::Errno::NOENT => return Ok(()),
        Err(e) => return Err(io::Error::from(e).into()),
    };

    let mut outcome = Outcome::new();
    for entry in iter {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                outcome.record_io(e.into());
                break;
            }
        };
        let name = entry.file_name();
        if name == c"." || name == c".." {
            continue;
        }
        let is_dir = match entry.file_type() {
            FileType::Directory => Some(true),
            FileType::Unknown => None,
            _ => Some(false),
        };
        if let Err(e) = remove_entry(probe, dir.as_fd(), name, is_dir, flags, root_dev) {
            outcome.record(e);
        }
    }

    drop(dir);
    outcome.into_result()
}

/// Remove one named entry beneath `parent`, recursing if it is a
/// directory. `is_dir` carries the type reported by directory
/// iteration when it was reliable.
pub(crate) fn remove_entry(
    probe: &dyn FsProbe,
    parent: BorrowedFd,
    name: &CStr,
    is_dir: Option<bool>,
    flags: RemoveFlags,
    root_dev: Option<u64>,
) -> Result<(), Error> {
    let mut is_dir = is_dir;
    let mut entry_dev = None;

    // Device pinning and subvolume detection both need real stat data,
    // as does an iteration primitive that reported Unknown.
    if is_dir.is_none() || (is_dir == Some(true) && (root_dev.is_some() || flags.subvolumes)) {
        let st = repair::stat_entry(parent, name, flags)?;
        is_dir = Some(FileType::from_raw_mode(st.st_mode) == FileType::Directory);
        entry_dev = Some(st.st_dev);
    }

    if is_dir != Some(true) {
        if flags.only_directories {
            return Ok(());
        }
        repair::unlink_entry(parent, name, AtFlags::empty(), flags)?;
        return Ok(());
    }

    if let (Some(root), Some(dev)) = (root_dev, entry_dev) {
        if dev != root {
            tracing::debug!(name = ?name, "entry is on a different device, skipping");
            return Ok(());
        }
    }

    let child = fdio::open_dir_at(parent, name)?;

    if probe.is_mount_point(parent, name)? {
        tracing::debug!(name = ?name, "entry is a mount point, skipping");
        return Ok(());
    }

    if flags.subvolumes && probe.remove_subvolume_at(parent, name)? {
        return Ok(());
    }

    let mut result = remove_children(probe, child, flags, root_dev, true);

    match repair::unlink_entry(parent, name, AtFlags::REMOVEDIR, flags) {
        Ok(()) => {}
        Err(e) if error::not_found(&e) => {}
        Err(e) => {
            if result.is_ok() {
                result = Err(e.into());
            }
        }
    }
    result
}

//! Permission repair. When an operation under `parent` fails with
//! `EACCES`/`EPERM` and the caller opted in, widen the parent's owner
//! bits and retry once. The widened mode is restored if the retry still
//! fails and kept if it succeeds, since the directory is about to be
//! removed anyway.

use std::ffi::CStr;
use std::io;
use std::os::fd::BorrowedFd;

use rustix::fs::{self, AtFlags, FileType, Mode, Stat};
use rustix::process::geteuid;

use crate::flags::RemoveFlags;

/// Try to chmod `parent` to at least 0700. Returns the previous mode
/// when a widening actually happened, `None` when repair does not apply
/// (not self-owned, already wide enough, or the chmod itself failed).
fn widen_owner_bits(parent: BorrowedFd) -> io::Result<Option<Mode>> {
    let st = match fs::fstat(parent) {
        Ok(st) => st,
        Err(_) => return Ok(None),
    };
    if FileType::from_raw_mode(st.st_mode) != FileType::Directory {
        return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
    }
    let mode = Mode::from_bits_truncate(st.st_mode & 0o7777);
    if mode.contains(Mode::RWXU) {
        return Ok(None);
    }
    if st.st_uid != geteuid().as_raw() {
        return Ok(None);
    }
    if fs::fchmod(parent, mode | Mode::RWXU).is_err() {
        return Ok(None);
    }
    tracing::debug!(old_mode = st.st_mode & 0o7777, "widened directory mode for retry");
    Ok(Some(mode))
}

/// Run `op`, retrying once behind a mode widening of `parent` when it
/// hits a permission error and `chmod_repair` is set.
pub(crate) fn with_access_repair<T>(
    parent: BorrowedFd,
    flags: RemoveFlags,
    op: impl Fn() -> io::Result<T>,
) -> io::Result<T> {
    let err = match op() {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    if !flags.chmod_repair || err.kind() != io::ErrorKind::PermissionDenied {
        return Err(err);
    }
    let Some(old_mode) = widen_owner_bits(parent)? else {
        return Err(err);
    };
    match op() {
        Ok(value) => Ok(value),
        Err(retry_err) => {
            let _ = fs::fchmod(parent, old_mode);
            Err(retry_err)
        }
    }
}

pub(crate) fn unlink_entry(
    parent: BorrowedFd,
    name: &CStr,
    at: AtFlags,
    flags: RemoveFlags,
) -> io::Result<()> {
    with_access_repair(parent, flags, || {
        fs::unlinkat(parent, name, at).map_err(io::Error::from)
    })
}

pub(crate) fn stat_entry(
    parent: BorrowedFd,
    name: &CStr,
    flags: RemoveFlags,
) -> io::Result<Stat> {
    with_access_repair(parent, flags, || {
        fs::statat(parent, name, AtFlags::SYMLINK_NOFOLLOW).map_err(io::Error::from)
    })
}

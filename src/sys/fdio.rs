//! Directory handle plumbing. Every open here is fd-relative and
//! `O_NOFOLLOW`, so a path component swapped for a symlink mid-walk
//! cannot redirect the removal outside the tree.

use std::ffi::CStr;
use std::io;
use std::os::fd::{BorrowedFd, OwnedFd};
use std::path::Path;

use rustix::fs::{self, AtFlags, Mode, OFlags, Stat};

const DIR_OPEN: OFlags = OFlags::RDONLY
    .union(OFlags::NONBLOCK)
    .union(OFlags::DIRECTORY)
    .union(OFlags::CLOEXEC)
    .union(OFlags::NOFOLLOW);

/// `O_NOATIME` is owner-or-privileged only; retry without it rather
/// than failing the whole removal on someone else's files.
fn open_noatime(do_open: impl Fn(OFlags) -> rustix::io::Result<OwnedFd>) -> io::Result<OwnedFd> {
    match do_open(DIR_OPEN | OFlags::NOATIME) {
        Ok(fd) => Ok(fd),
        Err(e) if e == rustix::io::Errno::PERM => Ok(do_open(DIR_OPEN)?),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn open_dir(path: &Path) -> io::Result<OwnedFd> {
    open_noatime(|flags| fs::open(path, flags, Mode::empty()))
}

pub(crate) fn open_dir_at(parent: BorrowedFd, name: &CStr) -> io::Result<OwnedFd> {
    open_noatime(|flags| fs::openat(parent, name, flags, Mode::empty()))
}

pub(crate) fn stat_at(parent: BorrowedFd, name: &CStr) -> io::Result<Stat> {
    Ok(fs::statat(parent, name, AtFlags::SYMLINK_NOFOLLOW)?)
}

/// The root test deliberately does not canonicalize: a missing path is
/// not the root, and `..` games are the caller's problem.
pub(crate) fn is_fs_root(path: &Path) -> io::Result<bool> {
    if path == Path::new("/") {
        return Ok(true);
    }
    let target = match fs::lstat(path) {
        Ok(st) => st,
        Err(e) if e == rustix::io::Errno::NOENT => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    let root = fs::stat("/")?;
    Ok(target.st_dev == root.st_dev && target.st_ino == root.st_ino)
}

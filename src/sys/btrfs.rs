//! Btrfs subvolume removal. A subvolume cannot be rmdir'd; destroying
//! the snapshot through the ioctl drops the whole subtree in one
//! kernel-side operation.

use std::ffi::{CStr, CString};
use std::io;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use rustix::fs::{self, FileType};

use crate::defs::{BTRFS_FIRST_FREE_OBJECTID, BTRFS_PATH_NAME_MAX};
use crate::sys::{fdio, magic};

#[repr(C)]
struct BtrfsVolArgs {
    fd: i64,
    name: [libc::c_char; BTRFS_PATH_NAME_MAX + 1],
}

nix::ioctl_write_ptr!(btrfs_snap_destroy, 0x94, 15, BtrfsVolArgs);

/// Destroy `name` under `parent` if it is a btrfs subvolume root.
///
/// `Ok(false)` covers every "not applicable" case: not a directory, not
/// inode 256, not on btrfs, or a filesystem that rejects the ioctl.
pub(crate) fn remove_subvolume_at(parent: BorrowedFd, name: &CStr) -> io::Result<bool> {
    let st = fdio::stat_at(parent, name)?;
    if FileType::from_raw_mode(st.st_mode) != FileType::Directory
        || st.st_ino != BTRFS_FIRST_FREE_OBJECTID
    {
        return Ok(false);
    }

    let child = fdio::open_dir_at(parent, name)?;
    let sfs = fs::fstatfs(child.as_fd())?;
    if !magic::is_btrfs(&sfs) {
        return Ok(false);
    }
    drop(child);

    let bytes = name.to_bytes();
    if bytes.len() > BTRFS_PATH_NAME_MAX {
        return Err(io::Error::from_raw_os_error(libc::ENAMETOOLONG));
    }

    let mut args = BtrfsVolArgs {
        fd: 0,
        name: [0; BTRFS_PATH_NAME_MAX + 1],
    };
    for (dst, src) in args.name.iter_mut().zip(bytes) {
        *dst = *src as libc::c_char;
    }

    match unsafe { btrfs_snap_destroy(parent.as_raw_fd(), &args) } {
        Ok(_) => {
            tracing::debug!(name = ?name, "destroyed btrfs subvolume");
            Ok(true)
        }
        Err(e) if e == nix::errno::Errno::ENOTTY || e == nix::errno::Errno::EINVAL => Ok(false),
        Err(e) => Err(io::Error::from_raw_os_error(e as i32)),
    }
}

pub(crate) fn remove_subvolume_tree(path: &Path) -> io::Result<bool> {
    let Some(name) = path.file_name() else {
        return Ok(false);
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = CString::new(name.as_bytes())
        .map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;

    let parent_fd = fdio::open_dir(parent)?;
    remove_subvolume_at(parent_fd.as_fd(), &name)
}

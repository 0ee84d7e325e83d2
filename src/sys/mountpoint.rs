//! Mount boundary detection, fd-relative so the answer applies to the
//! entry we are about to act on and not to whatever a racing rename put
//! at the same path.

use std::ffi::CStr;
use std::io;
use std::os::fd::BorrowedFd;

use rustix::fs::{self, AtFlags, StatxFlags};

use crate::defs::STATX_ATTR_MOUNT_ROOT;
use crate::sys::fdio;

pub(crate) fn is_mount_point(parent: BorrowedFd, name: &CStr) -> io::Result<bool> {
    match fs::statx(
        parent,
        name,
        AtFlags::SYMLINK_NOFOLLOW,
        StatxFlags::empty(),
    ) {
        Ok(stx) => {
            // Only trust the attribute when the kernel says it set it;
            // older kernels leave the bit clear without meaning "no".
            if stx.stx_attributes_mask.bits() & STATX_ATTR_MOUNT_ROOT != 0 {
                return Ok(stx.stx_attributes.bits() & STATX_ATTR_MOUNT_ROOT != 0);
            }
        }
        Err(e) if e == rustix::io::Errno::NOSYS => {}
        Err(e) => return Err(e.into()),
    }

    // Pre-statx fallback: a child on a different device is a mount.
    // Bind mounts of the same filesystem slip through this check.
    let parent_stat = fs::fstat(parent)?;
    let child_stat = fdio::stat_at(parent, name)?;
    Ok(child_stat.st_dev != parent_stat.st_dev)
}

// Scythe Constants

// Filesystem magic words as reported in statfs f_type.
pub const TMPFS_MAGIC: u32 = 0x0102_1994;
pub const RAMFS_MAGIC: u32 = 0x8584_58f6;
pub const CGROUP_SUPER_MAGIC: u32 = 0x0027_e0eb;
pub const CGROUP2_SUPER_MAGIC: u32 = 0x6367_7270;
pub const BTRFS_SUPER_MAGIC: u32 = 0x9123_683e;

// First objectid available for regular inodes; subvolume roots always
// carry this inode number.
pub const BTRFS_FIRST_FREE_OBJECTID: u64 = 256;

// BTRFS_IOC_SNAP_DESTROY takes a name of at most this many bytes.
pub const BTRFS_PATH_NAME_MAX: usize = 4087;

// statx attribute: the inode is the root of a mount.
pub const STATX_ATTR_MOUNT_ROOT: u64 = 0x2000;

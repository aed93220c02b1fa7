//! Effective-permission filesystem probes.

use std::path::Path;

/// Check whether the current process can write to a path.
///
/// Uses `access(2)` so the answer reflects the effective uid, including
/// setuid and group-writable cases that permission-bit inspection misses.
#[cfg(unix)]
pub fn is_path_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

/// On non-unix platforms, fall back to the read-only metadata flag.
#[cfg(not(unix))]
pub fn is_path_writable(path: &Path) -> bool {
    path.metadata()
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

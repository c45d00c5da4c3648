//! Raw add_key(2) / keyctl(2) wrappers
//!
//! Each wrapper issues exactly one syscall per attempt, treats a strictly
//! negative return as failure, and captures errno immediately, before any
//! other operation can clobber it. Variable-length replies use the kernel's
//! two-phase protocol: a null-buffer probe for the size, then a fill of an
//! owned buffer of that size.

use keyctl_api::Errno;
use libc::c_long;
use std::ffi::{CStr, CString};
use std::io;
use std::ptr;

const KEYCTL_UPDATE: c_long = libc::KEYCTL_UPDATE as c_long;
const KEYCTL_REVOKE: c_long = libc::KEYCTL_REVOKE as c_long;
const KEYCTL_DESCRIBE: c_long = libc::KEYCTL_DESCRIBE as c_long;
const KEYCTL_CLEAR: c_long = libc::KEYCTL_CLEAR as c_long;
const KEYCTL_LINK: c_long = libc::KEYCTL_LINK as c_long;
const KEYCTL_UNLINK: c_long = libc::KEYCTL_UNLINK as c_long;
const KEYCTL_SEARCH: c_long = libc::KEYCTL_SEARCH as c_long;
const KEYCTL_READ: c_long = libc::KEYCTL_READ as c_long;
const KEYCTL_SET_TIMEOUT: c_long = libc::KEYCTL_SET_TIMEOUT as c_long;

fn last_errno() -> Errno {
    Errno(
        io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(libc::EINVAL),
    )
}

/// Converts a host string into an owned NUL-terminated buffer.
///
/// An interior NUL cannot cross the syscall boundary; it fails as EINVAL
/// before any kernel call is made.
pub fn to_cstring(value: &str) -> Result<CString, Errno> {
    CString::new(value).map_err(|_| Errno(libc::EINVAL))
}

/// One keyctl(2) invocation with errno captured on failure.
///
/// errno is read before the trace line; a logger may itself make calls
/// that set it.
unsafe fn keyctl(cmd: c_long, arg2: c_long, arg3: c_long, arg4: c_long) -> Result<c_long, Errno> {
    let ret = libc::syscall(libc::SYS_keyctl, cmd, arg2, arg3, arg4, 0 as c_long);
    let errno = if ret < 0 { Some(last_errno()) } else { None };
    log::trace!("keyctl(cmd={}, arg2={}) -> {}", cmd, arg2, ret);
    match errno {
        Some(errno) => Err(errno),
        None => Ok(ret),
    }
}

/// add_key(2): create or update a key and link it into `keyring`.
///
/// `payload` is the exact logical byte count; an empty payload passes a null
/// pointer, matching key types that instantiate without data.
pub fn add_key(
    key_type: &CStr,
    description: &CStr,
    payload: &[u8],
    keyring: i32,
) -> Result<i32, Errno> {
    let payload_ptr = if payload.is_empty() {
        ptr::null()
    } else {
        payload.as_ptr()
    };
    let ret = unsafe {
        libc::syscall(
            libc::SYS_add_key,
            key_type.as_ptr(),
            description.as_ptr(),
            payload_ptr,
            payload.len(),
            keyring as c_long,
        )
    };
    let errno = if ret < 0 { Some(last_errno()) } else { None };
    log::trace!(
        "add_key(type={:?}, keyring={}) -> {}",
        key_type,
        keyring,
        ret
    );
    match errno {
        Some(errno) => Err(errno),
        None => Ok(ret as i32),
    }
}

/// KEYCTL_UPDATE: replace a key's payload
pub fn keyctl_update(key: i32, payload: &[u8]) -> Result<(), Errno> {
    let payload_ptr = if payload.is_empty() {
        ptr::null::<u8>()
    } else {
        payload.as_ptr()
    };
    unsafe {
        keyctl(
            KEYCTL_UPDATE,
            key as c_long,
            payload_ptr as c_long,
            payload.len() as c_long,
        )?;
    }
    Ok(())
}

/// KEYCTL_LINK: link `key` into `keyring`
pub fn keyctl_link(key: i32, keyring: i32) -> Result<(), Errno> {
    unsafe { keyctl(KEYCTL_LINK, key as c_long, keyring as c_long, 0)? };
    Ok(())
}

/// KEYCTL_UNLINK: remove the link to `key` from `keyring`
pub fn keyctl_unlink(key: i32, keyring: i32) -> Result<(), Errno> {
    unsafe { keyctl(KEYCTL_UNLINK, key as c_long, keyring as c_long, 0)? };
    Ok(())
}

/// KEYCTL_DESCRIBE with kernel-sized allocation.
///
/// The reply is NUL-terminated text; the terminator is stripped before the
/// string is handed out. If the description grows between the size probe and
/// the fill, the fill reports the larger size and the probe is repeated.
pub fn keyctl_describe_alloc(key: i32) -> Result<String, Errno> {
    let raw = read_two_phase(KEYCTL_DESCRIBE, key)?;
    describe_reply_to_string(raw)
}

/// Strips the reply's single trailing NUL and insists on UTF-8.
///
/// Descriptions are caller-chosen bytes; a reply that is not valid UTF-8
/// cannot be carried verbatim in a String, so it fails as EINVAL rather
/// than being rewritten with replacement characters.
fn describe_reply_to_string(mut raw: Vec<u8>) -> Result<String, Errno> {
    if raw.last() == Some(&0) {
        raw.pop();
    }
    String::from_utf8(raw).map_err(|_| Errno(libc::EINVAL))
}

/// KEYCTL_READ with kernel-sized allocation; nothing is stripped
pub fn keyctl_read_alloc(key: i32) -> Result<Vec<u8>, Errno> {
    read_two_phase(KEYCTL_READ, key)
}

fn read_two_phase(cmd: c_long, key: i32) -> Result<Vec<u8>, Errno> {
    let mut needed = unsafe { keyctl(cmd, key as c_long, 0, 0)? } as usize;
    loop {
        if needed == 0 {
            return Ok(Vec::new());
        }
        let mut buffer = vec![0u8; needed];
        let got = unsafe {
            keyctl(
                cmd,
                key as c_long,
                buffer.as_mut_ptr() as c_long,
                buffer.len() as c_long,
            )?
        } as usize;
        if got <= buffer.len() {
            buffer.truncate(got);
            return Ok(buffer);
        }
        // Payload grew between the phases; retry at the reported size
        needed = got;
    }
}

/// KEYCTL_SEARCH: recursive search, optionally linking into `destination`
pub fn keyctl_search(
    keyring: i32,
    key_type: &CStr,
    description: &CStr,
    destination: i32,
) -> Result<i32, Errno> {
    let ret = unsafe {
        libc::syscall(
            libc::SYS_keyctl,
            KEYCTL_SEARCH,
            keyring as c_long,
            key_type.as_ptr(),
            description.as_ptr(),
            destination as c_long,
        )
    };
    let errno = if ret < 0 { Some(last_errno()) } else { None };
    log::trace!(
        "keyctl_search(keyring={}, type={:?}) -> {}",
        keyring,
        key_type,
        ret
    );
    match errno {
        Some(errno) => Err(errno),
        None => Ok(ret as i32),
    }
}

/// KEYCTL_CLEAR: unlink every member of `keyring`
pub fn keyctl_clear(keyring: i32) -> Result<(), Errno> {
    unsafe { keyctl(KEYCTL_CLEAR, keyring as c_long, 0, 0)? };
    Ok(())
}

/// KEYCTL_SET_TIMEOUT: arm (or with zero, cancel) a key's expiration timer
pub fn keyctl_set_timeout(key: i32, timeout_seconds: u32) -> Result<(), Errno> {
    unsafe {
        keyctl(
            KEYCTL_SET_TIMEOUT,
            key as c_long,
            timeout_seconds as c_long,
            0,
        )?
    };
    Ok(())
}

/// KEYCTL_REVOKE: mark a key revoked
pub fn keyctl_revoke(key: i32) -> Result<(), Errno> {
    unsafe { keyctl(KEYCTL_REVOKE, key as c_long, 0, 0)? };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cstring_owns_terminated_copy() {
        let c = to_cstring("user").unwrap();
        assert_eq!(c.as_bytes_with_nul(), b"user\0");
    }

    #[test]
    fn test_to_cstring_rejects_interior_nul_before_any_call() {
        assert_eq!(to_cstring("us\0er").unwrap_err(), Errno(libc::EINVAL));
    }

    #[test]
    fn test_describe_reply_strips_only_the_trailing_nul() {
        let reply = b"user;1000;1000;3f010000;d\0".to_vec();
        assert_eq!(
            describe_reply_to_string(reply).unwrap(),
            "user;1000;1000;3f010000;d"
        );
        // Without a terminator nothing is stripped
        let reply = b"user;0;0;3f;d".to_vec();
        assert_eq!(describe_reply_to_string(reply).unwrap(), "user;0;0;3f;d");
    }

    #[test]
    fn test_describe_reply_rejects_non_utf8_instead_of_rewriting() {
        let reply = b"user;0;0;3f;\xff\xfe\0".to_vec();
        assert_eq!(
            describe_reply_to_string(reply).unwrap_err(),
            Errno(libc::EINVAL)
        );
    }
}

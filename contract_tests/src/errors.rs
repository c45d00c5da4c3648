//! Error surface contract tests
//!
//! These tests pin the closed set of named error conditions, their errno
//! mapping, the umbrella group, and the message format hosts parse.

use keyctl_api::ErrorCondition;

// ===== Canonical Error Table =====

/// Every named condition with the errno it maps from.
///
/// This set is closed: an errno outside it surfaces as a generic OS error,
/// never as a new name.
pub const ERROR_CONTRACT: [(&str, i32); 12] = [
    ("access-denied", libc::EACCES),
    ("permission-denied", libc::EPERM),
    ("invalid-argument", libc::EINVAL),
    ("key-expired", libc::EKEYEXPIRED),
    ("key-rejected", libc::EKEYREJECTED),
    ("key-revoked", libc::EKEYREVOKED),
    ("operation-not-supported", libc::EOPNOTSUPP),
    ("key-not-found", libc::ENOKEY),
    ("out-of-memory", libc::ENOMEM),
    ("quota-exceeded", libc::EDQUOT),
    ("interrupted", libc::EINTR),
    ("not-a-directory", libc::ENOTDIR),
];

// ===== Contract Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use host_bridge::{error_registrations, ERROR_GROUP};
    use keyctl_api::{Errno, KeyError};

    #[test]
    fn test_condition_names_and_errno_mapping_are_stable() {
        assert_eq!(ErrorCondition::ALL.len(), ERROR_CONTRACT.len());
        for (condition, (name, errno)) in ErrorCondition::ALL.iter().zip(ERROR_CONTRACT) {
            assert_eq!(condition.name(), name);
            assert_eq!(condition.errno(), errno);
            assert_eq!(ErrorCondition::from_errno(Errno(errno)), Some(*condition));
        }
    }

    #[test]
    fn test_unlisted_errno_never_gains_a_name() {
        for errno in [libc::EIO, libc::ENODEV, libc::EBADF, libc::EAGAIN] {
            assert_eq!(ErrorCondition::from_errno(Errno(errno)), None);
        }
    }

    #[test]
    fn test_group_name_is_stable() {
        assert_eq!(ERROR_GROUP, "keyctl-errors");
        for registration in error_registrations() {
            assert_eq!(registration.group, ERROR_GROUP);
        }
    }

    #[test]
    fn test_registrations_cover_every_condition_once() {
        let registrations = error_registrations();
        assert_eq!(registrations.len(), ERROR_CONTRACT.len());
        for ((name, _), registration) in ERROR_CONTRACT.iter().zip(&registrations) {
            assert_eq!(registration.name, *name);
            assert!(
                !registration.description.is_empty(),
                "description missing for {}",
                name
            );
        }
    }

    #[test]
    fn test_message_format_is_condition_colon_context() {
        let err = KeyError::from_errno(Errno(libc::EACCES), "keyctl_read");
        assert_eq!(err.to_string(), "access-denied: keyctl_read");
    }

    #[test]
    fn test_generic_message_format_is_strerror_colon_context() {
        let err = KeyError::from_errno(Errno(libc::ENODEV), "add_key");
        match err {
            KeyError::Os { errno, ref message } => {
                assert_eq!(errno, libc::ENODEV);
                let (strerror, context) = message.rsplit_once(": ").unwrap();
                assert_eq!(context, "add_key");
                assert!(!strerror.is_empty());
            }
            other => panic!("expected Os error, got {:?}", other),
        }
    }
}

//! Real-kernel integration tests.
//!
//! These talk to the running kernel's session keyring, so they are ignored
//! by default; whether add_key(2) is permitted depends on the sandbox and
//! seccomp profile of the test environment. Run with:
//!
//! ```text
//! cargo test -p keyctl_linux -- --ignored
//! ```

use key_types::KeySerial;
use keyctl_api::{ErrorCondition, KeyService};
use keyctl_linux::LinuxKeyFacility;

fn service() -> KeyService<LinuxKeyFacility> {
    KeyService::new(LinuxKeyFacility::new())
}

#[test]
#[ignore]
fn test_add_read_revoke_round_trip() {
    let mut service = service();
    let key = service
        .add_key(
            "user",
            "keyctl-linux-test-rtr",
            b"hello",
            KeySerial::SESSION_KEYRING,
        )
        .unwrap();
    assert!(key.raw() > 0);

    assert_eq!(service.read(key).unwrap(), b"hello");

    service.revoke(key).unwrap();
    let err = service.read(key).unwrap_err();
    assert_eq!(err.condition(), Some(ErrorCondition::KeyRevoked));
}

#[test]
#[ignore]
fn test_payload_with_embedded_nuls_survives() {
    let mut service = service();
    let payload = b"ab\0cd\0";
    let key = service
        .add_key(
            "user",
            "keyctl-linux-test-nul",
            payload,
            KeySerial::SESSION_KEYRING,
        )
        .unwrap();
    assert_eq!(service.read(key).unwrap(), payload);
    service.unlink(key, KeySerial::SESSION_KEYRING).unwrap();
}

#[test]
#[ignore]
fn test_keyring_list_and_clear() {
    let mut service = service();
    let ring = service
        .new_keyring("keyctl-linux-test-ring", KeySerial::SESSION_KEYRING)
        .unwrap();
    let key = service.add_key("user", "member", b"p", ring).unwrap();

    assert_eq!(service.list(ring).unwrap(), vec![key]);

    service.clear(ring).unwrap();
    assert_eq!(service.list(ring).unwrap(), Vec::new());

    service.unlink(ring, KeySerial::SESSION_KEYRING).unwrap();
}

#[test]
#[ignore]
fn test_search_miss_is_key_not_found() {
    let mut service = service();
    let err = service
        .search(
            KeySerial::SESSION_KEYRING,
            "user",
            "keyctl-linux-test-nonexistent",
            None,
        )
        .unwrap_err();
    assert_eq!(err.condition(), Some(ErrorCondition::KeyNotFound));
}

#[test]
#[ignore]
fn test_describe_reports_user_type() {
    let mut service = service();
    let key = service
        .add_key(
            "user",
            "keyctl-linux-test-desc",
            b"p",
            KeySerial::SESSION_KEYRING,
        )
        .unwrap();
    let description = service.describe(key).unwrap();
    assert_eq!(description.key_type, "user");
    assert_eq!(description.description, "keyctl-linux-test-desc");
    service.unlink(key, KeySerial::SESSION_KEYRING).unwrap();
}

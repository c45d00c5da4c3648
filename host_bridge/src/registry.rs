//! The registered surface: operations, constants, error conditions

use key_types::KeySerial;
use keyctl_api::ErrorCondition;

/// The umbrella error group every condition is layered under
pub const ERROR_GROUP: &str = "keyctl-errors";

/// A named operation with its declared arity and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    /// Documented operation name
    pub name: &'static str,
    /// Minimum argument count
    pub min_args: usize,
    /// Maximum argument count
    pub max_args: usize,
    /// Host-facing documentation
    pub doc: &'static str,
}

/// A named integer constant for a well-known keyring sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantSpec {
    pub name: &'static str,
    pub value: i64,
    pub doc: &'static str,
}

/// A named error condition paired with its OS description at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRegistration {
    pub name: &'static str,
    pub description: String,
    pub group: &'static str,
}

/// Every operation, in registration order. Only `search` has an optional
/// trailing argument.
pub const OPERATIONS: [OperationSpec; 13] = [
    OperationSpec {
        name: "add-key",
        min_args: 4,
        max_args: 4,
        doc: "(add-key type description payload keyring)\n\n\
              Asks the kernel to create or update a key of the given type and \
              description, instantiate it with the payload, attach it to the \
              nominated keyring and return its serial number.",
    },
    OperationSpec {
        name: "new-keyring",
        min_args: 2,
        max_args: 2,
        doc: "(new-keyring name keyring)\n\n\
              Creates a new keyring of the specified name and attaches it to \
              the specified keyring. Returns the serial of the new keyring.",
    },
    OperationSpec {
        name: "update-key",
        min_args: 2,
        max_args: 2,
        doc: "(update-key key payload)\n\n\
              Replaces the data attached to a key with a new set of data.",
    },
    OperationSpec {
        name: "link",
        min_args: 2,
        max_args: 2,
        doc: "(link key keyring)\n\n\
              Makes a link from the key to the keyring if there's enough \
              capacity to do so.",
    },
    OperationSpec {
        name: "unlink",
        min_args: 2,
        max_args: 2,
        doc: "(unlink key keyring)\n\n\
              Removes a link to the key from the keyring.",
    },
    OperationSpec {
        name: "raw-describe",
        min_args: 1,
        max_args: 1,
        doc: "(raw-describe key)\n\n\
              Returns the raw description of a key. The returned string is \
              \"<type>;<uid>;<gid>;<perm>;<description>\".",
    },
    OperationSpec {
        name: "describe",
        min_args: 1,
        max_args: 1,
        doc: "(describe key)\n\n\
              Returns the description of a key as a 5-element tuple: \
              [type uid gid perm description].",
    },
    OperationSpec {
        name: "read",
        min_args: 1,
        max_args: 1,
        doc: "(read key)\n\n\
              Returns the payload of a key.",
    },
    OperationSpec {
        name: "list",
        min_args: 1,
        max_args: 1,
        doc: "(list keyring)\n\n\
              Returns the serials of the keys attached to a keyring.",
    },
    OperationSpec {
        name: "search",
        min_args: 3,
        max_args: 4,
        doc: "(search keyring type description &optional dest-keyring)\n\n\
              Recursively searches a keyring for a key of a particular type \
              and description; attaches it to dest-keyring if present.",
    },
    OperationSpec {
        name: "clear",
        min_args: 1,
        max_args: 1,
        doc: "(clear keyring)\n\n\
              Unlinks all the keys attached to the specified keyring.",
    },
    OperationSpec {
        name: "set-timeout",
        min_args: 2,
        max_args: 2,
        doc: "(set-timeout key timeout)\n\n\
              Sets the expiration timer on a key to timeout seconds into the \
              future. Setting timeout to zero cancels the expiration.",
    },
    OperationSpec {
        name: "revoke",
        min_args: 1,
        max_args: 1,
        doc: "(revoke key)\n\n\
              Marks a key as being revoked. Any further access will meet the \
              key-revoked error condition.",
    },
];

/// The six well-known keyring sentinels
pub const CONSTANTS: [ConstantSpec; 6] = [
    ConstantSpec {
        name: "KEY-SPEC-THREAD-KEYRING",
        value: KeySerial::THREAD_KEYRING.raw() as i64,
        doc: "serial for the thread-specific keyring",
    },
    ConstantSpec {
        name: "KEY-SPEC-PROCESS-KEYRING",
        value: KeySerial::PROCESS_KEYRING.raw() as i64,
        doc: "serial for the process-specific keyring",
    },
    ConstantSpec {
        name: "KEY-SPEC-SESSION-KEYRING",
        value: KeySerial::SESSION_KEYRING.raw() as i64,
        doc: "serial for the session-specific keyring",
    },
    ConstantSpec {
        name: "KEY-SPEC-USER-SESSION-KEYRING",
        value: KeySerial::USER_SESSION_KEYRING.raw() as i64,
        doc: "serial for the UID-session keyring",
    },
    ConstantSpec {
        name: "KEY-SPEC-USER-KEYRING",
        value: KeySerial::USER_KEYRING.raw() as i64,
        doc: "serial for the UID-specific keyring",
    },
    ConstantSpec {
        name: "KEY-SPEC-GROUP-KEYRING",
        value: KeySerial::GROUP_KEYRING.raw() as i64,
        doc: "serial for the GID-specific keyring",
    },
];

/// Looks up an operation by its registered name
pub fn operation(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|spec| spec.name == name)
}

/// The error conditions to register, each under the umbrella group and
/// carrying its OS description captured at call time.
pub fn error_registrations() -> Vec<ErrorRegistration> {
    ErrorCondition::ALL
        .iter()
        .map(|condition| ErrorRegistration {
            name: condition.name(),
            description: condition.os_description(),
            group: ERROR_GROUP,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_lookup() {
        assert_eq!(operation("add-key").unwrap().min_args, 4);
        assert!(operation("steal-key").is_none());
    }

    #[test]
    fn test_only_search_has_optional_argument() {
        for spec in &OPERATIONS {
            if spec.name == "search" {
                assert_eq!((spec.min_args, spec.max_args), (3, 4));
            } else {
                assert_eq!(spec.min_args, spec.max_args, "{}", spec.name);
            }
        }
    }

    #[test]
    fn test_constants_cover_the_six_sentinels() {
        let values: Vec<i64> = CONSTANTS.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![-1, -2, -3, -5, -4, -6]);
    }

    #[test]
    fn test_error_registrations_carry_descriptions() {
        let registrations = error_registrations();
        assert_eq!(registrations.len(), 12);
        for registration in &registrations {
            assert_eq!(registration.group, ERROR_GROUP);
            assert!(!registration.description.is_empty());
        }
    }
}

//! Dispatch from named operations to typed calls

use crate::error::BridgeError;
use crate::registry::{self, OperationSpec};
use crate::value::Value;
use key_types::KeySerial;
use keyctl_api::{KeyFacility, KeyService};

/// Executes registered operations against a key facility.
///
/// Dispatch checks arity against the operation's declared bounds, converts
/// every argument (left to right, all conversions before any kernel call),
/// invokes the typed wrapper, and boxes the result back into a [`Value`].
pub struct Bridge<F: KeyFacility> {
    service: KeyService<F>,
}

impl<F: KeyFacility> Bridge<F> {
    /// Creates a bridge over the given facility
    pub fn new(facility: F) -> Self {
        log::debug!(
            "key bridge ready: {} operations, {} constants, {} error conditions under {}",
            registry::OPERATIONS.len(),
            registry::CONSTANTS.len(),
            keyctl_api::ErrorCondition::ALL.len(),
            registry::ERROR_GROUP,
        );
        Self {
            service: KeyService::new(facility),
        }
    }

    /// The typed service underneath
    pub fn service(&self) -> &KeyService<F> {
        &self.service
    }

    /// The typed service underneath, mutably
    pub fn service_mut(&mut self) -> &mut KeyService<F> {
        &mut self.service
    }

    /// Invokes the operation registered under `name`
    pub fn dispatch(&mut self, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
        let spec = registry::operation(name)
            .ok_or_else(|| BridgeError::UnknownOperation(name.to_string()))?;
        if args.len() < spec.min_args || args.len() > spec.max_args {
            return Err(BridgeError::Arity {
                operation: spec.name,
                min: spec.min_args,
                max: spec.max_args,
                got: args.len(),
            });
        }

        match spec.name {
            "add-key" => {
                let key_type = text_arg(spec, args, 0)?;
                let description = text_arg(spec, args, 1)?;
                let payload = bytes_arg(spec, args, 2)?;
                let keyring = serial_arg(spec, args, 3)?;
                let key = self
                    .service
                    .add_key(key_type, description, payload, keyring)?;
                Ok(Value::Int(key.raw() as i64))
            }
            "new-keyring" => {
                let name = text_arg(spec, args, 0)?;
                let keyring = serial_arg(spec, args, 1)?;
                let ring = self.service.new_keyring(name, keyring)?;
                Ok(Value::Int(ring.raw() as i64))
            }
            "update-key" => {
                let key = serial_arg(spec, args, 0)?;
                let payload = bytes_arg(spec, args, 1)?;
                self.service.update_key(key, payload)?;
                Ok(Value::True)
            }
            "link" => {
                let key = serial_arg(spec, args, 0)?;
                let keyring = serial_arg(spec, args, 1)?;
                self.service.link(key, keyring)?;
                Ok(Value::True)
            }
            "unlink" => {
                let key = serial_arg(spec, args, 0)?;
                let keyring = serial_arg(spec, args, 1)?;
                self.service.unlink(key, keyring)?;
                Ok(Value::True)
            }
            "raw-describe" => {
                let key = serial_arg(spec, args, 0)?;
                let raw = self.service.describe_raw(key)?;
                Ok(Value::text(&raw))
            }
            "describe" => {
                let key = serial_arg(spec, args, 0)?;
                let description = self.service.describe(key)?;
                Ok(Value::Vector(vec![
                    Value::text(&description.key_type),
                    Value::Int(description.uid as i64),
                    Value::Int(description.gid as i64),
                    Value::Int(description.permissions.raw() as i64),
                    Value::text(&description.description),
                ]))
            }
            "read" => {
                let key = serial_arg(spec, args, 0)?;
                let payload = self.service.read(key)?;
                Ok(Value::Str(payload))
            }
            "list" => {
                let keyring = serial_arg(spec, args, 0)?;
                let members = self.service.list(keyring)?;
                Ok(Value::List(
                    members
                        .into_iter()
                        .map(|member| Value::Int(member.raw() as i64))
                        .collect(),
                ))
            }
            "search" => {
                let keyring = serial_arg(spec, args, 0)?;
                let key_type = text_arg(spec, args, 1)?;
                let description = text_arg(spec, args, 2)?;
                let destination = if args.len() == 4 {
                    Some(serial_arg(spec, args, 3)?)
                } else {
                    None
                };
                let found = self
                    .service
                    .search(keyring, key_type, description, destination)?;
                Ok(Value::Int(found.raw() as i64))
            }
            "clear" => {
                let keyring = serial_arg(spec, args, 0)?;
                self.service.clear(keyring)?;
                Ok(Value::True)
            }
            "set-timeout" => {
                let key = serial_arg(spec, args, 0)?;
                let timeout = timeout_arg(spec, args, 1)?;
                self.service.set_timeout(key, timeout)?;
                Ok(Value::True)
            }
            "revoke" => {
                let key = serial_arg(spec, args, 0)?;
                self.service.revoke(key)?;
                Ok(Value::True)
            }
            // The registry and this match are maintained together
            _ => Err(BridgeError::UnknownOperation(name.to_string())),
        }
    }
}

fn int_arg(spec: &OperationSpec, args: &[Value], index: usize) -> Result<i64, BridgeError> {
    args[index].as_int().ok_or(BridgeError::BadArgument {
        operation: spec.name,
        index,
        expected: "an integer",
    })
}

fn serial_arg(spec: &OperationSpec, args: &[Value], index: usize) -> Result<KeySerial, BridgeError> {
    let raw = int_arg(spec, args, index)?;
    i32::try_from(raw)
        .map(KeySerial::from_raw)
        .map_err(|_| BridgeError::BadArgument {
            operation: spec.name,
            index,
            expected: "a key serial",
        })
}

fn timeout_arg(spec: &OperationSpec, args: &[Value], index: usize) -> Result<u32, BridgeError> {
    let raw = int_arg(spec, args, index)?;
    u32::try_from(raw).map_err(|_| BridgeError::BadArgument {
        operation: spec.name,
        index,
        expected: "a non-negative timeout in seconds",
    })
}

fn text_arg<'a>(
    spec: &OperationSpec,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, BridgeError> {
    args[index].as_text().ok_or(BridgeError::BadArgument {
        operation: spec.name,
        index,
        expected: "a text string",
    })
}

fn bytes_arg<'a>(
    spec: &OperationSpec,
    args: &'a [Value],
    index: usize,
) -> Result<&'a [u8], BridgeError> {
    args[index].as_bytes().ok_or(BridgeError::BadArgument {
        operation: spec.name,
        index,
        expected: "a string",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyctl_api::Errno;

    /// Facility that records whether any kernel call was made
    #[derive(Default)]
    struct CountingFacility {
        calls: usize,
    }

    impl CountingFacility {
        fn count(&mut self) -> Result<(), Errno> {
            self.calls += 1;
            Ok(())
        }
    }

    impl KeyFacility for CountingFacility {
        fn add_key(
            &mut self,
            _key_type: &str,
            _description: &str,
            _payload: &[u8],
            _keyring: KeySerial,
        ) -> Result<KeySerial, Errno> {
            self.count()?;
            Ok(KeySerial::from_raw(1))
        }

        fn update(&mut self, _key: KeySerial, _payload: &[u8]) -> Result<(), Errno> {
            self.count()
        }

        fn link(&mut self, _key: KeySerial, _keyring: KeySerial) -> Result<(), Errno> {
            self.count()
        }

        fn unlink(&mut self, _key: KeySerial, _keyring: KeySerial) -> Result<(), Errno> {
            self.count()
        }

        fn describe(&mut self, _key: KeySerial) -> Result<String, Errno> {
            self.count()?;
            Ok("user;0;0;3f;d".to_string())
        }

        fn read(&mut self, _key: KeySerial) -> Result<Vec<u8>, Errno> {
            self.count()?;
            Ok(Vec::new())
        }

        fn search(
            &mut self,
            _keyring: KeySerial,
            _key_type: &str,
            _description: &str,
            _destination: KeySerial,
        ) -> Result<KeySerial, Errno> {
            self.count()?;
            Ok(KeySerial::from_raw(1))
        }

        fn clear(&mut self, _keyring: KeySerial) -> Result<(), Errno> {
            self.count()
        }

        fn set_timeout(&mut self, _key: KeySerial, _timeout_seconds: u32) -> Result<(), Errno> {
            self.count()
        }

        fn revoke(&mut self, _key: KeySerial) -> Result<(), Errno> {
            self.count()
        }
    }

    fn bridge() -> Bridge<CountingFacility> {
        Bridge::new(CountingFacility::default())
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let err = bridge().dispatch("steal-key", &[]).unwrap_err();
        assert_eq!(err, BridgeError::UnknownOperation("steal-key".to_string()));
    }

    #[test]
    fn test_arity_is_checked_before_any_call() {
        let mut bridge = bridge();
        let err = bridge.dispatch("revoke", &[]).unwrap_err();
        assert_eq!(
            err,
            BridgeError::Arity {
                operation: "revoke",
                min: 1,
                max: 1,
                got: 0,
            }
        );
        assert_eq!(bridge.service().facility().calls, 0);
    }

    #[test]
    fn test_argument_conversion_happens_before_any_call() {
        let mut bridge = bridge();
        // Third argument fails conversion; nothing must reach the facility
        let err = bridge
            .dispatch(
                "add-key",
                &[
                    Value::text("user"),
                    Value::text("d"),
                    Value::Int(5),
                    Value::Int(-3),
                ],
            )
            .unwrap_err();
        assert_eq!(
            err,
            BridgeError::BadArgument {
                operation: "add-key",
                index: 2,
                expected: "a string",
            }
        );
        assert_eq!(bridge.service().facility().calls, 0);
    }

    #[test]
    fn test_serial_argument_must_fit_in_i32() {
        let mut bridge = bridge();
        let err = bridge
            .dispatch("revoke", &[Value::Int(i64::MAX)])
            .unwrap_err();
        assert_eq!(
            err,
            BridgeError::BadArgument {
                operation: "revoke",
                index: 0,
                expected: "a key serial",
            }
        );
    }

    #[test]
    fn test_negative_timeout_is_rejected() {
        let mut bridge = bridge();
        let err = bridge
            .dispatch("set-timeout", &[Value::Int(1), Value::Int(-5)])
            .unwrap_err();
        assert_eq!(
            err,
            BridgeError::BadArgument {
                operation: "set-timeout",
                index: 1,
                expected: "a non-negative timeout in seconds",
            }
        );
    }

    #[test]
    fn test_flag_operations_box_the_success_sentinel() {
        let mut bridge = bridge();
        let result = bridge
            .dispatch("link", &[Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(result, Value::True);
    }
}

use std::collections::HashMap;

use super::error::{FieldOrigin, MapperError};
use super::value::Value;

/// Whether a record member can receive a scanned column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Writable,
    ReadOnly,
}

/// A caller-defined record shape whose members are reachable by name.
///
/// Names are case-sensitive and use the `UpperCamel` convention
/// (`email_verified` column <-> `EmailVerified` member). Most types implement
/// this with [`impl_record!`](crate::impl_record).
pub trait Record {
    /// Current value of the member `name`, `None` if there is no such member.
    fn field(&self, name: &str) -> Option<Value>;

    /// Access mode of the member `name`, `None` if there is no such member.
    fn field_access(&self, name: &str) -> Option<FieldAccess>;

    /// Store `value` into the member `name`, converting it to the member's type.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), MapperError>;
}

/// Dynamic record: members are the map's existing keys.
impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn field_access(&self, name: &str) -> Option<FieldAccess> {
        self.contains_key(name).then_some(FieldAccess::Writable)
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), MapperError> {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(MapperError::FieldNotFound {
                field: name.to_string(),
                origin: FieldOrigin::Column {
                    column: name.to_string(),
                },
            }),
        }
    }
}

/// Implement [`Record`](crate::Record) for a plain struct by listing its
/// members as `"UpperCamelName" => rust_field` pairs.
///
/// Every listed field must be `Clone + Into<Value> + FromValue`.
///
/// ```
/// use sqlmapper::impl_record;
///
/// #[derive(Default)]
/// struct User {
///     id: i64,
///     first_name: String,
/// }
///
/// impl_record!(User {
///     "Id" => id,
///     "FirstName" => first_name,
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn field(&self, name: &str) -> ::std::option::Option<$crate::Value> {
                match name {
                    $($name => ::std::option::Option::Some(
                        $crate::Value::from(::std::clone::Clone::clone(&self.$field)),
                    ),)*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_access(&self, name: &str) -> ::std::option::Option<$crate::FieldAccess> {
                match name {
                    $($name => ::std::option::Option::Some($crate::FieldAccess::Writable),)*
                    _ => ::std::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::MapperError> {
                match name {
                    $($name => {
                        self.$field = $crate::FromValue::from_value(value)
                            .map_err(|e| e.in_field($name))?;
                        ::std::result::Result::Ok(())
                    })*
                    _ => ::std::result::Result::Err($crate::MapperError::FieldNotFound {
                        field: name.to_string(),
                        origin: $crate::FieldOrigin::Column { column: name.to_string() },
                    }),
                }
            }
        }
    };
}

//! Resolved per-invocation values.

use std::collections::BTreeMap;

/// A single resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Bool(bool),
}

/// Read-only view of the arguments and flags of one invocation.
///
/// Built by [`bind`](crate::bind) and handed to the handler by reference, so
/// handlers cannot mutate it. The getters treat an undeclared name as a bug in
/// the command definition and panic; use the `try_` variants when a name may
/// legitimately be absent.
///
/// # Examples
///
/// ```
/// use command_spec_core::{ArgSpec, CommandSpec, FlagSpec, RawInvocation, bind};
///
/// let spec = CommandSpec::new("delete")
///     .with_arg(ArgSpec::new("id"))
///     .with_flag(FlagSpec::boolean("force"));
/// let raw = RawInvocation::from_positionals(["42"]);
///
/// let values = bind(&spec, &raw).unwrap();
/// assert_eq!(values.get_string("id"), "42");
/// assert!(!values.get_bool("force"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
    entries: BTreeMap<String, Value>,
}

impl Values {
    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.entries.insert(name.to_string(), value);
    }

    /// Returns a string argument or flag.
    ///
    /// # Panics
    ///
    /// Panics if `name` was not declared or is a boolean flag.
    pub fn get_string(&self, name: &str) -> &str {
        match self.entries.get(name) {
            Some(Value::String(s)) => s,
            Some(Value::Bool(_)) => panic!("value {name:?} is a bool, not a string"),
            None => panic!("value {name:?} is not declared by this command"),
        }
    }

    /// Returns a boolean flag.
    ///
    /// # Panics
    ///
    /// Panics if `name` was not declared or is not a boolean flag.
    pub fn get_bool(&self, name: &str) -> bool {
        match self.entries.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(_)) => panic!("value {name:?} is a string, not a bool"),
            None => panic!("value {name:?} is not declared by this command"),
        }
    }

    /// Returns a string value, or `None` if `name` is undeclared or boolean.
    pub fn try_get_string(&self, name: &str) -> Option<&str> {
        match self.entries.get(name) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns a boolean flag, or `None` if `name` is undeclared or a string.
    pub fn try_get_bool(&self, name: &str) -> Option<bool> {
        match self.entries.get(name) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

//! Command descriptor definitions.
//!
//! A [`CommandSpec`] is a data-only description of one command: its name,
//! aliases, help text, positional arguments, flags and a usage example.
//! Descriptors are assembled with chained builder methods and never mutated
//! once a [`CommandNode`](crate::CommandNode) owns them.

/// Predicate applied to a flag's raw string value.
///
/// Validators must be pure; they run for explicit values and for defaults.
pub type Validator = fn(&str) -> bool;

/// Value type of a flag.
///
/// # Examples
///
/// ```
/// use command_spec_core::FlagType;
///
/// assert_eq!(FlagType::default(), FlagType::String);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagType {
    /// Raw string passed through unchanged (the default).
    #[default]
    String,
    /// Boolean; raw value must be exactly `true` or `false`.
    Bool,
}

/// Schema for a positional argument.
///
/// Arguments are bound in declaration order and are all required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    /// Name used to look the value up in [`Values`](crate::Values).
    pub name: String,
    /// Description shown in help output.
    pub description: Option<String>,
}

impl ArgSpec {
    /// Creates a required positional argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_spec_core::ArgSpec;
    ///
    /// let arg = ArgSpec::new("id");
    /// assert_eq!(arg.name, "id");
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// Schema for a command flag.
///
/// A flag always has a long name (`--level`) and optionally a single
/// character shorthand (`-l`). Its default is a raw string that goes through
/// the same validation as an explicit value.
///
/// # Examples
///
/// ```
/// use command_spec_core::{FlagSpec, FlagType};
///
/// let level = FlagSpec::choice("level", &["info", "warning"], "info")
///     .with_shorthand('l');
/// assert!(level.accepts("warning"));
/// assert!(!level.accepts("critical"));
///
/// let force = FlagSpec::boolean("force");
/// assert_eq!(force.kind, FlagType::Bool);
/// assert_eq!(force.default, "false");
/// ```
#[derive(Debug, Clone)]
pub struct FlagSpec {
    /// Long name without the leading dashes.
    pub name: String,
    /// Single character shorthand.
    pub shorthand: Option<char>,
    /// Help text.
    pub usage: String,
    /// Raw default value used when the flag is not supplied.
    pub default: String,
    /// How the raw value is coerced.
    pub kind: FlagType,
    /// Closed set of accepted raw values (empty = any).
    pub allowed: Vec<String>,
    /// Custom predicate over the raw value.
    pub is_valid: Option<Validator>,
}

impl FlagSpec {
    /// Creates a string flag with a default.
    pub fn string(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            shorthand: None,
            usage: String::new(),
            default: default.to_string(),
            kind: FlagType::String,
            allowed: Vec::new(),
            is_valid: None,
        }
    }

    /// Creates a boolean flag defaulting to `false`.
    pub fn boolean(name: &str) -> Self {
        Self {
            kind: FlagType::Bool,
            allowed: vec!["true".to_string(), "false".to_string()],
            ..Self::string(name, "false")
        }
    }

    /// Creates a string flag restricted to a closed set of values.
    pub fn choice(name: &str, allowed: &[&str], default: &str) -> Self {
        Self {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
            ..Self::string(name, default)
        }
    }

    /// Sets the single character shorthand.
    pub fn with_shorthand(mut self, shorthand: char) -> Self {
        self.shorthand = Some(shorthand);
        self
    }

    /// Sets the help text.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    /// Sets a custom validation predicate.
    pub fn with_validator(mut self, is_valid: Validator) -> Self {
        self.is_valid = Some(is_valid);
        self
    }

    /// Checks a raw value against the allowed set and the predicate.
    pub fn accepts(&self, raw: &str) -> bool {
        if !self.allowed.is_empty() && !self.allowed.iter().any(|v| v == raw) {
            return false;
        }
        self.is_valid.is_none_or(|is_valid| is_valid(raw))
    }

    /// Checks if a token names this flag (`--name` or `-s`).
    pub fn matches(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return long == self.name;
        }
        match (token.strip_prefix('-'), self.shorthand) {
            (Some(short), Some(c)) => {
                let mut chars = short.chars();
                chars.next() == Some(c) && chars.next().is_none()
            }
            _ => false,
        }
    }
}

/// Complete descriptor for one command.
///
/// # Examples
///
/// ```
/// use command_spec_core::{ArgSpec, CommandSpec, FlagSpec};
///
/// let spec = CommandSpec::new("delete")
///     .with_short("Delete a broadcast")
///     .with_alias("rm")
///     .with_arg(ArgSpec::new("id"))
///     .with_flag(FlagSpec::boolean("force"));
///
/// assert!(spec.matches("rm"));
/// assert!(spec.find_flag("--force").is_some());
/// assert_eq!(spec.args.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// Name, unique among siblings.
    pub name: String,
    /// Alternative names.
    pub aliases: Vec<String>,
    /// One-line description.
    pub short: String,
    /// Longer description shown in help output.
    pub long: Option<String>,
    /// Positional arguments in binding order.
    pub args: Vec<ArgSpec>,
    /// Flags in declaration order.
    pub flags: Vec<FlagSpec>,
    /// Usage example shown in help output.
    pub example: Option<String>,
}

impl CommandSpec {
    /// Creates an empty descriptor with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the one-line description.
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = short.to_string();
        self
    }

    /// Sets the long description.
    pub fn with_long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Adds a positional argument.
    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Adds a flag.
    pub fn with_flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    /// Sets the usage example.
    pub fn with_example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }

    /// Checks if a token is this command's name or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Finds a flag by `--name` or `-s` token.
    pub fn find_flag(&self, token: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.matches(token))
    }

    /// Finds a flag by its bare long name.
    pub fn flag(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_spaces(s: &str) -> bool {
        !s.contains(' ')
    }

    #[test]
    fn test_flag_matches_long_and_shorthand() {
        let flag = FlagSpec::string("level", "info").with_shorthand('l');

        assert!(flag.matches("--level"));
        assert!(flag.matches("-l"));
        assert!(!flag.matches("-lx"));
        assert!(!flag.matches("--lev"));
        assert!(!flag.matches("level"));
    }

    #[test]
    fn test_flag_accepts_combines_allowed_and_predicate() {
        let flag = FlagSpec::choice("mode", &["a b", "c"], "c").with_validator(no_spaces);

        assert!(flag.accepts("c"));
        assert!(!flag.accepts("a b"));
        assert!(!flag.accepts("d"));
    }

    #[test]
    fn test_flag_without_constraints_accepts_anything() {
        let flag = FlagSpec::string("name", "");
        assert!(flag.accepts(""));
        assert!(flag.accepts("anything at all"));
    }

    #[test]
    fn test_command_spec_matches_alias() {
        let spec = CommandSpec::new("broadcasts").with_alias("broadcast");

        assert!(spec.matches("broadcasts"));
        assert!(spec.matches("broadcast"));
        assert!(!spec.matches("bc"));
    }
}

//! Argument tokenizing and value binding.
//!
//! Parsing happens in two steps:
//!
//! 1. [`tokenize`] splits argv into a [`RawInvocation`]: ordered positional
//!    tokens plus a flag-name to raw-string map.
//! 2. [`bind`] checks the raw invocation against a [`CommandSpec`] and
//!    produces typed [`Values`].
//!
//! # Example
//!
//! ```
//! use command_spec_core::*;
//!
//! let spec = CommandSpec::new("create")
//!     .with_arg(ArgSpec::new("title"))
//!     .with_flag(FlagSpec::choice("level", &["info", "warning"], "info").with_shorthand('l'));
//!
//! let argv = ["-l", "warning", "maintenance tonight"];
//! let raw = tokenize(&spec, &argv).unwrap();
//! let values = bind(&spec, &raw).unwrap();
//! assert_eq!(values.get_string("title"), "maintenance tonight");
//! assert_eq!(values.get_string("level"), "warning");
//!
//! let bad = tokenize(&spec, &["--level", "critical", "t"]).unwrap();
//! assert!(matches!(bind(&spec, &bad), Err(UsageError::InvalidFlagValue { .. })));
//! ```

use std::collections::BTreeMap;

use crate::error::UsageError;
use crate::spec::{CommandSpec, FlagSpec, FlagType};
use crate::values::{Value, Values};

/// Unvalidated input for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInvocation {
    /// Positional tokens in the order given.
    pub positionals: Vec<String>,
    /// Explicitly supplied flags keyed by long name.
    pub flags: BTreeMap<String, String>,
}

impl RawInvocation {
    /// Creates an invocation with only positional tokens.
    pub fn from_positionals<I, S>(positionals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positionals: positionals.into_iter().map(Into::into).collect(),
            flags: BTreeMap::new(),
        }
    }

    /// Adds an explicit flag value.
    pub fn with_flag(mut self, name: &str, value: &str) -> Self {
        self.flags.insert(name.to_string(), value.to_string());
        self
    }
}

/// Splits argv tokens into positionals and flags.
///
/// Accepts `--name value`, `--name=value`, `-s value` and `-s=value`. A bool
/// flag given without `=` takes no value and means `true`. Everything after
/// `--` is positional. A repeated flag keeps its last value.
///
/// # Errors
///
/// Returns [`UsageError::UnknownFlag`] for an undeclared flag and
/// [`UsageError::MissingFlagValue`] when a value-taking flag ends the input.
pub fn tokenize<S: AsRef<str>>(spec: &CommandSpec, argv: &[S]) -> Result<RawInvocation, UsageError> {
    let mut raw = RawInvocation::default();
    let mut tokens = argv.iter().map(|s| s.as_ref());

    while let Some(token) = tokens.next() {
        if token == "--" {
            raw.positionals.extend(tokens.by_ref().map(str::to_string));
            break;
        }
        if !looks_like_flag(token) {
            raw.positionals.push(token.to_string());
            continue;
        }

        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        let flag = spec
            .find_flag(name)
            .ok_or_else(|| UsageError::UnknownFlag(name.to_string()))?;

        let value = match (inline, flag.kind) {
            (Some(value), _) => value.to_string(),
            (None, FlagType::Bool) => "true".to_string(),
            (None, FlagType::String) => tokens
                .next()
                .map(str::to_string)
                .ok_or_else(|| UsageError::MissingFlagValue(flag.name.clone()))?,
        };
        raw.flags.insert(flag.name.clone(), value);
    }

    Ok(raw)
}

fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Binds a raw invocation to a descriptor.
///
/// Positionals bind to args in declared order. Each flag resolves to its
/// explicit raw value or its default, and that raw string is validated before
/// coercion.
///
/// # Errors
///
/// Returns the first [`UsageError`] found: argument count problems first,
/// then undeclared flags, then flag values in declaration order.
pub fn bind(spec: &CommandSpec, raw: &RawInvocation) -> Result<Values, UsageError> {
    let expected = spec.args.len();
    let got = raw.positionals.len();
    if got < expected {
        return Err(UsageError::MissingArgument {
            name: spec.args[got].name.clone(),
        });
    }
    if got > expected {
        return Err(UsageError::TooManyArguments { expected, got });
    }

    if let Some(unknown) = raw.flags.keys().find(|name| spec.flag(name).is_none()) {
        return Err(UsageError::UnknownFlag(format!("--{unknown}")));
    }

    let mut values = Values::default();
    for (arg, token) in spec.args.iter().zip(&raw.positionals) {
        values.insert(&arg.name, Value::String(token.clone()));
    }
    for flag in &spec.flags {
        let raw_value = raw.flags.get(&flag.name).unwrap_or(&flag.default);
        values.insert(&flag.name, coerce(flag, raw_value)?);
    }

    Ok(values)
}

fn coerce(flag: &FlagSpec, raw: &str) -> Result<Value, UsageError> {
    let invalid = || UsageError::InvalidFlagValue {
        flag: flag.name.clone(),
        value: raw.to_string(),
        allowed: flag.allowed.clone(),
    };

    if !flag.accepts(raw) {
        return Err(invalid());
    }
    match flag.kind {
        FlagType::String => Ok(Value::String(raw.to_string())),
        FlagType::Bool => match raw {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
    }
}

//! Descriptor and tree validation.
//!
//! Catches definition bugs such as duplicate names, colliding shorthands and
//! defaults that fail their own validator. These are problems in the command
//! table, not in user input, so they are reported once when the tree is built.
//!
//! # Examples
//!
//! ```
//! use command_spec_core::*;
//!
//! let spec = CommandSpec::new("create")
//!     .with_arg(ArgSpec::new("title"))
//!     .with_flag(FlagSpec::choice("level", &["info", "warning"], "info"));
//! assert!(validate_spec(&spec).is_empty());
//!
//! // Default outside the allowed set
//! let bad = CommandSpec::new("create")
//!     .with_flag(FlagSpec::choice("level", &["info", "warning"], "debug"));
//! assert!(!validate_spec(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::node::CommandNode;
use crate::spec::{CommandSpec, FlagSpec, FlagType};

/// Command definition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// An argument or flag has an empty name.
    #[error("empty argument or flag name in {0}")]
    EmptyValueName(String),
    /// Two args or flags of one command share a name.
    #[error("duplicate argument or flag {name:?} in {command}")]
    DuplicateValueName { command: String, name: String },
    /// Two flags of one command share a shorthand.
    #[error("duplicate shorthand -{shorthand} in {command}")]
    DuplicateShorthand { command: String, shorthand: char },
    /// A flag default that fails its own validation.
    #[error("default {default:?} of flag --{flag} in {command} is not a valid value")]
    InvalidDefault {
        command: String,
        flag: String,
        default: String,
    },
    /// Two children of a group share a name or alias.
    #[error("duplicate command {name:?} in {path}")]
    DuplicateCommand { path: String, name: String },
    /// A group without children.
    #[error("command group {0} has no subcommands")]
    EmptyGroup(String),
}

/// Validates a single descriptor.
///
/// Checks for an empty name, empty or duplicate arg/flag names, duplicate
/// shorthands and invalid defaults.
pub fn validate_spec(spec: &CommandSpec) -> Vec<SpecError> {
    let mut errors = Vec::new();

    if spec.name.trim().is_empty() {
        errors.push(SpecError::EmptyCommandName);
        return errors;
    }

    let mut names: HashSet<&str> = HashSet::new();
    let declared = spec
        .args
        .iter()
        .map(|a| a.name.as_str())
        .chain(spec.flags.iter().map(|f| f.name.as_str()));
    for name in declared {
        if name.trim().is_empty() {
            errors.push(SpecError::EmptyValueName(spec.name.clone()));
        } else if !names.insert(name) {
            errors.push(SpecError::DuplicateValueName {
                command: spec.name.clone(),
                name: name.to_string(),
            });
        }
    }

    let mut shorthands = HashSet::new();
    for flag in &spec.flags {
        if let Some(c) = flag.shorthand {
            if !shorthands.insert(c) {
                errors.push(SpecError::DuplicateShorthand {
                    command: spec.name.clone(),
                    shorthand: c,
                });
            }
        }
        if !flag.accepts(&flag.default) || !default_fits_type(flag) {
            errors.push(SpecError::InvalidDefault {
                command: spec.name.clone(),
                flag: flag.name.clone(),
                default: flag.default.clone(),
            });
        }
    }

    errors
}

fn default_fits_type(flag: &FlagSpec) -> bool {
    match flag.kind {
        FlagType::String => true,
        FlagType::Bool => matches!(flag.default.as_str(), "true" | "false"),
    }
}

/// Validates a whole command tree.
///
/// Every descriptor is checked with [`validate_spec`]; groups must have at
/// least one child and children names and aliases must be unique per group.
pub fn validate_tree<S: ?Sized, E>(root: &CommandNode<S, E>) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    collect_node_errors(root, &mut path, &mut errors);
    errors
}

fn collect_node_errors<S: ?Sized, E>(
    node: &CommandNode<S, E>,
    path: &mut Vec<String>,
    errors: &mut Vec<SpecError>,
) {
    let spec = node.spec();
    errors.extend(validate_spec(spec));
    path.push(spec.name.clone());

    if let Some(children) = node.children() {
        let here = path.join(" ");
        if children.is_empty() {
            errors.push(SpecError::EmptyGroup(here.clone()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for child in children {
            let child_spec = child.spec();
            let names = std::iter::once(&child_spec.name).chain(child_spec.aliases.iter());
            for name in names {
                if !seen.insert(name.as_str()) {
                    errors.push(SpecError::DuplicateCommand {
                        path: here.clone(),
                        name: name.clone(),
                    });
                }
            }
            collect_node_errors(child, path, errors);
        }
    }

    path.pop();
}

//! Declarative command framework for administrative CLIs.
//!
//! Commands are described as data and turned into an executable tree:
//!
//! - [`CommandSpec`]: a command's name, aliases, help text, positional
//!   [`ArgSpec`]s, [`FlagSpec`]s and usage example.
//! - [`tokenize`] / [`bind`]: turn argv into a [`RawInvocation`] and then
//!   into typed, read-only [`Values`], rejecting malformed input with a
//!   [`UsageError`].
//! - [`CommandNode`]: a group of children or a leaf with one of four
//!   [`Handler`] shapes (action, getter, lister, generic).
//! - [`CommandTree`]: validates the whole tree once ([`validate_tree`]) and
//!   routes invocations to leaves.
//!
//! Handlers get a [`Context`] holding the injected service and the process
//! streams, so there is no global client state.
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//!
//! use command_spec_core::*;
//!
//! let delete: CommandNode<(), DispatchError> = CommandNode::action(
//!     CommandSpec::new("delete")
//!         .with_short("Delete an entry")
//!         .with_arg(ArgSpec::new("id"))
//!         .with_flag(FlagSpec::boolean("force").with_usage("ignore missing entries")),
//!     |ctx, values| {
//!         writeln!(ctx.output, "deleting {}", values.get_string("id")).ok();
//!         Ok(())
//!     },
//! );
//! let tree = CommandTree::new(CommandNode::group(CommandSpec::new("entries"), vec![delete])).unwrap();
//!
//! let mut input = std::io::empty();
//! let mut output = Vec::new();
//! let mut ctx = Context::new(&(), &mut input, &mut output);
//! assert_eq!(tree.dispatch(&mut ctx, &["delete", "--force", "7"]).unwrap(), Outcome::Done);
//! assert_eq!(output, b"deleting 7\n");
//! ```

mod error;
mod node;
mod parse;
mod spec;
mod tree;
mod validate;
mod values;

pub use error::{DispatchError, UsageError};
pub use node::{CommandNode, Context, Handler, Help, ListResult, Outcome};
pub use parse::{RawInvocation, bind, tokenize};
pub use spec::{ArgSpec, CommandSpec, FlagSpec, FlagType, Validator};
pub use tree::CommandTree;
pub use validate::{SpecError, validate_spec, validate_tree};
pub use values::{Value, Values};

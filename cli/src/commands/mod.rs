//! Command table of the `broadcast-admin` binary.

use broadcast_client::BroadcastClient;
use command_spec_core::{CommandNode, CommandSpec, CommandTree};

use crate::error::CliError;

pub mod broadcasts;

/// Name of the root command group.
pub const ROOT_COMMAND: &str = "broadcast-admin";

/// Service injected into every handler.
pub type Service = dyn BroadcastClient;

/// Node type shared by all commands of this binary.
pub type Node = CommandNode<Service, CliError>;

/// Builds and validates the full command tree.
///
/// `content_limit` caps how many bytes `broadcasts create` reads from stdin.
///
/// # Errors
///
/// Returns [`CliError::InvalidCommands`] if a descriptor is malformed.
pub fn command_tree(content_limit: Option<u64>) -> Result<CommandTree<Service, CliError>, CliError> {
    let root = CommandNode::group(
        CommandSpec::new(ROOT_COMMAND).with_short("Administer platform broadcasts"),
        vec![broadcasts::command(content_limit)],
    );
    CommandTree::new(root).map_err(CliError::InvalidCommands)
}

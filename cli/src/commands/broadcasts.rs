//! The `broadcasts` command group: list, show, create and delete.

use std::io::Read;

use broadcast_client::{Broadcast, ErrorKind, Level, is_error_kind};
use command_spec_core::{
    ArgSpec, CommandNode, CommandSpec, Context, FlagSpec, ListResult, Outcome, Values,
};
use tracing::{debug, info};

use super::{Node, Service};
use crate::error::CliError;

/// Builds the `broadcasts` group.
///
/// `content_limit` caps the stdin body read by `create`; `None` reads
/// everything.
pub fn command(content_limit: Option<u64>) -> Node {
    CommandNode::group(
        group_spec(),
        vec![
            CommandNode::lister(list_spec(), list),
            CommandNode::getter(show_spec(), show),
            CommandNode::generic(create_spec(), move |ctx, values| {
                create(ctx, values, content_limit)
            }),
            CommandNode::action(delete_spec(), delete),
        ],
    )
}

fn group_spec() -> CommandSpec {
    CommandSpec::new("broadcasts")
        .with_alias("broadcast")
        .with_short("Manage broadcasts")
        .with_long("Broadcasts are announcements shown to every user of the platform.")
}

fn list_spec() -> CommandSpec {
    CommandSpec::new("list")
        .with_alias("ls")
        .with_short("List broadcasts")
}

fn show_spec() -> CommandSpec {
    CommandSpec::new("show")
        .with_short("Show a broadcast")
        .with_arg(ArgSpec::new("id").with_description("Broadcast id"))
}

fn create_spec() -> CommandSpec {
    let levels = Level::ALL.map(Level::as_str);
    CommandSpec::new("create")
        .with_alias("add")
        .with_short("Create a broadcast")
        .with_long("Create a broadcast. The content is read from standard input.")
        .with_arg(ArgSpec::new("title").with_description("Broadcast title"))
        .with_flag(
            FlagSpec::choice("level", &levels, Level::default().as_str())
                .with_shorthand('l')
                .with_usage("Level of broadcast: info or warning"),
        )
        .with_example(
            "broadcast-admin broadcasts create --level warning \"Planned maintenance\" < content.md",
        )
}

fn delete_spec() -> CommandSpec {
    CommandSpec::new("delete")
        .with_alias("rm")
        .with_short("Delete a broadcast")
        .with_arg(ArgSpec::new("id").with_description("Broadcast id"))
        .with_flag(
            FlagSpec::boolean("force")
                .with_usage("if true, do not fail if broadcast does not exist"),
        )
}

fn list(ctx: &mut Context<'_, Service>, _values: &Values) -> Result<ListResult, CliError> {
    let broadcasts = ctx.service.broadcasts()?;
    debug!(count = broadcasts.len(), "fetched broadcasts");
    Ok(ListResult::from_items(&broadcasts)?)
}

fn show(ctx: &mut Context<'_, Service>, values: &Values) -> Result<Broadcast, CliError> {
    Ok(ctx.service.broadcast_get(values.get_string("id"))?)
}

fn create(
    ctx: &mut Context<'_, Service>,
    values: &Values,
    content_limit: Option<u64>,
) -> Result<Outcome, CliError> {
    let content = read_content(ctx.input, content_limit)?;
    let level: Level = values.get_string("level").parse()?;
    let broadcast = Broadcast::new(values.get_string("title"), content, level);
    ctx.service.broadcast_create(&broadcast)?;
    Ok(Outcome::Done)
}

fn delete(ctx: &mut Context<'_, Service>, values: &Values) -> Result<(), CliError> {
    let id = values.get_string("id");
    match ctx.service.broadcast_delete(id) {
        Err(err) if values.get_bool("force") && is_error_kind(&err, ErrorKind::BroadcastNotFound) => {
            info!(id, "broadcast already absent, ignoring");
            writeln!(ctx.output, "{err}").map_err(CliError::Output)?;
            Ok(())
        }
        result => Ok(result?),
    }
}

/// Reads the whole input, failing once more than `limit` bytes arrive.
fn read_content(input: &mut dyn Read, limit: Option<u64>) -> Result<String, CliError> {
    let mut buf = Vec::new();
    match limit {
        Some(limit) => {
            input
                .take(limit.saturating_add(1))
                .read_to_end(&mut buf)
                .map_err(CliError::Input)?;
            if buf.len() as u64 > limit {
                return Err(CliError::ContentTooLarge { limit });
            }
        }
        None => {
            input.read_to_end(&mut buf).map_err(CliError::Input)?;
        }
    }
    String::from_utf8(buf).map_err(|e| {
        CliError::Input(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use command_spec_core::validate_spec;

    use super::*;

    #[test]
    fn test_descriptors_are_valid() {
        for spec in [group_spec(), list_spec(), show_spec(), create_spec(), delete_spec()] {
            assert!(validate_spec(&spec).is_empty(), "{} is invalid", spec.name);
        }
    }

    #[test]
    fn test_level_flag_accepts_only_known_levels() {
        let spec = create_spec();
        let level = spec.flag("level").unwrap();
        assert!(level.accepts("info"));
        assert!(level.accepts("warning"));
        assert!(!level.accepts("critical"));
        assert!(!level.accepts("INFO"));
    }

    #[test]
    fn test_read_content_within_limit() {
        let mut input: &[u8] = b"hello";
        assert_eq!(read_content(&mut input, Some(5)).unwrap(), "hello");
    }

    #[test]
    fn test_read_content_over_limit() {
        let mut input: &[u8] = b"hello!";
        let err = read_content(&mut input, Some(5)).unwrap_err();
        assert!(matches!(err, CliError::ContentTooLarge { limit: 5 }));
    }

    #[test]
    fn test_read_content_unlimited_and_empty() {
        let mut input: &[u8] = b"";
        assert_eq!(read_content(&mut input, None).unwrap(), "");
    }

    #[test]
    fn test_read_content_rejects_invalid_utf8() {
        let mut input: &[u8] = &[0xff, 0xfe];
        assert!(matches!(read_content(&mut input, None), Err(CliError::Input(_))));
    }
}

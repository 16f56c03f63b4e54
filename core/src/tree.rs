//! Command tree assembly and dispatch.
//!
//! [`CommandTree`] validates a root [`CommandNode`] once, then routes argv
//! tokens to the matching leaf. Groups consume one token each (matched by
//! name or alias); the remaining tokens are tokenized and bound against the
//! leaf's descriptor before its handler runs, so invalid input never reaches
//! a handler.
//!
//! # Example
//!
//! ```
//! use command_spec_core::*;
//!
//! let root: CommandNode<(), DispatchError> = CommandNode::group(
//!     CommandSpec::new("admin"),
//!     vec![CommandNode::getter(
//!         CommandSpec::new("echo").with_arg(ArgSpec::new("text")),
//!         |_, values| Ok(values.get_string("text").to_string()),
//!     )],
//! );
//! let tree = CommandTree::new(root).unwrap();
//!
//! let mut input = std::io::empty();
//! let mut output = Vec::new();
//! let mut ctx = Context::new(&(), &mut input, &mut output);
//! let outcome = tree.dispatch(&mut ctx, &["echo", "hi"]).unwrap();
//! assert_eq!(outcome, Outcome::Item(serde_json::json!("hi")));
//!
//! let err = tree.dispatch(&mut ctx, &["echo"]).unwrap_err();
//! assert!(matches!(err, DispatchError::Usage(UsageError::MissingArgument { .. })));
//! ```

use tracing::debug;

use crate::error::DispatchError;
use crate::node::{CommandNode, Context, Help, Outcome};
use crate::parse::{bind, tokenize};
use crate::spec::{CommandSpec, FlagType};
use crate::validate::{SpecError, validate_tree};

const HELP_TOKENS: &[&str] = &["help", "-h", "--help"];

/// A validated command tree ready for dispatch.
#[derive(Debug)]
pub struct CommandTree<S: ?Sized, E> {
    root: CommandNode<S, E>,
}

impl<S: ?Sized, E> CommandTree<S, E> {
    /// Validates `root` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns every [`SpecError`] found in the tree.
    pub fn new(root: CommandNode<S, E>) -> Result<Self, Vec<SpecError>> {
        let errors = validate_tree(&root);
        if errors.is_empty() {
            Ok(Self { root })
        } else {
            Err(errors)
        }
    }

    /// Routes `argv` (without the program name) to a leaf and runs it.
    ///
    /// An empty path or an explicit help token at a group, or `-h`/`--help`
    /// at a leaf, yields [`Outcome::Help`] instead of running anything.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownCommand`] for an unmatched token,
    /// [`DispatchError::Usage`] for input the leaf rejects, or whatever the
    /// handler returns.
    pub fn dispatch<A>(&self, ctx: &mut Context<'_, S>, argv: &[A]) -> Result<Outcome, E>
    where
        A: AsRef<str>,
        E: From<DispatchError>,
    {
        let mut node = &self.root;
        let mut path = vec![self.root.spec().name.clone()];
        let mut rest = argv;

        loop {
            match node {
                CommandNode::Group { .. } => {
                    let Some(token) = rest.first().map(|t| t.as_ref()) else {
                        return Ok(Outcome::Help(render_help(node, &path)));
                    };
                    if HELP_TOKENS.contains(&token) {
                        return Ok(Outcome::Help(render_help(node, &path)));
                    }
                    node = node.find_child(token).ok_or_else(|| {
                        E::from(DispatchError::UnknownCommand {
                            path: path.join(" "),
                            token: token.to_string(),
                        })
                    })?;
                    path.push(node.spec().name.clone());
                    rest = &rest[1..];
                }
                CommandNode::Leaf { spec, handler } => {
                    if wants_help(rest) {
                        return Ok(Outcome::Help(render_help(node, &path)));
                    }
                    let raw = tokenize(spec, rest).map_err(|e| E::from(DispatchError::from(e)))?;
                    let values = bind(spec, &raw).map_err(|e| E::from(DispatchError::from(e)))?;
                    debug!(
                        command = %path.join(" "),
                        shape = handler.shape(),
                        "dispatching command"
                    );
                    return handler.run(ctx, &values);
                }
            }
        }
    }

    /// Renders help for the node at `path` (excluding the root name).
    ///
    /// Returns `None` if the path does not resolve.
    pub fn help<A: AsRef<str>>(&self, path: &[A]) -> Option<Help> {
        let mut node = &self.root;
        let mut names = vec![self.root.spec().name.clone()];
        for token in path {
            node = node.find_child(token.as_ref())?;
            names.push(node.spec().name.clone());
        }
        Some(render_help(node, &names))
    }
}

fn wants_help<A: AsRef<str>>(argv: &[A]) -> bool {
    argv.iter()
        .map(|t| t.as_ref())
        .take_while(|t| *t != "--")
        .any(|t| t == "-h" || t == "--help")
}

fn render_help<S: ?Sized, E>(node: &CommandNode<S, E>, path: &[String]) -> Help {
    let spec = node.spec();
    let full_path = path.join(" ");
    let mut out = String::new();

    match node.children() {
        Some(_) => out.push_str(&format!("Usage: {full_path} <command>\n")),
        None => out.push_str(&format!("Usage: {}\n", leaf_usage(spec, &full_path))),
    }

    if !spec.short.is_empty() {
        out.push_str(&format!("\n{}\n", spec.short));
    }
    if let Some(ref long) = spec.long {
        out.push_str(&format!("\n{long}\n"));
    }
    if !spec.aliases.is_empty() {
        out.push_str(&format!("\nAliases: {}\n", spec.aliases.join(", ")));
    }

    if let Some(children) = node.children() {
        out.push_str("\nCommands:\n");
        let width = children
            .iter()
            .map(|c| c.spec().name.len())
            .max()
            .unwrap_or(0);
        for child in children {
            let child_spec = child.spec();
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                child_spec.name, child_spec.short
            ));
        }
    }

    if !spec.args.is_empty() {
        out.push_str("\nArguments:\n");
        for arg in &spec.args {
            let desc = arg.description.as_deref().unwrap_or("");
            out.push_str(format!("  <{}>  {desc}", arg.name).trim_end());
            out.push('\n');
        }
    }

    if !spec.flags.is_empty() {
        out.push_str("\nFlags:\n");
        let rendered: Vec<(String, String)> = spec
            .flags
            .iter()
            .map(|flag| {
                let short = flag
                    .shorthand
                    .map(|c| format!("-{c}, "))
                    .unwrap_or_else(|| "    ".to_string());
                let value = match flag.kind {
                    FlagType::Bool => "",
                    FlagType::String => " <value>",
                };
                let mut details = flag.usage.clone();
                if flag.kind == FlagType::String && !flag.allowed.is_empty() {
                    details.push_str(&format!(" [one of: {}]", flag.allowed.join(", ")));
                }
                if !flag.default.is_empty() {
                    details.push_str(&format!(" (default: {})", flag.default));
                }
                (
                    format!("{short}--{}{value}", flag.name),
                    details.trim().to_string(),
                )
            })
            .collect();
        let width = rendered.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (left, details) in rendered {
            out.push_str(format!("  {left:<width$}  {details}").trim_end());
            out.push('\n');
        }
    }

    if let Some(ref example) = spec.example {
        out.push_str("\nExample:\n");
        for line in example.lines() {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("  {}\n", line.trim_end()));
            }
        }
    }

    Help {
        path: full_path,
        text: out,
    }
}

fn leaf_usage(spec: &CommandSpec, full_path: &str) -> String {
    let mut usage = full_path.to_string();
    if !spec.flags.is_empty() {
        usage.push_str(" [flags]");
    }
    for arg in &spec.args {
        usage.push_str(&format!(" <{}>", arg.name));
    }
    usage
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    use super::*;
    use crate::error::UsageError;
    use crate::spec::{ArgSpec, FlagSpec};

    type Tree = CommandTree<Cell<u32>, DispatchError>;

    fn build(calls: Rc<Cell<u32>>) -> Tree {
        let counter = calls.clone();
        let delete = CommandNode::action(
            CommandSpec::new("delete")
                .with_short("Delete a thing")
                .with_alias("rm")
                .with_arg(ArgSpec::new("id"))
                .with_flag(FlagSpec::boolean("force").with_usage("ignore missing")),
            move |_, _| {
                counter.set(counter.get() + 1);
                Ok(())
            },
        );
        let create = CommandNode::getter(
            CommandSpec::new("create")
                .with_short("Create a thing")
                .with_arg(ArgSpec::new("title"))
                .with_flag(
                    FlagSpec::choice("level", &["info", "warning"], "info")
                        .with_shorthand('l')
                        .with_usage("Level"),
                )
                .with_example("admin things create \"t\" < body.md"),
            |ctx: &mut Context<'_, Cell<u32>>, values| {
                ctx.service.set(ctx.service.get() + 1);
                Ok(format!(
                    "{}:{}",
                    values.get_string("level"),
                    values.get_string("title")
                ))
            },
        );
        let things = CommandNode::group(
            CommandSpec::new("things")
                .with_alias("thing")
                .with_short("Manage things"),
            vec![create, delete],
        );
        CommandTree::new(CommandNode::group(CommandSpec::new("admin"), vec![things])).unwrap()
    }

    fn dispatch(tree: &Tree, service: &Cell<u32>, argv: &[&str]) -> Result<Outcome, DispatchError> {
        let mut input = io::empty();
        let mut output = Vec::new();
        let mut ctx = Context::new(service, &mut input, &mut output);
        tree.dispatch(&mut ctx, argv)
    }

    #[test]
    fn test_dispatch_routes_by_name_and_alias() {
        let calls = Rc::new(Cell::new(0));
        let tree = build(calls.clone());
        let service = Cell::new(0);

        let outcome = dispatch(&tree, &service, &["thing", "create", "-l", "warning", "hi"]).unwrap();
        assert_eq!(outcome, Outcome::Item(serde_json::json!("warning:hi")));
        assert_eq!(service.get(), 1);

        let outcome = dispatch(&tree, &service, &["things", "rm", "--force", "7"]).unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_validation_failure_skips_handler() {
        let calls = Rc::new(Cell::new(0));
        let tree = build(calls.clone());
        let service = Cell::new(0);

        let err = dispatch(&tree, &service, &["things", "delete"]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Usage(UsageError::MissingArgument { ref name }) if name == "id"
        ));

        let err = dispatch(&tree, &service, &["things", "create", "--level", "debug", "t"])
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Usage(UsageError::InvalidFlagValue { .. })
        ));

        let err = dispatch(&tree, &service, &["things", "delete", "--force=maybe", "1"])
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Usage(UsageError::InvalidFlagValue { .. })
        ));

        assert_eq!(calls.get(), 0);
        assert_eq!(service.get(), 0);
    }

    #[test]
    fn test_unknown_command() {
        let tree = build(Rc::new(Cell::new(0)));
        let err = dispatch(&tree, &Cell::new(0), &["things", "purge"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown command \"purge\" for \"admin things\""
        );
    }

    #[test]
    fn test_group_without_subcommand_renders_help() {
        let tree = build(Rc::new(Cell::new(0)));
        let Outcome::Help(help) = dispatch(&tree, &Cell::new(0), &["things"]).unwrap() else {
            panic!("expected help");
        };
        assert_eq!(help.path, "admin things");
        assert!(help.text.starts_with("Usage: admin things <command>\n"));
        assert!(help.text.contains("Aliases: thing"));
        assert!(help.text.contains("  create  Create a thing\n"));
        assert!(help.text.contains("  delete  Delete a thing\n"));
    }

    #[test]
    fn test_leaf_help_lists_flags_and_example() {
        let calls = Rc::new(Cell::new(0));
        let tree = build(calls.clone());
        let Outcome::Help(help) =
            dispatch(&tree, &Cell::new(0), &["things", "create", "--help"]).unwrap()
        else {
            panic!("expected help");
        };
        assert!(help.text.starts_with("Usage: admin things create [flags] <title>\n"));
        assert!(help.text.contains("-l, --level <value>"));
        assert!(help.text.contains("[one of: info, warning] (default: info)"));
        assert!(help.text.contains("Example:\n  admin things create \"t\" < body.md\n"));
    }

    #[test]
    fn test_help_after_double_dash_is_positional() {
        let calls = Rc::new(Cell::new(0));
        let tree = build(calls.clone());
        let outcome = dispatch(&tree, &Cell::new(0), &["things", "delete", "--", "--help"]).unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_help_lookup_by_path() {
        let tree = build(Rc::new(Cell::new(0)));
        let help = tree.help(&["thing", "rm"]).unwrap();
        assert_eq!(help.path, "admin things delete");
        assert!(help.text.contains("Aliases: rm"));
        assert!(tree.help(&["nope"]).is_none());
    }

    #[test]
    fn test_invalid_tree_is_rejected() {
        let root: CommandNode<(), DispatchError> = CommandNode::group(
            CommandSpec::new("admin"),
            vec![CommandNode::action(
                CommandSpec::new("create").with_flag(FlagSpec::choice("level", &["info"], "loud")),
                |_, _| Ok(()),
            )],
        );
        let errors = CommandTree::new(root).unwrap_err();
        assert!(matches!(errors.as_slice(), [SpecError::InvalidDefault { .. }]));
    }
}

//! Command nodes and handler shapes.
//!
//! A [`CommandNode`] is either a group with children or a leaf with a
//! [`Handler`]. Leaves are built from one of four handler shapes:
//!
//! - [`action`](CommandNode::action): side effect only, produces no output.
//! - [`getter`](CommandNode::getter): returns one serializable entity.
//! - [`lister`](CommandNode::lister): returns a [`ListResult`].
//! - [`generic`](CommandNode::generic): returns an [`Outcome`] directly.
//!
//! Handlers receive a [`Context`] carrying the injected service (typically a
//! remote API client) and the process streams, plus the bound [`Values`].

use std::fmt;
use std::io::{Read, Write};

use serde::Serialize;
use serde_json::Value as Json;

use crate::error::DispatchError;
use crate::spec::CommandSpec;
use crate::values::Values;

/// Per-invocation handler environment.
pub struct Context<'a, S: ?Sized> {
    /// Injected service the handler talks to.
    pub service: &'a S,
    /// Standard input (or a substitute in tests).
    pub input: &'a mut dyn Read,
    /// Standard output (or a substitute in tests).
    pub output: &'a mut dyn Write,
}

impl<'a, S: ?Sized> Context<'a, S> {
    pub fn new(service: &'a S, input: &'a mut dyn Read, output: &'a mut dyn Write) -> Self {
        Self {
            service,
            input,
            output,
        }
    }
}

/// Uniform tabular result of a list command.
///
/// Each item is the JSON form of one entity. Order is preserved exactly as
/// the handler produced it.
///
/// # Examples
///
/// ```
/// use command_spec_core::ListResult;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Row { id: u32, title: &'static str }
///
/// let list = ListResult::from_items(&[Row { id: 2, title: "b" }, Row { id: 1, title: "a" }]).unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.items()[0]["id"], 2);
/// assert_eq!(list.columns(), vec!["id", "title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ListResult {
    items: Vec<Json>,
}

impl ListResult {
    /// Converts a slice of serializable entities into a list result.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Serialize`] if an item fails to serialize.
    pub fn from_items<T: Serialize>(items: &[T]) -> Result<Self, DispatchError> {
        let items = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    /// Items in the order they were given.
    pub fn items(&self) -> &[Json] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` for an empty collection.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the union of object keys across items, in first-seen order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for item in &self.items {
            if let Json::Object(map) = item {
                for key in map.keys() {
                    if !columns.contains(&key.as_str()) {
                        columns.push(key.as_str());
                    }
                }
            }
        }
        columns
    }
}

/// Rendered help for a group or leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Help {
    /// Full command path (e.g. `broadcast-admin broadcasts create`).
    pub path: String,
    /// Plain-text help body.
    pub text: String,
}

/// What a dispatched command produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// Completed with nothing to render.
    Done,
    /// A single entity.
    Item(Json),
    /// A collection of entities.
    List(ListResult),
    /// Help was requested or no subcommand was given.
    Help(Help),
}

type HandlerFn<S, E, T> = Box<dyn Fn(&mut Context<'_, S>, &Values) -> Result<T, E>>;

/// A leaf's handler, stored as one of four shapes.
pub enum Handler<S: ?Sized, E> {
    Action(HandlerFn<S, E, ()>),
    Getter(HandlerFn<S, E, Json>),
    Lister(HandlerFn<S, E, ListResult>),
    Generic(HandlerFn<S, E, Outcome>),
}

impl<S: ?Sized, E> Handler<S, E> {
    /// Runs the handler and adapts its result to an [`Outcome`].
    pub fn run(&self, ctx: &mut Context<'_, S>, values: &Values) -> Result<Outcome, E> {
        match self {
            Handler::Action(f) => f(ctx, values).map(|()| Outcome::Done),
            Handler::Getter(f) => f(ctx, values).map(Outcome::Item),
            Handler::Lister(f) => f(ctx, values).map(Outcome::List),
            Handler::Generic(f) => f(ctx, values),
        }
    }

    /// Short name of the handler shape, used in logs.
    pub fn shape(&self) -> &'static str {
        match self {
            Handler::Action(_) => "action",
            Handler::Getter(_) => "getter",
            Handler::Lister(_) => "lister",
            Handler::Generic(_) => "generic",
        }
    }
}

impl<S: ?Sized, E> fmt::Debug for Handler<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler::{}", self.shape())
    }
}

/// A node of the command tree.
///
/// Groups route to children and never run anything themselves; leaves run
/// their handler and never have children.
///
/// # Examples
///
/// ```
/// use command_spec_core::*;
///
/// let show: CommandNode<(), DispatchError> = CommandNode::getter(
///     CommandSpec::new("show").with_arg(ArgSpec::new("id")),
///     |_, values| Ok(values.get_string("id").to_string()),
/// );
/// let group = CommandNode::group(CommandSpec::new("broadcasts"), vec![show]);
///
/// assert!(group.find_child("show").is_some());
/// assert!(group.handler().is_none());
/// ```
#[derive(Debug)]
pub enum CommandNode<S: ?Sized, E> {
    Group {
        spec: CommandSpec,
        children: Vec<CommandNode<S, E>>,
    },
    Leaf {
        spec: CommandSpec,
        handler: Handler<S, E>,
    },
}

impl<S: ?Sized + 'static, E: 'static> CommandNode<S, E> {
    /// Creates a group node.
    pub fn group(spec: CommandSpec, children: Vec<CommandNode<S, E>>) -> Self {
        CommandNode::Group { spec, children }
    }

    /// Creates a leaf whose handler only performs a side effect.
    pub fn action<F>(spec: CommandSpec, f: F) -> Self
    where
        F: Fn(&mut Context<'_, S>, &Values) -> Result<(), E> + 'static,
    {
        CommandNode::Leaf {
            spec,
            handler: Handler::Action(Box::new(f)),
        }
    }

    /// Creates a leaf that fetches and returns a single entity.
    pub fn getter<T, F>(spec: CommandSpec, f: F) -> Self
    where
        T: Serialize,
        F: Fn(&mut Context<'_, S>, &Values) -> Result<T, E> + 'static,
        E: From<DispatchError>,
    {
        let adapted = move |ctx: &mut Context<'_, S>, values: &Values| -> Result<Json, E> {
            let item = f(ctx, values)?;
            serde_json::to_value(item).map_err(|e| E::from(DispatchError::Serialize(e)))
        };
        CommandNode::Leaf {
            spec,
            handler: Handler::Getter(Box::new(adapted)),
        }
    }

    /// Creates a leaf that fetches a collection.
    pub fn lister<F>(spec: CommandSpec, f: F) -> Self
    where
        F: Fn(&mut Context<'_, S>, &Values) -> Result<ListResult, E> + 'static,
    {
        CommandNode::Leaf {
            spec,
            handler: Handler::Lister(Box::new(f)),
        }
    }

    /// Creates a leaf that builds its [`Outcome`] itself.
    pub fn generic<F>(spec: CommandSpec, f: F) -> Self
    where
        F: Fn(&mut Context<'_, S>, &Values) -> Result<Outcome, E> + 'static,
    {
        CommandNode::Leaf {
            spec,
            handler: Handler::Generic(Box::new(f)),
        }
    }
}

impl<S: ?Sized, E> CommandNode<S, E> {
    /// Returns the node's descriptor.
    pub fn spec(&self) -> &CommandSpec {
        match self {
            CommandNode::Group { spec, .. } | CommandNode::Leaf { spec, .. } => spec,
        }
    }

    /// Returns the children of a group, or `None` for a leaf.
    pub fn children(&self) -> Option<&[CommandNode<S, E>]> {
        match self {
            CommandNode::Group { children, .. } => Some(children),
            CommandNode::Leaf { .. } => None,
        }
    }

    /// Returns the handler of a leaf, or `None` for a group.
    pub fn handler(&self) -> Option<&Handler<S, E>> {
        match self {
            CommandNode::Leaf { handler, .. } => Some(handler),
            CommandNode::Group { .. } => None,
        }
    }

    /// Finds a direct child by name or alias.
    pub fn find_child(&self, token: &str) -> Option<&CommandNode<S, E>> {
        self.children()?.iter().find(|c| c.spec().matches(token))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde::Serialize;

    use super::*;
    use crate::spec::ArgSpec;
    use crate::values::Value;

    #[derive(Debug)]
    enum TestError {
        Dispatch,
        Failed(&'static str),
    }

    impl From<DispatchError> for TestError {
        fn from(_: DispatchError) -> Self {
            TestError::Dispatch
        }
    }

    #[derive(Serialize)]
    struct Item {
        id: u32,
    }

    fn run(node: &CommandNode<u32, TestError>, values: &Values) -> Result<Outcome, TestError> {
        let mut input = io::empty();
        let mut output = Vec::new();
        let mut ctx = Context::new(&7, &mut input, &mut output);
        node.handler().unwrap().run(&mut ctx, values)
    }

    fn values_with_id(id: &str) -> Values {
        let mut values = Values::default();
        values.insert("id", Value::String(id.to_string()));
        values
    }

    #[test]
    fn test_action_produces_done() {
        let node: CommandNode<u32, TestError> =
            CommandNode::action(CommandSpec::new("noop"), |_, _| Ok(()));
        assert_eq!(run(&node, &Values::default()).unwrap(), Outcome::Done);
    }

    #[test]
    fn test_action_error_propagates() {
        let node: CommandNode<u32, TestError> =
            CommandNode::action(CommandSpec::new("fail"), |_, _| Err(TestError::Failed("boom")));
        assert!(matches!(
            run(&node, &Values::default()),
            Err(TestError::Failed("boom"))
        ));
    }

    #[test]
    fn test_getter_serializes_item_and_sees_service() {
        let node: CommandNode<u32, TestError> = CommandNode::getter(
            CommandSpec::new("show").with_arg(ArgSpec::new("id")),
            |ctx, values| {
                let id: u32 = values.get_string("id").parse().unwrap_or(0);
                Ok(Item {
                    id: id + *ctx.service,
                })
            },
        );
        let outcome = run(&node, &values_with_id("35")).unwrap();
        assert_eq!(outcome, Outcome::Item(serde_json::json!({ "id": 42 })));
    }

    #[test]
    fn test_lister_keeps_order_and_allows_empty() {
        let node: CommandNode<u32, TestError> = CommandNode::lister(CommandSpec::new("list"), |_, _| {
            Ok(ListResult::from_items(&[Item { id: 3 }, Item { id: 1 }])?)
        });
        let Outcome::List(list) = run(&node, &Values::default()).unwrap() else {
            panic!("expected list outcome");
        };
        let ids: Vec<_> = list.items().iter().map(|i| i["id"].clone()).collect();
        assert_eq!(ids, vec![serde_json::json!(3), serde_json::json!(1)]);

        let empty = ListResult::from_items::<Item>(&[]).unwrap();
        assert!(empty.is_empty());
        assert!(empty.columns().is_empty());
    }

    #[test]
    fn test_generic_can_write_output() {
        let node: CommandNode<u32, TestError> =
            CommandNode::generic(CommandSpec::new("echo"), |ctx, _| {
                writeln!(ctx.output, "hello").map_err(|_| TestError::Failed("io"))?;
                Ok(Outcome::Done)
            });

        let mut input = io::empty();
        let mut output = Vec::new();
        let mut ctx = Context::new(&1, &mut input, &mut output);
        let outcome = node.handler().unwrap().run(&mut ctx, &Values::default());
        assert!(matches!(outcome, Ok(Outcome::Done)));
        assert_eq!(output, b"hello\n");
    }

    #[test]
    fn test_group_has_children_not_handler() {
        let group: CommandNode<u32, TestError> = CommandNode::group(
            CommandSpec::new("broadcasts").with_alias("broadcast"),
            vec![CommandNode::action(
                CommandSpec::new("delete").with_alias("rm"),
                |_, _| Ok(()),
            )],
        );
        assert!(group.handler().is_none());
        assert_eq!(group.children().map(<[_]>::len), Some(1));
        assert_eq!(group.find_child("rm").unwrap().spec().name, "delete");
        assert!(group.find_child("remove").is_none());
    }

    #[test]
    fn test_columns_union_in_first_seen_order() {
        let list = ListResult {
            items: vec![
                serde_json::json!({ "id": 1, "title": "a" }),
                serde_json::json!({ "id": 2, "level": "info" }),
            ],
        };
        assert_eq!(list.columns(), vec!["id", "title", "level"]);
    }
}

use std::fmt::Display;

use itertools::Itertools;
use serde_derive::Serialize;

use crate::types::Type;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    Name { name: String },
    String { value: String },
    Number { value: u32 },
    Boolean { value: bool },
    ObjectLit { entries: Vec<Node> },
    /// Object property; the value hangs under its key.
    StringKey { key: String, value: Box<Node> },
    Function { params: Vec<Node>, body: Box<Node> },
}

impl Node {
    pub fn name(name: impl Into<String>) -> Self {
        Node::Name { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::String {
            value: value.into(),
        }
    }

    pub fn empty_object() -> Self {
        Node::ObjectLit { entries: vec![] }
    }

    pub fn string_key(key: impl Into<String>, value: Node) -> Self {
        Node::StringKey {
            key: key.into(),
            value: Box::new(value),
        }
    }

    /// Number of nodes in this tree, which is what budgets are spent on.
    pub fn size(&self) -> usize {
        match self {
            Node::Name { .. } | Node::String { .. } | Node::Number { .. } | Node::Boolean { .. } => 1,
            Node::ObjectLit { entries } => 1 + entries.iter().map(Node::size).sum::<usize>(),
            Node::StringKey { value, .. } => 1 + value.size(),
            Node::Function { params, body } => {
                1 + params.iter().map(Node::size).sum::<usize>() + body.size()
            }
        }
    }

    /// Category of the value this node evaluates to. Names are untyped.
    pub fn value_type(&self) -> Option<Type> {
        match self {
            Node::String { .. } => Some(Type::String),
            Node::Number { .. } => Some(Type::Number),
            Node::Boolean { .. } => Some(Type::Boolean),
            Node::ObjectLit { .. } => Some(Type::Object),
            Node::Function { .. } => Some(Type::Function),
            Node::Name { .. } | Node::StringKey { .. } => None,
        }
    }

    pub fn entries(&self) -> &[Node] {
        match self {
            Node::ObjectLit { entries } => entries,
            _ => &[],
        }
    }

    /// write this tree to buffer as source text
    pub fn fold(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self.to_string().as_bytes());
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Name { name } => write!(f, "{name}"),
            Node::String { value } => {
                let quoted = serde_json::to_string(value).map_err(|_| std::fmt::Error)?;
                write!(f, "{quoted}")
            }
            Node::Number { value } => write!(f, "{value}"),
            Node::Boolean { value } => write!(f, "{value}"),
            Node::ObjectLit { entries } => write!(f, "{{{}}}", entries.iter().join(", ")),
            Node::StringKey { key, value } => write!(f, "{key}: {value}"),
            Node::Function { params, body } => write!(
                f,
                "function ({}) {{ return {body}; }}",
                params.iter().join(", ")
            ),
        }
    }
}

//! Conversion of configuration trees into labelled display nodes.

use unicode_width::UnicodeWidthStr;

use super::style::Painter;
use crate::model::dotted;
use crate::{CONSTRUCTOR_KEY, ConfigModel, ConfigValue, ConfigueError, ConfigueResult};

/// One display line plus its children.
#[derive(Debug)]
pub(super) struct Node {
    plain: String,
    styled: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(plain: String, styled: String) -> Self {
        Self {
            plain,
            styled,
            children: Vec::new(),
        }
    }
}

/// A rendered line: visible text for width computations and styled text
/// for output.
pub(super) struct Line {
    pub(super) plain: String,
    pub(super) styled: String,
}

impl Line {
    pub(super) fn width(&self) -> usize {
        self.plain.width()
    }
}

/// Text shown for a scalar leaf.
pub(super) fn scalar_text(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Missing => crate::MISSING.to_string(),
        ConfigValue::Null => "null".to_owned(),
        ConfigValue::Bool(flag) => flag.to_string(),
        ConfigValue::Integer(number) => number.to_string(),
        ConfigValue::Unsigned(number) => number.to_string(),
        ConfigValue::Float(number) => format!("{number:?}"),
        ConfigValue::String(text) => quote_string(text),
        ConfigValue::Reference(reference) => reference.to_string(),
        ConfigValue::List(_) | ConfigValue::Map(_) => String::new(),
    }
}

/// Quote `text` for display. Single quotes are preferred; double quotes are
/// used when the text holds a single quote and no double quote.
pub(super) fn quote_string(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            _ if c.is_control() => quoted.push_str(&format!("\\x{:02x}", u32::from(c))),
            _ => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

pub(super) struct TreeBuilder {
    painter: Painter,
    strict: bool,
}

impl TreeBuilder {
    pub(super) const fn new(painter: Painter, strict: bool) -> Self {
        Self { painter, strict }
    }

    /// Top-level nodes of `model`, limited to `depth` levels.
    pub(super) fn build(&self, model: &ConfigModel, depth: Option<usize>) -> ConfigueResult<Vec<Node>> {
        if depth == Some(0) {
            return Ok(Vec::new());
        }
        self.map_nodes(model, depth, "")
    }

    fn nodes(&self, value: &ConfigValue, depth: Option<usize>, prefix: &str) -> ConfigueResult<Vec<Node>> {
        if depth == Some(0) {
            return Ok(Vec::new());
        }
        match value {
            ConfigValue::Map(model) => self.map_nodes(model, depth, prefix),
            ConfigValue::List(items) => self.list_nodes(items, depth, prefix),
            scalar => {
                let text = scalar_text(scalar);
                let styled = self.painter.value(scalar, &text);
                Ok(vec![Node::leaf(text, styled)])
            }
        }
    }

    fn list_nodes(&self, items: &[ConfigValue], depth: Option<usize>, prefix: &str) -> ConfigueResult<Vec<Node>> {
        let mut nodes = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let path = dotted(prefix, &index.to_string());
            let children = self.nodes(item, child_depth(depth), &path)?;
            if matches!(item, ConfigValue::Map(_) | ConfigValue::List(_)) {
                let label = format!("[{index}]");
                nodes.push(Node {
                    styled: self.painter.border(&label),
                    plain: label,
                    children,
                });
            } else {
                nodes.extend(children);
            }
        }
        Ok(nodes)
    }

    fn map_nodes(&self, model: &ConfigModel, depth: Option<usize>, prefix: &str) -> ConfigueResult<Vec<Node>> {
        let mut nodes = Vec::with_capacity(model.len());
        for (key, value) in model.iter() {
            let path = dotted(prefix, key);
            let node = match value {
                ConfigValue::Missing => {
                    if self.strict {
                        return Err(ConfigueError::missing_value(path));
                    }
                    let shown = crate::MISSING.to_string();
                    Node::leaf(
                        format!("{key}: {shown}"),
                        format!("{key}: {}", self.painter.missing(&shown)),
                    )
                }
                _ if key == CONSTRUCTOR_KEY => {
                    let text = format!("{key}: {}", value.as_str().map_or_else(|| scalar_text(value), str::to_owned));
                    Node::leaf(text.clone(), self.painter.constructor(&text))
                }
                ConfigValue::Map(_) | ConfigValue::List(_) => Node {
                    plain: key.to_owned(),
                    styled: self.painter.key(key),
                    children: self.nodes(value, child_depth(depth), &path)?,
                },
                scalar => {
                    let text = scalar_text(scalar);
                    Node::leaf(
                        format!("{key}: {text}"),
                        format!("{key}: {}", self.painter.value(scalar, &text)),
                    )
                }
            };
            nodes.push(node);
        }
        Ok(nodes)
    }
}

const fn child_depth(depth: Option<usize>) -> Option<usize> {
    match depth {
        Some(levels) => Some(levels.saturating_sub(1)),
        None => None,
    }
}

/// Lay out one root node and its descendants with tree guides.
pub(super) fn layout(node: &Node) -> Vec<Line> {
    let mut lines = vec![Line {
        plain: node.plain.clone(),
        styled: node.styled.clone(),
    }];
    push_children(&node.children, "", &mut lines);
    lines
}

fn push_children(children: &[Node], indent: &str, lines: &mut Vec<Line>) {
    let count = children.len();
    for (position, child) in children.iter().enumerate() {
        let last = position + 1 == count;
        let guide = if last { "└── " } else { "├── " };
        lines.push(Line {
            plain: format!("{indent}{guide}{}", child.plain),
            styled: format!("{indent}{guide}{}", child.styled),
        });
        let nested_indent = format!("{indent}{}", if last { "    " } else { "│   " });
        push_children(&child.children, &nested_indent, lines);
    }
}

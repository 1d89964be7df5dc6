//! Records backing the list.
//!
//! A record is what the caller hands in; the list never mutates anything but
//! its computed `index` and the `is_selected` mirror of the selection set.

use super::identifiers::RecordIndex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A small cloneable content tree for rich (non plain-text) record content.
///
/// The render surface inserts a fresh clone of this tree into a slot each time
/// the record is bound, so the same tree can back any number of slots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichNode {
    /// Element tag, e.g. `span` or `b`.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Text carried directly by this node.
    #[serde(default)]
    pub text: Option<String>,
    /// Class names applied to the node.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Child nodes, in order.
    #[serde(default)]
    pub children: Vec<RichNode>,
}

fn default_tag() -> String {
    "span".to_string()
}

impl RichNode {
    /// Create an empty node with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the node's own text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a class name.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: RichNode) -> Self {
        self.children.push(child);
        self
    }

    /// Concatenated text of this node and all descendants, depth-first.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Record content: plain text or a cloneable rich node.
///
/// Anything else is unrepresentable, which is how the "text is neither a
/// string nor a cloneable node" caller error is ruled out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecordText {
    /// Plain text, set as the slot's text content.
    Plain(String),
    /// Rich content, cloned into the slot on every bind.
    Rich(Rc<RichNode>),
}

impl RecordText {
    /// Text as it would read on screen.
    pub fn plain_text(&self) -> String {
        match self {
            RecordText::Plain(text) => text.clone(),
            RecordText::Rich(node) => node.plain_text(),
        }
    }
}

impl Default for RecordText {
    fn default() -> Self {
        RecordText::Plain(String::new())
    }
}

impl From<&str> for RecordText {
    fn from(text: &str) -> Self {
        RecordText::Plain(text.to_string())
    }
}

impl From<String> for RecordText {
    fn from(text: String) -> Self {
        RecordText::Plain(text)
    }
}

impl From<RichNode> for RecordText {
    fn from(node: RichNode) -> Self {
        RecordText::Rich(Rc::new(node))
    }
}

/// Caller-defined decorations projected onto a slot when a record is bound.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserDefined {
    /// Fields copied onto the slot record.
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    /// Attributes set on the slot node. `None` (falsy) removes the attribute.
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attributes: BTreeMap<String, Option<String>>,
    /// Classes added to the slot node when `true`.
    #[serde(default)]
    pub classes: BTreeMap<String, bool>,
}

impl UserDefined {
    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add an attribute; `None` requests removal.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.attributes
            .insert(key.into(), value.map(str::to_string));
        self
    }

    /// Add a class toggle.
    pub fn with_class(mut self, class: impl Into<String>, enabled: bool) -> Self {
        self.classes.insert(class.into(), enabled);
        self
    }
}

/// Maps JSON attribute values onto set/remove semantics.
///
/// `null`, `false`, `0` and `""` are falsy and mean "remove".
fn attribute_value(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn deserialize_attributes<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, attribute_value(value)))
        .collect())
}

/// One entry in the list.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Displayed content.
    pub text: RecordText,
    /// Prefix icon source.
    #[serde(default)]
    pub icon_url1: Option<String>,
    /// Suffix icon source.
    #[serde(default)]
    pub icon_url2: Option<String>,
    /// Collapse the prefix icon column for this record.
    #[serde(default)]
    pub no_prefix_icon: bool,
    /// Collapse the suffix icon column for this record.
    #[serde(default)]
    pub no_suffix_icon: bool,
    /// Whether the record is part of the selection.
    #[serde(default)]
    pub is_selected: bool,
    /// Caller decorations.
    #[serde(default)]
    pub user_defined: Option<UserDefined>,
    #[serde(skip)]
    index: RecordIndex,
}

impl Record {
    /// Create a record with the given content and no decorations.
    pub fn new(text: impl Into<RecordText>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the prefix icon source.
    pub fn with_prefix_icon(mut self, url: impl Into<String>) -> Self {
        self.icon_url1 = Some(url.into());
        self
    }

    /// Set the suffix icon source.
    pub fn with_suffix_icon(mut self, url: impl Into<String>) -> Self {
        self.icon_url2 = Some(url.into());
        self
    }

    /// Collapse the prefix icon column.
    pub fn without_prefix_icon(mut self) -> Self {
        self.no_prefix_icon = true;
        self
    }

    /// Collapse the suffix icon column.
    pub fn without_suffix_icon(mut self) -> Self {
        self.no_suffix_icon = true;
        self
    }

    /// Mark the record as selected.
    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    /// Attach caller decorations.
    pub fn with_user_defined(mut self, user_defined: UserDefined) -> Self {
        self.user_defined = Some(user_defined);
        self
    }

    /// Position of the record in its dataset (computed, never caller supplied).
    pub fn index(&self) -> RecordIndex {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = RecordIndex::new(index);
    }

    /// Clone that duplicates rich content instead of sharing it.
    pub fn deep_clone(&self) -> Self {
        let mut copy = self.clone();
        if let RecordText::Rich(node) = &self.text {
            copy.text = RecordText::Rich(Rc::new(RichNode::clone(node)));
        }
        copy
    }
}

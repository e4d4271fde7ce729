//! Arena-backed in-memory document.
//!
//! # Responsibility
//! - Implement `DomPort` without a browser so components run in tests and
//!   in the preview CLI.
//! - Serialize subtrees back to markup for inspection.
//!
//! # Invariants
//! - `NodeId` values are never reused; detached nodes stay in the arena.
//! - Only nodes reachable from the document root are visible to
//!   `find_by_id` and `query_all`.
//! - Markup passed to `set_inner_html` is stored verbatim, not parsed.

use crate::dom::{DomError, DomPort, DomResult, Selector};
use crate::text::{escape_html, unescape_html};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];
const FIELD_TAGS: &[&str] = &["input", "textarea", "select"];

/// Stable handle into one `MemoryDom` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    /// Raw markup inserted through `set_inner_html`.
    Markup(String),
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    value: String,
    default_value: String,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// In-memory document with a `<body>` element under the root.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
            body: NodeId(0),
        };
        let body = dom.push_node(
            Some(dom.root),
            NodeKind::Element(Element {
                tag: "body".to_string(),
                ..Element::default()
            }),
        );
        dom.body = body;
        dom
    }

    /// Returns the `<body>` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Creates an element with attributes and appends it to `parent`.
    ///
    /// `class` values are split on whitespace; `value` also becomes the
    /// field's reset default.
    pub fn append_new(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> DomResult<NodeId> {
        let node = self.create_element(tag)?;
        for (name, value) in attrs {
            self.set_attribute(&node, name, value)?;
        }
        self.append_child(&parent, &node)?;
        Ok(node)
    }

    /// Appends one text node to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> DomResult<NodeId> {
        self.element(parent)?;
        Ok(self.push_node(Some(parent), NodeKind::Text(text.to_string())))
    }

    /// Simulates user input into a form field.
    pub fn set_field_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(node)?.value = value.to_string();
        Ok(())
    }

    /// Returns the tag name of an element node.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).ok().map(|element| element.tag.as_str())
    }

    /// Element children of `node` in order.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|entry| {
                entry
                    .children
                    .iter()
                    .copied()
                    .filter(|child| self.element(*child).is_ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Serialized markup of the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Ok(entry) = self.node(node) {
            for child in &entry.children {
                self.write_html(*child, &mut out);
            }
        }
        out
    }

    /// Serialized markup of `node` itself.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Whether `node` is attached and not hidden with `display: none`,
    /// either itself or through an ancestor.
    pub fn is_displayed(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Ok(element) = self.element(id) {
                if element.styles.get("display").map(String::as_str) == Some("none") {
                    return false;
                }
            }
            current = self.node(id).ok().and_then(|entry| entry.parent);
        }
        self.is_attached(node)
    }

    fn push_node(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            kind,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| DomError::UnknownNode(id.to_string()))
    }

    fn element(&self, id: NodeId) -> DomResult<&Element> {
        match &self.node(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id.to_string())),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut Element> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or_else(|| DomError::UnknownNode(id.to_string()))?;
        match &mut node.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id.to_string())),
        }
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.node(node).ok().and_then(|entry| entry.parent);
        }
        false
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).ok().and_then(|entry| entry.parent);
        }
        false
    }

    /// Attached elements in document order.
    fn document_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.element(id).is_ok() {
                out.push(id);
            }
            if let Ok(entry) = self.node(id) {
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        out
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(id)
            .map(|entry| entry.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Ok(entry) = self.node(current) {
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        out
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0]
                .children
                .retain(|existing| *existing != child);
        }
    }

    fn replace_children(&mut self, node: NodeId, kind: NodeKind) -> DomResult<()> {
        self.element(node)?;
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.push_node(Some(node), kind);
        Ok(())
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Ok(entry) = self.node(id) else {
            return;
        };
        match &entry.kind {
            NodeKind::Document => {
                for child in &entry.children {
                    self.write_html(*child, out);
                }
            }
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Markup(markup) => out.push_str(markup),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in serialized_attributes(element) {
                    out.push_str(&format!(" {name}=\"{}\"", escape_html(&value)));
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &entry.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Ok(entry) = self.node(id) else {
            return;
        };
        match &entry.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Markup(markup) => out.push_str(&unescape_html(&strip_tags(markup))),
            NodeKind::Document | NodeKind::Element(_) => {
                for child in &entry.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }
}

impl DomPort for MemoryDom {
    type Node = NodeId;

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_elements().into_iter().find(|node| {
            self.element(*node)
                .map(|element| element.attrs.get("id").map(String::as_str) == Some(id))
                .unwrap_or(false)
        })
    }

    fn create_element(&mut self, tag: &str) -> DomResult<NodeId> {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.is_empty() {
            return Err(DomError::Host("element tag must not be empty".to_string()));
        }
        Ok(self.push_node(
            None,
            NodeKind::Element(Element {
                tag,
                ..Element::default()
            }),
        ))
    }

    fn query_all(&self, selector: Selector<'_>) -> Vec<NodeId> {
        self.document_elements()
            .into_iter()
            .filter(|node| {
                let Ok(element) = self.element(*node) else {
                    return false;
                };
                match selector {
                    Selector::Class(name) => element.classes.iter().any(|class| class == name),
                    Selector::IdPrefix(prefix) => element
                        .attrs
                        .get("id")
                        .map(|id| id.starts_with(prefix))
                        .unwrap_or(false),
                }
            })
            .collect()
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> DomResult<()> {
        self.element(*parent)?;
        self.node(*child)?;
        if self.is_ancestor_or_self(*child, *parent) {
            return Err(DomError::Host(format!(
                "cannot append {child} inside its own subtree"
            )));
        }
        self.detach(*child);
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let element = self.element(*node).ok()?;
        match name {
            "class" if !element.classes.is_empty() => Some(element.classes.join(" ")),
            "class" => None,
            "style" if !element.styles.is_empty() => Some(serialize_styles(&element.styles)),
            "style" => None,
            other => element.attrs.get(other).cloned(),
        }
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> DomResult<()> {
        let element = self.element_mut(*node)?;
        match name {
            "class" => {
                element.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "style" => {
                element.styles = parse_styles(value);
            }
            "value" => {
                element.value = value.to_string();
                element.default_value = value.to_string();
                element.attrs.insert(name.to_string(), value.to_string());
            }
            other => {
                element.attrs.insert(other.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn text(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.collect_text(*node, &mut out);
        out
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> DomResult<()> {
        self.replace_children(*node, NodeKind::Text(text.to_string()))
    }

    fn set_inner_html(&mut self, node: &NodeId, html: &str) -> DomResult<()> {
        self.replace_children(*node, NodeKind::Markup(html.to_string()))
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element(*node)
            .map(|element| element.classes.iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> DomResult<()> {
        let element = self.element_mut(*node)?;
        if !element.classes.iter().any(|existing| existing == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> DomResult<()> {
        self.element_mut(*node)?
            .classes
            .retain(|existing| existing != class);
        Ok(())
    }

    fn toggle_class(&mut self, node: &NodeId, class: &str) -> DomResult<bool> {
        if self.has_class(node, class) {
            self.remove_class(node, class)?;
            Ok(false)
        } else {
            self.add_class(node, class)?;
            Ok(true)
        }
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.element(*node)
            .ok()?
            .styles
            .get(property)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) -> DomResult<()> {
        let element = self.element_mut(*node)?;
        if value.is_empty() {
            element.styles.remove(property);
        } else {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    fn previous_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.node(*node).ok()?.parent?;
        let siblings = &self.node(parent).ok()?.children;
        let position = siblings.iter().position(|sibling| sibling == node)?;
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.element(*sibling).is_ok())
    }

    fn field_value(&self, node: &NodeId) -> String {
        self.element(*node)
            .map(|element| element.value.clone())
            .unwrap_or_default()
    }

    fn reset_form(&mut self, form: &NodeId) -> DomResult<()> {
        self.element(*form)?;
        for node in self.descendants(*form) {
            if let Ok(element) = self.element_mut(node) {
                if FIELD_TAGS.contains(&element.tag.as_str()) {
                    element.value = element.default_value.clone();
                }
            }
        }
        Ok(())
    }
}

fn serialized_attributes(element: &Element) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if let Some(id) = element.attrs.get("id") {
        out.push(("id".to_string(), id.clone()));
    }
    if !element.classes.is_empty() {
        out.push(("class".to_string(), element.classes.join(" ")));
    }
    for (name, value) in &element.attrs {
        if name != "id" {
            out.push((name.clone(), value.clone()));
        }
    }
    if !element.styles.is_empty() {
        out.push(("style".to_string(), serialize_styles(&element.styles)));
    }
    out
}

fn serialize_styles(styles: &BTreeMap<String, String>) -> String {
    styles
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_styles(value: &str) -> BTreeMap<String, String> {
    value
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((property.to_string(), value.to_string()))
        })
        .collect()
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

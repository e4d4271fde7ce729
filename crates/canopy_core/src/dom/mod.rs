//! DOM port contracts.
//!
//! # Responsibility
//! - Define the only capability set components may use to read or mutate
//!   the document.
//! - Keep host details (browser bindings, in-memory arena) behind one trait.
//!
//! # Invariants
//! - Components never hold host globals; every call goes through a `DomPort`.
//! - Read operations are infallible; missing data is reported as `None`.
//! - Mutating operations return `DomResult` so host failures propagate.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub mod memory;

pub use memory::{MemoryDom, NodeId};

pub type DomResult<T> = Result<T, DomError>;

/// Element query accepted by [`DomPort::query_all`].
///
/// Kept as a closed set so in-memory hosts do not need a CSS engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Elements carrying the class name, e.g. `.project-card`.
    Class(&'a str),
    /// Elements whose `id` starts with the prefix, e.g. `[id^="year"]`.
    IdPrefix(&'a str),
}

impl Selector<'_> {
    /// Returns the equivalent CSS selector string.
    pub fn to_css(&self) -> String {
        match self {
            Self::Class(name) => format!(".{name}"),
            Self::IdPrefix(prefix) => format!("[id^=\"{prefix}\"]"),
        }
    }
}

/// Capability set every component depends on.
///
/// `Node` is a cheap handle; cloning it never clones the underlying element.
pub trait DomPort {
    type Node: Clone + PartialEq + Debug;

    /// Looks up one attached element by `id`.
    fn find_by_id(&self, id: &str) -> Option<Self::Node>;
    /// Creates a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> DomResult<Self::Node>;
    /// Returns attached elements matching the selector in document order.
    fn query_all(&self, selector: Selector<'_>) -> Vec<Self::Node>;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> DomResult<()>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> DomResult<()>;

    fn text(&self, node: &Self::Node) -> String;
    /// Replaces all children of `node` with one text node.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> DomResult<()>;
    /// Replaces all children of `node` with host-parsed markup.
    ///
    /// Callers are responsible for escaping untrusted text first.
    fn set_inner_html(&mut self, node: &Self::Node, html: &str) -> DomResult<()>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str) -> DomResult<()>;
    fn remove_class(&mut self, node: &Self::Node, class: &str) -> DomResult<()>;
    /// Toggles `class` and returns whether it is present afterwards.
    fn toggle_class(&mut self, node: &Self::Node, class: &str) -> DomResult<bool>;

    /// Returns one inline style property, `None` when unset or empty.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;
    /// Sets one inline style property; an empty value clears it.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str) -> DomResult<()>;

    fn previous_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Current value of a form field (`input`, `textarea`).
    fn field_value(&self, node: &Self::Node) -> String;
    /// Restores every field of a form to its default value.
    fn reset_form(&mut self, form: &Self::Node) -> DomResult<()>;
}

/// Host-level DOM failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Handle does not belong to this document.
    UnknownNode(String),
    /// Operation needs an element but got another node kind.
    NotAnElement(String),
    /// Host binding rejected the call.
    Host(String),
}

impl Display for DomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(f, "unknown DOM node: {node}"),
            Self::NotAnElement(node) => write!(f, "DOM node is not an element: {node}"),
            Self::Host(message) => write!(f, "DOM host error: {message}"),
        }
    }
}

impl Error for DomError {}

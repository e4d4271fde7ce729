//! Mobile navigation toggles.
//!
//! # Invariants
//! - The toggled menu is the button's previous element sibling.
//! - `aria-expanded` on the button always mirrors the menu's `open` class.

use crate::dom::{DomPort, DomResult, Selector};
use log::debug;

pub const NAV_TOGGLE_CLASS: &str = "nav-toggle";
pub const NAV_OPEN_CLASS: &str = "open";
pub const ARIA_EXPANDED_ATTR: &str = "aria-expanded";

/// Navigation toggle buttons found at startup.
#[derive(Debug, Clone)]
pub struct NavToggles<N> {
    buttons: Vec<N>,
}

impl<N: Clone + PartialEq> NavToggles<N> {
    pub fn wire<D: DomPort<Node = N>>(dom: &D) -> Self {
        Self {
            buttons: dom.query_all(Selector::Class(NAV_TOGGLE_CLASS)),
        }
    }

    pub fn buttons(&self) -> &[N] {
        &self.buttons
    }

    pub fn contains(&self, node: &N) -> bool {
        self.buttons.contains(node)
    }

    /// Flips the menu before `button` and returns whether it is now open.
    ///
    /// A button without a preceding menu reports `aria-expanded="false"`.
    pub fn toggle<D: DomPort<Node = N>>(&self, dom: &mut D, button: &N) -> DomResult<bool> {
        let open = match dom.previous_element_sibling(button) {
            Some(menu) => dom.toggle_class(&menu, NAV_OPEN_CLASS)?,
            None => false,
        };
        dom.set_attribute(button, ARIA_EXPANDED_ATTR, if open { "true" } else { "false" })?;
        debug!("event=nav_toggled module=nav status=ok open={open}");
        Ok(open)
    }
}

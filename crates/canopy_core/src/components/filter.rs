//! Category filter controls.
//!
//! # Responsibility
//! - Hold the set of filter controls wired at startup.
//! - On activation, mark exactly one control active and re-evaluate every
//!   card's visibility.
//!
//! # Invariants
//! - Visibility is recomputed from scratch on every activation.
//! - Cards are only shown or hidden, never re-rendered.
//! - No ARIA state is written for filter controls.

use crate::components::render::{CARD_CLASS, CARD_TYPE_ATTR};
use crate::dom::{DomPort, DomResult, Selector};
use log::debug;

/// Class of clickable filter controls.
pub const FILTER_CONTROL_CLASS: &str = "filter-pill";
/// Attribute holding a control's filter key.
pub const FILTER_KEY_ATTR: &str = "data-filter";
/// Class marking the active control.
pub const ACTIVE_CLASS: &str = "active";
/// Filter key that shows every card.
pub const WILDCARD_KEY: &str = "all";

/// Parsed filter key of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKey {
    All,
    Category(String),
}

impl FilterKey {
    pub fn parse(raw: &str) -> Self {
        if raw == WILDCARD_KEY {
            Self::All
        } else {
            Self::Category(raw.to_string())
        }
    }

    /// Whether a card with `category` stays visible under this key.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Category(key) => category == Some(key.as_str()),
        }
    }
}

/// Filter controls wired against the page's cards.
#[derive(Debug, Clone)]
pub struct FilterBar<N> {
    controls: Vec<N>,
}

impl<N: Clone + PartialEq> FilterBar<N> {
    /// Wires every `.filter-pill` on the page.
    pub fn wire<D: DomPort<Node = N>>(dom: &D) -> Self {
        Self::from_controls(dom.query_all(Selector::Class(FILTER_CONTROL_CLASS)))
    }

    pub fn from_controls(controls: Vec<N>) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &[N] {
        &self.controls
    }

    pub fn contains(&self, node: &N) -> bool {
        self.controls.contains(node)
    }

    /// Activates `control` and applies its key to every current card.
    ///
    /// Returns the number of cards left visible. A control without a key
    /// hides every card.
    pub fn activate<D: DomPort<Node = N>>(&self, dom: &mut D, control: &N) -> DomResult<usize> {
        for other in &self.controls {
            dom.remove_class(other, ACTIVE_CLASS)?;
        }
        dom.add_class(control, ACTIVE_CLASS)?;

        let key = dom
            .attribute(control, FILTER_KEY_ATTR)
            .map(|raw| FilterKey::parse(&raw));
        let mut visible = 0;
        for card in dom.query_all(Selector::Class(CARD_CLASS)) {
            let category = dom.attribute(&card, CARD_TYPE_ATTR);
            let show = key
                .as_ref()
                .map(|key| key.matches(category.as_deref()))
                .unwrap_or(false);
            dom.set_style(&card, "display", if show { "" } else { "none" })?;
            if show {
                visible += 1;
            }
        }
        debug!(
            "event=filter_applied module=filter status=ok key={} visible={}",
            key.as_ref()
                .map(|key| match key {
                    FilterKey::All => WILDCARD_KEY,
                    FilterKey::Category(value) => value.as_str(),
                })
                .unwrap_or("<none>"),
            visible
        );
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::FilterKey;

    #[test]
    fn wildcard_matches_everything() {
        assert!(FilterKey::parse("all").matches(Some("renewable")));
        assert!(FilterKey::parse("all").matches(None));
    }

    #[test]
    fn category_matches_exactly() {
        let key = FilterKey::parse("renewable");
        assert!(key.matches(Some("renewable")));
        assert!(!key.matches(Some("Renewable")));
        assert!(!key.matches(None));
    }

    #[test]
    fn wildcard_is_case_sensitive() {
        assert_eq!(FilterKey::parse("All"), FilterKey::Category("All".to_string()));
    }
}

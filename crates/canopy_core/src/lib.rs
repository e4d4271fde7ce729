//! Client-side behaviors for the Canopy project showcase site.
//! Every behavior runs against the `DomPort` trait, so the same code drives a
//! browser document and the in-memory document used in tests and previews.

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod model;
pub mod page;
pub mod templates;
pub mod text;

pub use components::counter::{
    AnimationHandle, AnimationState, CounterAnimation, CounterAnimator, FrameStatus,
};
pub use components::filter::{FilterBar, FilterKey};
pub use components::forms::{
    is_email_shaped, validate_newsletter, ContactSubmission, FormError, FormKind, FormOutcome,
    Forms,
};
pub use components::nav::NavToggles;
pub use components::render::{card_markup, create_card, render, render_into};
pub use config::{ConfigError, SiteConfig};
pub use dom::{DomError, DomPort, DomResult, MemoryDom, NodeId, Selector};
pub use error::{PageError, PageResult};
#[cfg(not(target_arch = "wasm32"))]
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::counter::{default_counters, CounterSpec};
pub use model::project::{sample_projects, ProjectId, ProjectRecord};
pub use page::{EventOutcome, InitReport, PageClock, PageEvent, SitePage};
pub use templates::PageTemplate;
pub use text::{escape_html, format_grouped, unescape_html};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

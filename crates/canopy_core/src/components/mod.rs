//! Page behaviors built on the DOM port.
//!
//! # Responsibility
//! - Card rendering, category filtering and counter animation (the core).
//! - Navigation toggles, form validation and placeholder content.
//!
//! # Invariants
//! - Components read and write the document only through `DomPort`.
//! - Absent optional elements are a silent no-op, never an error.

pub mod counter;
pub mod filter;
pub mod forms;
pub mod nav;
pub mod placeholders;
pub mod render;

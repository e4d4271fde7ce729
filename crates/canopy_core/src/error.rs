//! Page-level error type.

use crate::dom::DomError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PageResult<T> = Result<T, PageError>;

/// Failures surfaced while wiring or handling page events.
///
/// Validation problems are not errors; they are shown inline instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    Dom(DomError),
    /// A feature's root element exists but a required part of it is missing.
    MissingElement(&'static str),
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dom(err) => write!(f, "{err}"),
            Self::MissingElement(id) => write!(f, "required element is missing: #{id}"),
        }
    }
}

impl Error for PageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dom(err) => Some(err),
            Self::MissingElement(_) => None,
        }
    }
}

impl From<DomError> for PageError {
    fn from(value: DomError) -> Self {
        Self::Dom(value)
    }
}

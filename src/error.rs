//! Error types for section declaration.

use std::fmt::{Display, Formatter};

/// Errors raised while validating a section list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// A section was declared with an empty id.
    EmptyId { index: usize },
    /// Two sections share the same id.
    DuplicateId { id: String },
}

impl Display for SectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId { index } => write!(f, "section at position {} has an empty id", index),
            Self::DuplicateId { id } => write!(f, "duplicate section id: {}", id),
        }
    }
}

impl std::error::Error for SectionError {}

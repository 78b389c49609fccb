//! Core types shared across the frame store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire label for a value facet
pub const LABEL_VALUE: &str = "value";
/// Wire label for a method facet
pub const LABEL_METHOD: &str = "method";
/// Wire label for a reference facet
pub const LABEL_REF: &str = "ref";

/// Kind of content attached to a slot
///
/// `Value`, `Method`, and `Reference` are mutually exclusive as the
/// primary facet of a slot; `Demon` facets are independent annotations
/// layered on top, identified by an open-ended tag. Hook demons follow
/// the `if<verb><kind>` naming convention (e.g. `ifgetv`, `ifputm`,
/// `ifref`); any other tag names a directly-invoked annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FacetKind {
    Value,
    Method,
    Reference,
    Demon(String),
}

impl FacetKind {
    /// The label used for this kind in persisted documents.
    ///
    /// Demon facets are labeled by their tag, which is why demon tags may
    /// not shadow the reserved labels (see [`FacetKind::is_reserved_tag`]).
    pub fn label(&self) -> &str {
        match self {
            FacetKind::Value => LABEL_VALUE,
            FacetKind::Method => LABEL_METHOD,
            FacetKind::Reference => LABEL_REF,
            FacetKind::Demon(tag) => tag,
        }
    }

    /// Reconstruct a facet kind from a persisted label.
    pub fn from_label(label: &str) -> FacetKind {
        match label {
            LABEL_VALUE => FacetKind::Value,
            LABEL_METHOD => FacetKind::Method,
            LABEL_REF => FacetKind::Reference,
            tag => FacetKind::Demon(tag.to_string()),
        }
    }

    /// True if `tag` collides with one of the primary facet labels and is
    /// therefore unusable as a demon tag.
    pub fn is_reserved_tag(tag: &str) -> bool {
        matches!(tag, LABEL_VALUE | LABEL_METHOD | LABEL_REF)
    }

    /// True for `Value`, `Method`, and `Reference`.
    pub fn is_primary(&self) -> bool {
        !matches!(self, FacetKind::Demon(_))
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

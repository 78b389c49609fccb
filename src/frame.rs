//! Frame data model
//!
//! In-memory representation of a frame: a slot map where each slot holds
//! its facet dictionary, plus an optional membership set that marks the
//! frame as a frameset. Mutation goes exclusively through the
//! [`FrameStore`](crate::FrameStore) operations.

use crate::types::FacetKind;
use std::collections::{HashMap, HashSet};

/// A named attribute of a frame
///
/// The slot's facet-type set is the key set of `facets`; content defaults
/// to the empty string when a facet is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    pub facets: HashMap<FacetKind, String>,
}

impl Slot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The facet kinds currently attached, sorted for deterministic listing.
    pub fn facet_kinds(&self) -> Vec<FacetKind> {
        let mut kinds: Vec<FacetKind> = self.facets.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// True if the slot carries any of `Value`, `Method`, or `Reference`.
    pub fn has_primary(&self) -> bool {
        self.facets.keys().any(FacetKind::is_primary)
    }
}

/// A uniquely named entity owning slots and facets
///
/// A frame with `members: Some(_)` additionally acts as a frameset; the
/// membership set holds frame names and is deliberately not referentially
/// enforced against the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub slots: HashMap<String, Slot>,
    pub members: Option<HashSet<String>>,
}

impl Frame {
    /// Create an empty plain frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frameset (a frame with an empty membership set).
    pub fn new_frameset() -> Self {
        Frame {
            slots: HashMap::new(),
            members: Some(HashSet::new()),
        }
    }

    pub fn is_frameset(&self) -> bool {
        self.members.is_some()
    }

    /// Slot names, sorted for deterministic listing.
    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().cloned().collect();
        names.sort();
        names
    }

    /// Shape equality: do two frames declare the same slot names?
    ///
    /// Facet content is deliberately not inspected.
    pub fn same_shape(&self, other: &Frame) -> bool {
        if self.slots.len() != other.slots.len() {
            return false;
        }
        self.slots.keys().all(|name| other.slots.contains_key(name))
    }
}

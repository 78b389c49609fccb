//! Slot and facet primitives.
//!
//! The generic shape shared by all four facet kinds: create/get/put/
//! remove/exists keyed by the composite (frame, slot, kind) key. This
//! layer is strictly local: no delegation and no demon dispatch. The
//! canonical operations in [`resolver`](crate::resolver) and
//! [`demon`](crate::demon) are built on top of it.

use crate::frame::Slot;
use crate::registry::FrameStore;
use crate::types::FacetKind;
use tracing::debug;

impl FrameStore {
    /// Determine if a slot exists on a frame.
    pub fn slot_exists(&self, frame: &str, slot: &str) -> bool {
        self.frames
            .get(frame)
            .map(|f| f.slots.contains_key(slot))
            .unwrap_or(false)
    }

    /// Declare a slot with an empty facet-type set.
    ///
    /// Fails if the frame is absent or the slot is already declared.
    /// Slot names may not contain a comma: persisted documents key facet
    /// entries by the composite `"slot,label"` string.
    pub fn create_slot(&mut self, frame: &str, slot: &str) -> bool {
        if slot.is_empty() || slot.contains(',') {
            return false;
        }
        let Some(f) = self.frames.get_mut(frame) else {
            return false;
        };
        if f.slots.contains_key(slot) {
            return false;
        }
        debug!(frame, slot, "creating slot");
        f.slots.insert(slot.to_string(), Slot::new());
        true
    }

    /// Remove a slot and every facet entry keyed to it.
    pub fn remove_slot(&mut self, frame: &str, slot: &str) -> bool {
        let Some(f) = self.frames.get_mut(frame) else {
            return false;
        };
        let removed = f.slots.remove(slot).is_some();
        if removed {
            debug!(frame, slot, "removed slot");
        }
        removed
    }

    /// Slot names declared on a frame, sorted. Empty if the frame is absent.
    pub fn list_slots(&self, frame: &str) -> Vec<String> {
        self.frames
            .get(frame)
            .map(|f| f.slot_names())
            .unwrap_or_default()
    }

    /// Facet kinds attached to a slot, sorted. Empty if frame or slot is absent.
    pub fn list_facet_kinds(&self, frame: &str, slot: &str) -> Vec<FacetKind> {
        self.frames
            .get(frame)
            .and_then(|f| f.slots.get(slot))
            .map(|s| s.facet_kinds())
            .unwrap_or_default()
    }

    /// Determine if a facet entry exists for the composite key.
    pub fn facet_exists(&self, frame: &str, slot: &str, kind: &FacetKind) -> bool {
        self.frames
            .get(frame)
            .and_then(|f| f.slots.get(slot))
            .map(|s| s.facets.contains_key(kind))
            .unwrap_or(false)
    }

    /// Attach a facet of the given kind with empty content.
    ///
    /// `Value`, `Method`, and `Reference` are mutually exclusive as the
    /// primary facet of a slot; creation fails if another primary kind is
    /// already attached, if the facet already exists, or if a demon tag
    /// is empty or shadows a primary label.
    pub fn create_facet(&mut self, frame: &str, slot: &str, kind: &FacetKind) -> bool {
        let Some(s) = self
            .frames
            .get_mut(frame)
            .and_then(|f| f.slots.get_mut(slot))
        else {
            return false;
        };
        if s.facets.contains_key(kind) {
            return false;
        }
        match kind {
            FacetKind::Value | FacetKind::Method | FacetKind::Reference => {
                if s.has_primary() {
                    return false;
                }
            }
            FacetKind::Demon(tag) => {
                if tag.is_empty() || FacetKind::is_reserved_tag(tag) {
                    return false;
                }
            }
        }
        debug!(frame, slot, kind = %kind, "creating facet");
        s.facets.insert(kind.clone(), String::new());
        true
    }

    /// Detach a facet and discard its content.
    pub fn remove_facet(&mut self, frame: &str, slot: &str, kind: &FacetKind) -> bool {
        let Some(s) = self
            .frames
            .get_mut(frame)
            .and_then(|f| f.slots.get_mut(slot))
        else {
            return false;
        };
        let removed = s.facets.remove(kind).is_some();
        if removed {
            debug!(frame, slot, kind = %kind, "removed facet");
        }
        removed
    }

    /// Content of a facet entry, or `None` if the key is absent.
    pub fn get_facet(&self, frame: &str, slot: &str, kind: &FacetKind) -> Option<String> {
        self.frames
            .get(frame)
            .and_then(|f| f.slots.get(slot))
            .and_then(|s| s.facets.get(kind))
            .cloned()
    }

    /// Overwrite the content of an existing facet entry.
    pub fn put_facet(&mut self, frame: &str, slot: &str, kind: &FacetKind, content: &str) -> bool {
        let Some(existing) = self
            .frames
            .get_mut(frame)
            .and_then(|f| f.slots.get_mut(slot))
            .and_then(|s| s.facets.get_mut(kind))
        else {
            return false;
        };
        *existing = content.to_string();
        true
    }

    /// Copy every facet entry for `slot` from `src_frame` into `dst_frame`.
    ///
    /// Declares the slot on the destination if needed and overwrites
    /// entries already present there.
    pub fn copy_slot(&mut self, src_frame: &str, slot: &str, dst_frame: &str) -> bool {
        if !self.slot_exists(src_frame, slot) || !self.frame_exists(dst_frame) {
            return false;
        }
        let Some(copied) = self
            .frames
            .get(src_frame)
            .and_then(|f| f.slots.get(slot))
            .cloned()
        else {
            return false;
        };
        let Some(dst) = self.frames.get_mut(dst_frame) else {
            return false;
        };
        let target = dst.slots.entry(slot.to_string()).or_default();
        for (kind, content) in copied.facets {
            target.facets.insert(kind, content);
        }
        debug!(src = src_frame, dst = dst_frame, slot, "copied slot");
        true
    }

    /// Compare a slot across two frames.
    ///
    /// True iff both frames declare the slot, the facet-type sets are
    /// equal, and every facet entry has identical content in both.
    pub fn compare_slot(&self, a: &str, slot: &str, b: &str) -> bool {
        match (
            self.frames.get(a).and_then(|f| f.slots.get(slot)),
            self.frames.get(b).and_then(|f| f.slots.get(slot)),
        ) {
            (Some(sa), Some(sb)) => sa == sb,
            _ => false,
        }
    }
}

//! Frame registry: frame-level lifecycle over the live object graph.
//!
//! [`FrameStore`] is the single owner of every live frame, the capability
//! table, and the store options. Embedding applications construct one
//! explicitly and thread it through all operations; there are no ambient
//! globals.

use crate::config::StoreOptions;
use crate::demon::Capability;
use crate::frame::Frame;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The frame store: registry, facet dictionaries, and capability table
#[derive(Default)]
pub struct FrameStore {
    pub(crate) frames: HashMap<String, Frame>,
    pub(crate) capabilities: HashMap<String, Arc<dyn Capability>>,
    pub(crate) options: StoreOptions,
}

impl FrameStore {
    /// Create an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with explicit options.
    pub fn with_options(options: StoreOptions) -> Self {
        FrameStore {
            frames: HashMap::new(),
            capabilities: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Determine if a frame is registered.
    pub fn frame_exists(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    /// Register a new empty frame. Fails if the name is already taken.
    pub fn create_frame(&mut self, name: &str) -> bool {
        if self.frame_exists(name) {
            return false;
        }
        debug!(frame = name, "creating frame");
        self.frames.insert(name.to_string(), Frame::new());
        true
    }

    /// Unregister a frame and discard its entire facet dictionary.
    ///
    /// By default this does not cascade into any frameset's membership
    /// set; `StoreOptions::purge_members_on_remove` opts into cleanup.
    pub fn remove_frame(&mut self, name: &str) -> bool {
        if self.frames.remove(name).is_none() {
            return false;
        }
        debug!(frame = name, "removed frame");
        if self.options.purge_members_on_remove {
            for frame in self.frames.values_mut() {
                if let Some(members) = frame.members.as_mut() {
                    members.remove(name);
                }
            }
        }
        true
    }

    /// Snapshot of registered frame names, sorted.
    pub fn list_frames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frames.keys().cloned().collect();
        names.sort();
        names
    }

    /// Duplicate `src`'s complete facet dictionary into `dst`.
    ///
    /// Destroys any existing `dst` first; the copy is an independent
    /// structural copy with no ownership sharing. Fails if `src` is
    /// absent.
    pub fn copy_frame(&mut self, src: &str, dst: &str) -> bool {
        let Some(frame) = self.frames.get(src).cloned() else {
            return false;
        };
        debug!(src, dst, "copying frame");
        self.frames.insert(dst.to_string(), frame);
        true
    }

    /// Shape equality: true iff `a` and `b` declare equal slot-name sets.
    ///
    /// Facet content is deliberately not inspected, so this answers "does
    /// this frame declare the same schema" distinct from full equality.
    pub fn compare_frames(&self, a: &str, b: &str) -> bool {
        match (self.frames.get(a), self.frames.get(b)) {
            (Some(fa), Some(fb)) => fa.same_shape(fb),
            _ => false,
        }
    }

    /// Merge `src`'s facet entries into `dst` for every slot both declare.
    ///
    /// Entries are copied add-or-overwrite. Slots unique to `src` are not
    /// introduced into `dst`; slots unique to `dst` are untouched.
    pub fn merge_frames(&mut self, src: &str, dst: &str) -> bool {
        if !self.frame_exists(src) || !self.frame_exists(dst) || src == dst {
            return src == dst && self.frame_exists(src);
        }
        let src_frame = self.frames[src].clone();
        let Some(dst_frame) = self.frames.get_mut(dst) else {
            return false;
        };
        for (slot_name, src_slot) in &src_frame.slots {
            let Some(dst_slot) = dst_frame.slots.get_mut(slot_name) else {
                continue;
            };
            for (kind, content) in &src_slot.facets {
                dst_slot.facets.insert(kind.clone(), content.clone());
            }
        }
        debug!(src, dst, "merged frames");
        true
    }

    /// Synchronize `dst`'s structure with `src`.
    ///
    /// Makes `dst`'s slot-name set equal to `src`'s, deletes entries
    /// whose slot vanished, copies entries missing in `dst`, and leaves
    /// entries present in both unchanged (no overwrite).
    pub fn update_frame(&mut self, src: &str, dst: &str) -> bool {
        if !self.frame_exists(src) || !self.frame_exists(dst) || src == dst {
            return src == dst && self.frame_exists(src);
        }
        let src_frame = self.frames[src].clone();
        let Some(dst_frame) = self.frames.get_mut(dst) else {
            return false;
        };
        dst_frame
            .slots
            .retain(|name, _| src_frame.slots.contains_key(name));
        for (slot_name, src_slot) in &src_frame.slots {
            let dst_slot = dst_frame.slots.entry(slot_name.clone()).or_default();
            for (kind, content) in &src_slot.facets {
                dst_slot
                    .facets
                    .entry(kind.clone())
                    .or_insert_with(|| content.clone());
            }
        }
        debug!(src, dst, "updated frame structure");
        true
    }

    /// Intersect `dst`'s facet-entry key space with `src`'s, in place.
    ///
    /// Every facet entry of `dst` whose (slot, kind) key has no
    /// counterpart in `src` is removed. Slot declarations survive with a
    /// possibly empty facet set.
    pub fn filter_frame(&mut self, src: &str, dst: &str) -> bool {
        if !self.frame_exists(src) || !self.frame_exists(dst) || src == dst {
            return src == dst && self.frame_exists(src);
        }
        let src_frame = self.frames[src].clone();
        let Some(dst_frame) = self.frames.get_mut(dst) else {
            return false;
        };
        for (slot_name, dst_slot) in dst_frame.slots.iter_mut() {
            dst_slot.facets.retain(|kind, _| {
                src_frame
                    .slots
                    .get(slot_name)
                    .map(|s| s.facets.contains_key(kind))
                    .unwrap_or(false)
            });
        }
        debug!(src, dst, "filtered frame");
        true
    }

    /// Register a capability handle under `name`.
    ///
    /// Method and demon facet content names a capability; the store
    /// resolves the name through this table at invocation time and never
    /// interprets content as code.
    pub fn register_capability(&mut self, name: &str, capability: Arc<dyn Capability>) {
        debug!(capability = name, "registering capability");
        self.capabilities.insert(name.to_string(), capability);
    }

    /// Drop a capability handle. Facets naming it will fail to execute.
    pub fn unregister_capability(&mut self, name: &str) -> bool {
        self.capabilities.remove(name).is_some()
    }
}

//! Framesets: membership and snapshot broadcast.
//!
//! A frameset is a frame that also owns a membership set of frame names.
//! Frameset-level mutations apply first to the frameset frame itself
//! (recording the group's nominal schema), then independently to a
//! snapshot of the current membership. Joining later is not retroactive;
//! bringing a new member into agreement takes an explicit
//! `update_frame`/`merge_frames`. Membership is not referentially
//! enforced against the registry.

use crate::error::FrameError;
use crate::frame::Frame;
use crate::registry::FrameStore;
use tracing::debug;

impl FrameStore {
    /// Register a new empty frameset. Fails if the name is already taken.
    pub fn create_frameset(&mut self, name: &str) -> bool {
        if self.frame_exists(name) {
            return false;
        }
        debug!(frameset = name, "creating frameset");
        self.frames.insert(name.to_string(), Frame::new_frameset());
        true
    }

    /// Unregister a frameset, discarding its facet dictionary and
    /// membership set. Member frames themselves are untouched.
    pub fn remove_frameset(&mut self, name: &str) -> bool {
        self.remove_frame(name)
    }

    /// Determine if a registered frame acts as a frameset.
    pub fn is_frameset(&self, name: &str) -> bool {
        self.frames
            .get(name)
            .map(|f| f.is_frameset())
            .unwrap_or(false)
    }

    /// Add a frame to a frameset's membership.
    ///
    /// Both names must be registered. The new member does not receive
    /// facets the group defined before it joined.
    pub fn include_member(&mut self, frameset: &str, frame: &str) -> bool {
        if !self.frame_exists(frame) {
            return false;
        }
        let Some(members) = self
            .frames
            .get_mut(frameset)
            .and_then(|f| f.members.as_mut())
        else {
            return false;
        };
        debug!(frameset, frame, "including member");
        members.insert(frame.to_string());
        true
    }

    /// Remove a frame from a frameset's membership.
    pub fn exclude_member(&mut self, frameset: &str, frame: &str) -> bool {
        let Some(members) = self
            .frames
            .get_mut(frameset)
            .and_then(|f| f.members.as_mut())
        else {
            return false;
        };
        let removed = members.remove(frame);
        if removed {
            debug!(frameset, frame, "excluded member");
        }
        removed
    }

    /// Snapshot of a frameset's membership, sorted. Empty if the name is
    /// not a frameset.
    pub fn list_members(&self, frameset: &str) -> Vec<String> {
        let Some(members) = self.frames.get(frameset).and_then(|f| f.members.as_ref()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = members.iter().cloned().collect();
        names.sort();
        names
    }

    /// Framesets whose membership currently includes `frame`, sorted.
    ///
    /// Linear scan over every registered frameset's membership set; no
    /// index is maintained.
    pub fn membership_query(&self, frame: &str) -> Vec<String> {
        if !self.frame_exists(frame) {
            return Vec::new();
        }
        let mut sets: Vec<String> = self
            .frames
            .iter()
            .filter(|(_, f)| {
                f.members
                    .as_ref()
                    .map(|m| m.contains(frame))
                    .unwrap_or(false)
            })
            .map(|(name, _)| name.clone())
            .collect();
        sets.sort();
        sets
    }

    /// Create a slot on the frameset and broadcast to all current members.
    pub fn frameset_create_slot(&mut self, frameset: &str, slot: &str) -> bool {
        if !self.create_slot(frameset, slot) {
            return false;
        }
        for member in self.list_members(frameset) {
            self.create_slot(&member, slot);
        }
        true
    }

    /// Remove a slot from the frameset and broadcast to all current members.
    pub fn frameset_remove_slot(&mut self, frameset: &str, slot: &str) -> bool {
        if !self.remove_slot(frameset, slot) {
            return false;
        }
        for member in self.list_members(frameset) {
            self.remove_slot(&member, slot);
        }
        true
    }

    /// Create a value facet on the frameset and broadcast.
    pub fn frameset_create_value(&mut self, frameset: &str, slot: &str) -> Result<bool, FrameError> {
        if !self.create_value(frameset, slot)? {
            return Ok(false);
        }
        for member in self.list_members(frameset) {
            self.create_value(&member, slot)?;
        }
        Ok(true)
    }

    /// Remove the value facet from the frameset and broadcast.
    pub fn frameset_remove_value(&mut self, frameset: &str, slot: &str) -> Result<bool, FrameError> {
        if !self.remove_value(frameset, slot)? {
            return Ok(false);
        }
        for member in self.list_members(frameset) {
            self.remove_value(&member, slot)?;
        }
        Ok(true)
    }

    /// Create a method facet on the frameset and broadcast.
    pub fn frameset_create_method(
        &mut self,
        frameset: &str,
        slot: &str,
    ) -> Result<bool, FrameError> {
        if !self.create_method(frameset, slot)? {
            return Ok(false);
        }
        for member in self.list_members(frameset) {
            self.create_method(&member, slot)?;
        }
        Ok(true)
    }

    /// Remove the method facet from the frameset and broadcast.
    pub fn frameset_remove_method(
        &mut self,
        frameset: &str,
        slot: &str,
    ) -> Result<bool, FrameError> {
        if !self.remove_method(frameset, slot)? {
            return Ok(false);
        }
        for member in self.list_members(frameset) {
            self.remove_method(&member, slot)?;
        }
        Ok(true)
    }

    /// Create a reference facet on the frameset and broadcast.
    pub fn frameset_create_reference(
        &mut self,
        frameset: &str,
        slot: &str,
    ) -> Result<bool, FrameError> {
        if !self.create_reference(frameset, slot)? {
            return Ok(false);
        }
        for member in self.list_members(frameset) {
            self.create_reference(&member, slot)?;
        }
        Ok(true)
    }

    /// Remove the reference facet from the frameset and broadcast.
    pub fn frameset_remove_reference(
        &mut self,
        frameset: &str,
        slot: &str,
    ) -> Result<bool, FrameError> {
        if !self.remove_reference(frameset, slot)? {
            return Ok(false);
        }
        for member in self.list_members(frameset) {
            self.remove_reference(&member, slot)?;
        }
        Ok(true)
    }

    /// Create a demon facet on the frameset and broadcast.
    pub fn frameset_create_demon(&mut self, frameset: &str, slot: &str, tag: &str) -> bool {
        if !self.create_demon(frameset, slot, tag) {
            return false;
        }
        for member in self.list_members(frameset) {
            self.create_demon(&member, slot, tag);
        }
        true
    }

    /// Remove a demon facet from the frameset and broadcast.
    pub fn frameset_remove_demon(&mut self, frameset: &str, slot: &str, tag: &str) -> bool {
        if !self.remove_demon(frameset, slot, tag) {
            return false;
        }
        for member in self.list_members(frameset) {
            self.remove_demon(&member, slot, tag);
        }
        true
    }

    /// Point the frameset's reference at `target` and broadcast.
    ///
    /// Guarded on the frameset frame carrying the reference facet;
    /// members without it are skipped silently by the point operation.
    pub fn frameset_put_reference(
        &mut self,
        frameset: &str,
        slot: &str,
        target: &str,
    ) -> Result<bool, FrameError> {
        if !self.reference_exists(frameset, slot)? {
            return Ok(false);
        }
        self.put_reference(frameset, slot, target)?;
        for member in self.list_members(frameset) {
            self.put_reference(&member, slot, target)?;
        }
        Ok(true)
    }

    /// Read the frameset frame's own reference. No broadcast.
    pub fn frameset_get_reference(
        &self,
        frameset: &str,
        slot: &str,
    ) -> Result<Option<String>, FrameError> {
        if !self.reference_exists(frameset, slot)? {
            return Ok(None);
        }
        self.get_reference(frameset, slot)
    }
}

//! Reference delegation.
//!
//! When a slot carries a `Reference` facet, the `Value` and `Method`
//! operations recurse into the referenced frame's same-named slot,
//! firing the `ifref` hook on every hop. The reference facet itself is
//! never delegated: the link lives on the originating frame. Every
//! delegated operation threads a visited set through the traversal and
//! fails with [`FrameError::DelegationCycle`] on a revisit, so a cyclic
//! reference graph cannot diverge.

use crate::demon::Hook;
use crate::error::FrameError;
use crate::registry::FrameStore;
use crate::types::FacetKind;
use std::collections::HashSet;

impl FrameStore {
    /// Follow the reference chain for `slot` starting at `frame`.
    ///
    /// Returns the name of the frame whose slot the operation should
    /// apply to locally: the first frame along the chain without a
    /// `Reference` facet on `slot`. `None` when the chain dangles (a
    /// frame or slot absent anywhere along it).
    pub(crate) fn resolve_target(
        &self,
        frame: &str,
        slot: &str,
    ) -> Result<Option<String>, FrameError> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = frame.to_string();
        loop {
            if !self.slot_exists(&current, slot) {
                return Ok(None);
            }
            let Some(next) = self.get_facet(&current, slot, &FacetKind::Reference) else {
                return Ok(Some(current));
            };
            self.fire_hook(&current, slot, Hook::Ref)?;
            visited.insert(current);
            if visited.contains(&next) {
                return Err(FrameError::DelegationCycle {
                    frame: next,
                    slot: slot.to_string(),
                });
            }
            current = next;
        }
    }

    /// The ordered frame names visited while following `Reference`
    /// facets for `slot`.
    ///
    /// Terminates at the first frame lacking a reference facet for the
    /// slot, at a frame where the slot is absent, or upon revisiting a
    /// frame already in the chain. Each name appears at most once, so a
    /// cyclic graph yields a finite chain. No hooks fire.
    pub fn path_chain(&self, frame: &str, slot: &str) -> Vec<String> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = frame.to_string();
        loop {
            if !self.slot_exists(&current, slot) || chain.contains(&current) {
                return chain;
            }
            chain.push(current.clone());
            match self.get_facet(&current, slot, &FacetKind::Reference) {
                Some(next) => current = next,
                None => return chain,
            }
        }
    }

    // ----- value facet, delegated -----

    /// Determine if a value facet exists, following references.
    pub fn value_exists(&self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Value) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::ExistValue)?;
        Ok(true)
    }

    /// Create a value facet at the end of the reference chain.
    pub fn create_value(&mut self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.create_facet(&target, slot, &FacetKind::Value) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::CreateValue)?;
        Ok(true)
    }

    /// Remove the value facet at the end of the reference chain.
    pub fn remove_value(&mut self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Value) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::RemoveValue)?;
        Ok(self.remove_facet(&target, slot, &FacetKind::Value))
    }

    /// Read the value at the end of the reference chain.
    pub fn get_value(&self, frame: &str, slot: &str) -> Result<Option<String>, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(None);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Value) {
            return Ok(None);
        }
        self.fire_hook(&target, slot, Hook::GetValue)?;
        Ok(self.get_facet(&target, slot, &FacetKind::Value))
    }

    /// Write the value at the end of the reference chain.
    pub fn put_value(&mut self, frame: &str, slot: &str, content: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Value) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::PutValue)?;
        Ok(self.put_facet(&target, slot, &FacetKind::Value, content))
    }

    // ----- method facet, delegated -----

    /// Determine if a method facet exists, following references.
    pub fn method_exists(&self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Method) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::ExistMethod)?;
        Ok(true)
    }

    /// Create a method facet at the end of the reference chain.
    pub fn create_method(&mut self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.create_facet(&target, slot, &FacetKind::Method) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::CreateMethod)?;
        Ok(true)
    }

    /// Remove the method facet at the end of the reference chain.
    pub fn remove_method(&mut self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Method) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::RemoveMethod)?;
        Ok(self.remove_facet(&target, slot, &FacetKind::Method))
    }

    /// Read the method capability name at the end of the reference chain.
    pub fn get_method(&self, frame: &str, slot: &str) -> Result<Option<String>, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(None);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Method) {
            return Ok(None);
        }
        self.fire_hook(&target, slot, Hook::GetMethod)?;
        Ok(self.get_facet(&target, slot, &FacetKind::Method))
    }

    /// Write the method capability name at the end of the reference chain.
    pub fn put_method(&mut self, frame: &str, slot: &str, content: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        if !self.facet_exists(&target, slot, &FacetKind::Method) {
            return Ok(false);
        }
        self.fire_hook(&target, slot, Hook::PutMethod)?;
        Ok(self.put_facet(&target, slot, &FacetKind::Method, content))
    }

    /// Execute the method at the end of the reference chain.
    ///
    /// Fires the `ifexecm` hook, then invokes the capability the method
    /// content names. Empty content is a no-op success.
    pub fn exec_method(&self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        let Some(target) = self.resolve_target(frame, slot)? else {
            return Ok(false);
        };
        let Some(content) = self.get_facet(&target, slot, &FacetKind::Method) else {
            return Ok(false);
        };
        self.fire_hook(&target, slot, Hook::ExecMethod)?;
        if !content.is_empty() {
            self.invoke_capability(&content, &target, slot)?;
        }
        Ok(true)
    }

    // ----- reference facet, never delegated -----

    /// Determine if a reference facet exists on the frame itself.
    pub fn reference_exists(&self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        if !self.facet_exists(frame, slot, &FacetKind::Reference) {
            return Ok(false);
        }
        self.fire_hook(frame, slot, Hook::ExistRef)?;
        Ok(true)
    }

    /// Create a reference facet with empty (dangling) content.
    ///
    /// Succeeds only if the slot carries neither `Value` nor `Method`.
    pub fn create_reference(&mut self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        if !self.create_facet(frame, slot, &FacetKind::Reference) {
            return Ok(false);
        }
        self.fire_hook(frame, slot, Hook::CreateRef)?;
        Ok(true)
    }

    /// Remove the reference facet from the frame itself.
    pub fn remove_reference(&mut self, frame: &str, slot: &str) -> Result<bool, FrameError> {
        if !self.facet_exists(frame, slot, &FacetKind::Reference) {
            return Ok(false);
        }
        self.fire_hook(frame, slot, Hook::RemoveRef)?;
        Ok(self.remove_facet(frame, slot, &FacetKind::Reference))
    }

    /// Read the referenced frame name.
    pub fn get_reference(&self, frame: &str, slot: &str) -> Result<Option<String>, FrameError> {
        if !self.facet_exists(frame, slot, &FacetKind::Reference) {
            return Ok(None);
        }
        self.fire_hook(frame, slot, Hook::GetRef)?;
        Ok(self.get_facet(frame, slot, &FacetKind::Reference))
    }

    /// Point the reference at `target`.
    ///
    /// The target need not exist: dangling references are permitted and
    /// resolve to failure rather than a hard error.
    pub fn put_reference(
        &mut self,
        frame: &str,
        slot: &str,
        target: &str,
    ) -> Result<bool, FrameError> {
        if !self.put_facet(frame, slot, &FacetKind::Reference, target) {
            return Ok(false);
        }
        self.fire_hook(frame, slot, Hook::PutRef)?;
        Ok(true)
    }

    /// Slot names on `frame` carrying a reference facet, sorted.
    pub fn list_references(&self, frame: &str) -> Vec<String> {
        let Some(f) = self.frames.get(frame) else {
            return Vec::new();
        };
        let mut slots: Vec<String> = f
            .slots
            .iter()
            .filter(|(_, slot)| slot.facets.contains_key(&FacetKind::Reference))
            .map(|(name, _)| name.clone())
            .collect();
        slots.sort();
        slots
    }

    // ----- value-match scans -----

    /// Frames declaring a value facet on `slot` (directly or through
    /// delegation), sorted.
    pub fn frames_with_value(&self, slot: &str) -> Result<Vec<String>, FrameError> {
        let mut found = Vec::new();
        for name in self.list_frames() {
            if self.value_exists(&name, slot)? {
                found.push(name);
            }
        }
        Ok(found)
    }

    /// Frames whose value for `slot` equals `expected`, sorted.
    pub fn frames_with_value_eq(
        &self,
        slot: &str,
        expected: &str,
    ) -> Result<Vec<String>, FrameError> {
        let mut found = Vec::new();
        for name in self.list_frames() {
            if self.get_value(&name, slot)?.as_deref() == Some(expected) {
                found.push(name);
            }
        }
        Ok(found)
    }

    /// Frames declaring a value for `slot` that differs from `expected`,
    /// sorted.
    pub fn frames_with_value_ne(
        &self,
        slot: &str,
        expected: &str,
    ) -> Result<Vec<String>, FrameError> {
        let mut found = Vec::new();
        for name in self.list_frames() {
            if let Some(value) = self.get_value(&name, slot)? {
                if value != expected {
                    found.push(name);
                }
            }
        }
        Ok(found)
    }
}

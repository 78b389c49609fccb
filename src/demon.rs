//! Demon dispatch and the capability table.
//!
//! A demon facet is a named annotation on a slot whose content names a
//! capability registered by the embedding application. Hook demons (the
//! `if<verb><kind>` tags plus `ifref`) fire automatically around the
//! canonical operations; direct demons are executed explicitly through
//! [`FrameStore::exec_demon`]. The core resolves the capability handle
//! and invokes it, never interpreting facet content as code.

use crate::error::FrameError;
use crate::registry::FrameStore;
use crate::types::FacetKind;
use tracing::trace;

/// Context handed to a capability at invocation time: the acting frame
/// and slot.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub frame: &'a str,
    pub slot: &'a str,
}

/// A callable registered by the embedding application.
///
/// Capabilities receive only the acting (frame, slot) context, not the
/// store itself, so they cannot reentrantly mutate the object graph.
/// Failures propagate unmodified to the caller of the canonical
/// operation that triggered the invocation.
pub trait Capability: Send + Sync {
    fn invoke(
        &self,
        ctx: &HookContext<'_>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<F> Capability for F
where
    F: Fn(&HookContext<'_>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> + Send + Sync,
{
    fn invoke(
        &self,
        ctx: &HookContext<'_>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self(ctx)
    }
}

/// The hook points wrapping canonical operations.
///
/// Presence of the correspondingly tagged demon facet on the acting
/// (frame, slot) pair is necessary and sufficient for invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    CreateValue,
    CreateMethod,
    CreateRef,
    GetValue,
    GetMethod,
    GetRef,
    PutValue,
    PutMethod,
    PutRef,
    ExistValue,
    ExistMethod,
    ExistRef,
    RemoveValue,
    RemoveMethod,
    RemoveRef,
    ExecMethod,
    /// Fired on every delegation hop while following a reference chain.
    Ref,
}

impl Hook {
    /// The demon tag this hook is wired to.
    pub fn tag(&self) -> &'static str {
        match self {
            Hook::CreateValue => "ifcreatev",
            Hook::CreateMethod => "ifcreatem",
            Hook::CreateRef => "ifcreater",
            Hook::GetValue => "ifgetv",
            Hook::GetMethod => "ifgetm",
            Hook::GetRef => "ifgetr",
            Hook::PutValue => "ifputv",
            Hook::PutMethod => "ifputm",
            Hook::PutRef => "ifputr",
            Hook::ExistValue => "ifexistv",
            Hook::ExistMethod => "ifexistm",
            Hook::ExistRef => "ifexistr",
            Hook::RemoveValue => "ifremovev",
            Hook::RemoveMethod => "ifremovem",
            Hook::RemoveRef => "ifremover",
            Hook::ExecMethod => "ifexecm",
            Hook::Ref => "ifref",
        }
    }
}

impl FrameStore {
    /// Resolve a capability by name and invoke it with the given context.
    pub(crate) fn invoke_capability(
        &self,
        name: &str,
        frame: &str,
        slot: &str,
    ) -> Result<(), FrameError> {
        let Some(capability) = self.capabilities.get(name) else {
            return Err(FrameError::UnknownCapability(name.to_string()));
        };
        trace!(capability = name, frame, slot, "invoking capability");
        capability
            .invoke(&HookContext { frame, slot })
            .map_err(|source| FrameError::CapabilityFailed {
                name: name.to_string(),
                source,
            })
    }

    /// Fire a hook demon if the matching facet is present on (frame, slot).
    ///
    /// Empty content marks a created-but-unconfigured hook and is a
    /// no-op. Executor failures propagate to the canonical operation's
    /// caller.
    pub(crate) fn fire_hook(&self, frame: &str, slot: &str, hook: Hook) -> Result<(), FrameError> {
        let kind = FacetKind::Demon(hook.tag().to_string());
        let Some(content) = self.get_facet(frame, slot, &kind) else {
            return Ok(());
        };
        if content.is_empty() {
            return Ok(());
        }
        trace!(frame, slot, hook = hook.tag(), "firing hook demon");
        self.invoke_capability(&content, frame, slot)
    }

    /// Determine if a demon facet exists.
    pub fn demon_exists(&self, frame: &str, slot: &str, tag: &str) -> bool {
        self.facet_exists(frame, slot, &FacetKind::Demon(tag.to_string()))
    }

    /// Create a demon facet with empty content.
    pub fn create_demon(&mut self, frame: &str, slot: &str, tag: &str) -> bool {
        self.create_facet(frame, slot, &FacetKind::Demon(tag.to_string()))
    }

    /// Remove a demon facet.
    pub fn remove_demon(&mut self, frame: &str, slot: &str, tag: &str) -> bool {
        self.remove_facet(frame, slot, &FacetKind::Demon(tag.to_string()))
    }

    /// Content of a demon facet, or `None` if absent.
    pub fn get_demon(&self, frame: &str, slot: &str, tag: &str) -> Option<String> {
        self.get_facet(frame, slot, &FacetKind::Demon(tag.to_string()))
    }

    /// Overwrite the content of a demon facet.
    pub fn put_demon(&mut self, frame: &str, slot: &str, tag: &str, content: &str) -> bool {
        self.put_facet(frame, slot, &FacetKind::Demon(tag.to_string()), content)
    }

    /// Directly execute a demon facet, independent of any hook wiring.
    ///
    /// Returns `Ok(false)` if the facet is absent, `Ok(true)` once the
    /// content has been invoked (empty content is a no-op success).
    pub fn exec_demon(&self, frame: &str, slot: &str, tag: &str) -> Result<bool, FrameError> {
        let Some(content) = self.get_demon(frame, slot, tag) else {
            return Ok(false);
        };
        if !content.is_empty() {
            self.invoke_capability(&content, frame, slot)?;
        }
        Ok(true)
    }
}

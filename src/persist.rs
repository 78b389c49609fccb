//! Frame persistence.
//!
//! One document per frame, addressed by the frame's name. The in-memory
//! slot-name and facet-type sets are semantically unordered, so the
//! codec flattens each to a sequence on save and rebuilds sets on load;
//! a round trip is equal under set-based comparison regardless of the
//! sequence order a document happens to carry. Raw byte I/O lives behind
//! the [`DocumentStore`] seam; [`FsDocumentStore`] is the filesystem
//! implementation with atomic temp-file-then-rename writes.

use crate::error::FrameError;
use crate::frame::{Frame, Slot};
use crate::registry::FrameStore;
use crate::types::FacetKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persisted form of a single frame
///
/// Facet entries are keyed by the composite `"slot,label"` string, which
/// is why slot names may not contain a comma (enforced at slot
/// creation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDocument {
    pub name: String,
    pub slots: Vec<String>,
    pub facet_types: BTreeMap<String, Vec<String>>,
    pub facets: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

/// Byte-I/O collaborator: reads and writes frame documents by name.
pub trait DocumentStore {
    fn write(&self, name: &str, doc: &FrameDocument) -> Result<(), FrameError>;
    fn read(&self, name: &str) -> Result<Option<FrameDocument>, FrameError>;
    fn exists(&self, name: &str) -> Result<bool, FrameError>;
}

/// Filesystem-backed document store: `{root}/{name}.frame.json`
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at the given directory, creating it as needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, FrameError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, name: &str) -> Result<PathBuf, FrameError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(FrameError::InvalidDocument {
                frame: name.to_string(),
                reason: "frame name is not filesystem-safe".to_string(),
            });
        }
        Ok(self.root.join(format!("{}.frame.json", name)))
    }
}

impl DocumentStore for FsDocumentStore {
    fn write(&self, name: &str, doc: &FrameDocument) -> Result<(), FrameError> {
        let path = self.document_path(name)?;
        let temp_path = path.with_extension("json.tmp");
        let serialized = serde_json::to_vec_pretty(doc)?;
        fs::write(&temp_path, &serialized)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Option<FrameDocument>, FrameError> {
        let path = self.document_path(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let doc: FrameDocument = serde_json::from_slice(&bytes)?;
        Ok(Some(doc))
    }

    fn exists(&self, name: &str) -> Result<bool, FrameError> {
        Ok(self.document_path(name)?.exists())
    }
}

/// Flatten a frame into its document, sequencing the unordered
/// collections deterministically.
pub fn encode_frame(name: &str, frame: &Frame) -> FrameDocument {
    let slots = frame.slot_names();
    let mut facet_types = BTreeMap::new();
    let mut facets = BTreeMap::new();
    for (slot_name, slot) in &frame.slots {
        let kinds = slot.facet_kinds();
        facet_types.insert(
            slot_name.clone(),
            kinds.iter().map(|k| k.label().to_string()).collect(),
        );
        for kind in &kinds {
            if let Some(content) = slot.facets.get(kind) {
                facets.insert(format!("{},{}", slot_name, kind.label()), content.clone());
            }
        }
    }
    let members = frame.members.as_ref().map(|m| {
        let mut names: Vec<String> = m.iter().cloned().collect();
        names.sort();
        names
    });
    FrameDocument {
        name: name.to_string(),
        slots,
        facet_types,
        facets,
        members,
    }
}

/// Rebuild a frame from its document.
///
/// Sequence order in the document is irrelevant; slot-name and
/// facet-type sets are reconstructed as sets. Facet keys referencing
/// undeclared slots make the document invalid.
pub fn decode_frame(doc: &FrameDocument) -> Result<Frame, FrameError> {
    let mut frame = Frame::new();
    for slot_name in &doc.slots {
        frame.slots.insert(slot_name.clone(), Slot::new());
    }
    for (slot_name, labels) in &doc.facet_types {
        let Some(slot) = frame.slots.get_mut(slot_name) else {
            return Err(FrameError::InvalidDocument {
                frame: doc.name.clone(),
                reason: format!("facet types for undeclared slot '{}'", slot_name),
            });
        };
        for label in labels {
            slot.facets
                .entry(FacetKind::from_label(label))
                .or_insert_with(String::new);
        }
    }
    for (key, content) in &doc.facets {
        let Some((slot_name, label)) = key.split_once(',') else {
            return Err(FrameError::InvalidDocument {
                frame: doc.name.clone(),
                reason: format!("malformed facet key '{}'", key),
            });
        };
        let Some(slot) = frame.slots.get_mut(slot_name) else {
            return Err(FrameError::InvalidDocument {
                frame: doc.name.clone(),
                reason: format!("facet entry for undeclared slot '{}'", slot_name),
            });
        };
        slot.facets
            .insert(FacetKind::from_label(label), content.clone());
    }
    frame.members = doc
        .members
        .as_ref()
        .map(|names| names.iter().cloned().collect());
    Ok(frame)
}

impl FrameStore {
    /// Persist a resident frame as one document addressed by its name.
    ///
    /// `Ok(false)` if the frame is not resident.
    pub fn save_frame(&self, name: &str, store: &dyn DocumentStore) -> Result<bool, FrameError> {
        let Some(frame) = self.frames.get(name) else {
            return Ok(false);
        };
        debug!(frame = name, "saving frame document");
        store.write(name, &encode_frame(name, frame))?;
        Ok(true)
    }

    /// Load a frame document into the registry.
    ///
    /// `Ok(false)` if the frame is already resident or no backing
    /// document exists.
    pub fn load_frame(&mut self, name: &str, store: &dyn DocumentStore) -> Result<bool, FrameError> {
        if self.frame_exists(name) {
            return Ok(false);
        }
        let Some(doc) = store.read(name)? else {
            return Ok(false);
        };
        if doc.name != name {
            return Err(FrameError::InvalidDocument {
                frame: name.to_string(),
                reason: format!("document is addressed to '{}'", doc.name),
            });
        }
        debug!(frame = name, "loading frame document");
        let frame = decode_frame(&doc)?;
        self.frames.insert(name.to_string(), frame);
        Ok(true)
    }

    /// Persist a frameset and each currently-listed member, one level deep.
    ///
    /// Members that are not resident are skipped; framesets nested as
    /// members are saved as plain frames without recursing into their
    /// own membership.
    pub fn save_frameset(&self, name: &str, store: &dyn DocumentStore) -> Result<bool, FrameError> {
        if !self.save_frame(name, store)? {
            return Ok(false);
        }
        for member in self.list_members(name) {
            self.save_frame(&member, store)?;
        }
        Ok(true)
    }

    /// Load a frameset document and each listed member's document, one
    /// level deep.
    ///
    /// Members already resident or without a backing document are
    /// skipped.
    pub fn load_frameset(
        &mut self,
        name: &str,
        store: &dyn DocumentStore,
    ) -> Result<bool, FrameError> {
        if !self.load_frame(name, store)? {
            return Ok(false);
        }
        for member in self.list_members(name) {
            self.load_frame(&member, store)?;
        }
        Ok(true)
    }
}

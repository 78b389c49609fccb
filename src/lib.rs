//! Framestore: an embeddable frame/slot/facet knowledge store
//!
//! Frames are uniquely named entities carrying named attributes (slots).
//! Each slot holds typed facets: a literal value, a callable method, a
//! delegation reference to another frame, or named demon annotations that
//! hook the canonical operations. Framesets group frames and broadcast
//! schema mutations to their members. Frames persist to and reload from
//! one document per frame.
//!
//! The whole object graph lives behind a single [`FrameStore`] owned by
//! the embedding application; there is no ambient global state.

pub mod config;
pub mod demon;
pub mod error;
pub mod facet;
pub mod frame;
pub mod frameset;
pub mod logging;
pub mod persist;
pub mod registry;
pub mod resolver;
pub mod types;

pub use config::StoreOptions;
pub use demon::{Capability, HookContext};
pub use error::FrameError;
pub use frame::{Frame, Slot};
pub use persist::{DocumentStore, FrameDocument, FsDocumentStore};
pub use registry::FrameStore;
pub use types::FacetKind;

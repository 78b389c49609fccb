//! Save/load round trips through the filesystem document store.

use framestore::{DocumentStore, FacetKind, FrameStore, FsDocumentStore};
use tempfile::TempDir;

fn populated() -> FrameStore {
    let mut store = FrameStore::new();
    store.create_frame("F");
    for slot in ["a", "b"] {
        store.create_slot("F", slot);
    }
    store.create_value("F", "a").unwrap();
    store.put_value("F", "a", "forty-two").unwrap();
    store.create_reference("F", "b").unwrap();
    store.put_reference("F", "b", "elsewhere").unwrap();
    store.create_demon("F", "a", "ifgetv");
    store.put_demon("F", "a", "ifgetv", "audit");
    store
}

#[test]
fn round_trip_rebuilds_equal_frame() {
    let dir = TempDir::new().unwrap();
    let docs = FsDocumentStore::new(dir.path()).unwrap();
    let store = populated();
    assert!(store.save_frame("F", &docs).unwrap());

    let mut reloaded = FrameStore::new();
    assert!(reloaded.load_frame("F", &docs).unwrap());

    assert_eq!(reloaded.list_slots("F"), vec!["a", "b"]);
    assert_eq!(
        reloaded.list_facet_kinds("F", "a"),
        store.list_facet_kinds("F", "a")
    );
    assert_eq!(
        reloaded.get_value("F", "a").unwrap(),
        Some("forty-two".to_string())
    );
    assert_eq!(
        reloaded.get_reference("F", "b").unwrap(),
        Some("elsewhere".to_string())
    );
    assert_eq!(reloaded.get_demon("F", "a", "ifgetv"), Some("audit".to_string()));
}

#[test]
fn load_is_a_noop_when_resident_or_absent() {
    let dir = TempDir::new().unwrap();
    let docs = FsDocumentStore::new(dir.path()).unwrap();
    let mut store = populated();
    store.save_frame("F", &docs).unwrap();

    assert!(!store.load_frame("F", &docs).unwrap());
    assert!(!store.load_frame("never-saved", &docs).unwrap());
}

#[test]
fn frameset_cascade_is_one_level() {
    let dir = TempDir::new().unwrap();
    let docs = FsDocumentStore::new(dir.path()).unwrap();
    let mut store = FrameStore::new();
    store.create_frameset("S");
    for name in ["F1", "F2"] {
        store.create_frame(name);
        store.include_member("S", name);
        store.create_slot(name, "x");
        store.create_value(name, "x").unwrap();
        store.put_value(name, "x", name).unwrap();
    }
    assert!(store.save_frameset("S", &docs).unwrap());

    let mut reloaded = FrameStore::new();
    assert!(reloaded.load_frameset("S", &docs).unwrap());
    assert_eq!(reloaded.list_members("S"), vec!["F1", "F2"]);
    assert_eq!(
        reloaded.get_value("F1", "x").unwrap(),
        Some("F1".to_string())
    );
    assert_eq!(
        reloaded.get_value("F2", "x").unwrap(),
        Some("F2".to_string())
    );
}

#[test]
fn stale_members_are_skipped_on_save() {
    let dir = TempDir::new().unwrap();
    let docs = FsDocumentStore::new(dir.path()).unwrap();
    let mut store = FrameStore::new();
    store.create_frameset("S");
    store.create_frame("F");
    store.include_member("S", "F");
    store.remove_frame("F");

    // The stale membership entry does not fail the frameset save
    assert!(store.save_frameset("S", &docs).unwrap());
    assert!(docs.exists("S").unwrap());
    assert!(!docs.exists("F").unwrap());
}

#[test]
fn empty_value_default_survives_round_trip() {
    let dir = TempDir::new().unwrap();
    let docs = FsDocumentStore::new(dir.path()).unwrap();
    let mut store = FrameStore::new();
    store.create_frame("F");
    store.create_slot("F", "s");
    store.create_value("F", "s").unwrap();
    store.save_frame("F", &docs).unwrap();

    let mut reloaded = FrameStore::new();
    reloaded.load_frame("F", &docs).unwrap();
    assert!(reloaded.facet_exists("F", "s", &FacetKind::Value));
    assert_eq!(reloaded.get_value("F", "s").unwrap(), Some(String::new()));
}

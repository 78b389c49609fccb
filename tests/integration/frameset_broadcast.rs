//! Frameset snapshot-broadcast semantics.

use framestore::{FacetKind, FrameStore};

fn group() -> FrameStore {
    let mut store = FrameStore::new();
    store.create_frameset("S");
    for name in ["F1", "F2"] {
        store.create_frame(name);
        store.include_member("S", name);
    }
    store
}

#[test]
fn broadcast_reaches_group_and_all_members() {
    let mut store = group();
    store.frameset_create_slot("S", "y");
    store.frameset_create_value("S", "y").unwrap();

    for frame in ["S", "F1", "F2"] {
        assert!(store.slot_exists(frame, "y"));
        assert!(store.facet_exists(frame, "y", &FacetKind::Value));
    }
}

#[test]
fn late_joiners_are_not_retrofitted() {
    let mut store = group();
    store.frameset_create_slot("S", "y");
    store.frameset_create_value("S", "y").unwrap();

    store.create_frame("F3");
    store.include_member("S", "F3");
    assert!(!store.slot_exists("F3", "y"));

    // But new broadcasts reach the new member
    store.frameset_create_slot("S", "z");
    assert!(store.slot_exists("F3", "z"));
}

#[test]
fn members_mutate_independently_after_broadcast() {
    let mut store = group();
    store.frameset_create_slot("S", "y");
    store.frameset_create_value("S", "y").unwrap();

    store.put_value("F1", "y", "one").unwrap();
    store.put_value("F2", "y", "two").unwrap();
    assert_eq!(store.get_value("F1", "y").unwrap(), Some("one".to_string()));
    assert_eq!(store.get_value("F2", "y").unwrap(), Some("two".to_string()));
    assert_eq!(store.get_value("S", "y").unwrap(), Some(String::new()));
}

#[test]
fn reference_broadcast_points_every_member_at_target() {
    let mut store = group();
    store.create_frame("Base");
    store.create_slot("Base", "proto");
    store.create_value("Base", "proto").unwrap();
    store.put_value("Base", "proto", "shared").unwrap();

    store.frameset_create_slot("S", "proto");
    store.frameset_create_reference("S", "proto").unwrap();
    store.frameset_put_reference("S", "proto", "Base").unwrap();

    // Every member now delegates the slot to Base
    for frame in ["F1", "F2"] {
        assert_eq!(
            store.get_value(frame, "proto").unwrap(),
            Some("shared".to_string())
        );
    }
}

#[test]
fn removal_broadcast() {
    let mut store = group();
    store.frameset_create_slot("S", "y");
    store.frameset_create_value("S", "y").unwrap();
    store.frameset_remove_value("S", "y").unwrap();
    for frame in ["S", "F1", "F2"] {
        assert!(!store.facet_exists(frame, "y", &FacetKind::Value));
        assert!(store.slot_exists(frame, "y"));
    }

    store.frameset_remove_slot("S", "y");
    for frame in ["S", "F1", "F2"] {
        assert!(!store.slot_exists(frame, "y"));
    }
}

#[test]
fn member_divergence_does_not_block_broadcast() {
    let mut store = group();
    // F1 already declares the slot on its own
    store.create_slot("F1", "y");
    store.create_value("F1", "y").unwrap();
    store.put_value("F1", "y", "mine").unwrap();

    // The group create succeeds on S and F2; F1's point op fails quietly
    assert!(store.frameset_create_slot("S", "y"));
    assert!(store.slot_exists("F2", "y"));
    assert_eq!(store.get_value("F1", "y").unwrap(), Some("mine".to_string()));
}

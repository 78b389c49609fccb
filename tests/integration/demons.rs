//! Demon dispatch around canonical operations.

use framestore::{Capability, FrameError, FrameStore, HookContext};
use std::sync::{Arc, Mutex};

/// Records every (frame, slot) context it is invoked with.
struct Recorder {
    calls: Mutex<Vec<(String, String)>>,
}

impl Recorder {
    fn new() -> Arc<Self> {
        Arc::new(Recorder {
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Capability for Recorder {
    fn invoke(
        &self,
        ctx: &HookContext<'_>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.calls
            .lock()
            .unwrap()
            .push((ctx.frame.to_string(), ctx.slot.to_string()));
        Ok(())
    }
}

fn store_with_recorder() -> (FrameStore, Arc<Recorder>) {
    let mut store = FrameStore::new();
    let recorder = Recorder::new();
    store.register_capability("record", recorder.clone());
    store.create_frame("F");
    store.create_slot("F", "s");
    (store, recorder)
}

#[test]
fn get_hook_fires_on_each_read() {
    let (mut store, recorder) = store_with_recorder();
    store.create_value("F", "s").unwrap();
    store.create_demon("F", "s", "ifgetv");
    store.put_demon("F", "s", "ifgetv", "record");

    store.get_value("F", "s").unwrap();
    store.get_value("F", "s").unwrap();
    assert_eq!(recorder.calls().len(), 2);
}

#[test]
fn create_hook_fires_after_successful_create_only() {
    let (mut store, recorder) = store_with_recorder();
    store.create_demon("F", "s", "ifcreatev");
    store.put_demon("F", "s", "ifcreatev", "record");

    assert!(store.create_value("F", "s").unwrap());
    assert_eq!(recorder.calls().len(), 1);

    // A conflicting create does not fire the hook again
    assert!(!store.create_value("F", "s").unwrap());
    assert_eq!(recorder.calls().len(), 1);
}

#[test]
fn ifref_fires_on_every_delegation_hop() {
    let (mut store, recorder) = store_with_recorder();
    store.create_frame("G");
    store.create_frame("H");
    store.create_slot("G", "s");
    store.create_slot("H", "s");
    store.create_reference("F", "s").unwrap();
    store.put_reference("F", "s", "G").unwrap();
    store.create_reference("G", "s").unwrap();
    store.put_reference("G", "s", "H").unwrap();
    store.create_value("H", "s").unwrap();
    for frame in ["F", "G"] {
        store.create_demon(frame, "s", "ifref");
        store.put_demon(frame, "s", "ifref", "record");
    }

    store.get_value("F", "s").unwrap();
    assert_eq!(
        recorder.calls(),
        vec![
            ("F".to_string(), "s".to_string()),
            ("G".to_string(), "s".to_string()),
        ]
    );
}

#[test]
fn hooks_fire_at_the_terminal_frame() {
    let (mut store, recorder) = store_with_recorder();
    store.create_frame("G");
    store.create_slot("G", "s");
    store.create_reference("F", "s").unwrap();
    store.put_reference("F", "s", "G").unwrap();
    store.create_value("G", "s").unwrap();
    store.create_demon("G", "s", "ifputv");
    store.put_demon("G", "s", "ifputv", "record");

    store.put_value("F", "s", "7").unwrap();
    assert_eq!(recorder.calls(), vec![("G".to_string(), "s".to_string())]);
}

#[test]
fn method_execution_resolves_capability_by_name() {
    let (mut store, recorder) = store_with_recorder();
    store.create_method("F", "s").unwrap();
    store.put_method("F", "s", "record").unwrap();

    assert!(store.exec_method("F", "s").unwrap());
    assert_eq!(recorder.calls(), vec![("F".to_string(), "s".to_string())]);
}

#[test]
fn exec_hook_fires_before_method_body() {
    let (mut store, _recorder) = store_with_recorder();
    let order = Arc::new(Mutex::new(Vec::new()));
    let order_hook = order.clone();
    let order_body = order.clone();
    store.register_capability(
        "note_hook",
        Arc::new(
            move |_ctx: &HookContext<'_>| -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
                order_hook.lock().unwrap().push("hook");
                Ok(())
            },
        ),
    );
    store.register_capability(
        "note_body",
        Arc::new(
            move |_ctx: &HookContext<'_>| -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
                order_body.lock().unwrap().push("body");
                Ok(())
            },
        ),
    );
    store.create_method("F", "s").unwrap();
    store.put_method("F", "s", "note_body").unwrap();
    store.create_demon("F", "s", "ifexecm");
    store.put_demon("F", "s", "ifexecm", "note_hook");

    store.exec_method("F", "s").unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["hook", "body"]);
}

#[test]
fn executor_failure_propagates_to_canonical_caller() {
    let mut store = FrameStore::new();
    store.register_capability(
        "boom",
        Arc::new(
            |_ctx: &HookContext<'_>| -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
                Err("hook failed".into())
            },
        ),
    );
    store.create_frame("F");
    store.create_slot("F", "s");
    store.create_value("F", "s").unwrap();
    store.create_demon("F", "s", "ifgetv");
    store.put_demon("F", "s", "ifgetv", "boom");

    assert!(matches!(
        store.get_value("F", "s"),
        Err(FrameError::CapabilityFailed { .. })
    ));
}

#[test]
fn direct_demons_are_never_auto_fired() {
    let (mut store, recorder) = store_with_recorder();
    store.create_value("F", "s").unwrap();
    store.create_demon("F", "s", "maintenance");
    store.put_demon("F", "s", "maintenance", "record");

    store.get_value("F", "s").unwrap();
    store.put_value("F", "s", "7").unwrap();
    assert!(recorder.calls().is_empty());

    assert!(store.exec_demon("F", "s", "maintenance").unwrap());
    assert_eq!(recorder.calls().len(), 1);
}

// Host-side tests for the shared callback slot.

#![allow(dead_code)]
mod slot {
    include!("../src/slot.rs");
}

use slot::CallbackSlot;

#[test]
fn empty_slot_has_no_callback() {
    let slot: CallbackSlot<&'static str> = CallbackSlot::default();
    assert_eq!(slot.get(), None);
}

#[test]
fn callback_set_after_a_task_took_its_handle_is_seen() {
    let player: CallbackSlot<&'static str> = CallbackSlot::default();
    // a preload task captures its handle before anyone registers onError
    let task = player.clone();
    player.set("first");
    assert_eq!(task.get(), Some("first"));
    player.set("second");
    assert_eq!(task.get(), Some("second"));
}

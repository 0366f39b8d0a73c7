//! Integration tests for the key-event interception hook.

use padmap::engine::{KeyEvent, KeymapRuntime};
use padmap::models::{Key, Keycode, MacroId, Modifiers, TapDanceKey};

#[test]
fn test_macro_press_emits_once_and_suppresses() {
    let mut runtime = KeymapRuntime::mp20();
    let mut sink: Vec<String> = Vec::new();

    let forwarded = runtime.on_key_event(
        KeyEvent::press(Keycode::Macro(MacroId::Boop)),
        &mut sink,
    );

    assert!(!forwarded, "macro press must suppress default handling");
    assert_eq!(sink, vec!["Boop. "], "exactly one emission of the literal");
}

#[test]
fn test_macro_release_forwards_and_emits_nothing() {
    let mut runtime = KeymapRuntime::mp20();
    let mut sink: Vec<String> = Vec::new();

    let forwarded = runtime.on_key_event(
        KeyEvent::release(Keycode::Macro(MacroId::Boop)),
        &mut sink,
    );

    assert!(forwarded);
    assert!(sink.is_empty());
}

#[test]
fn test_non_macro_codes_always_forward() {
    let mut runtime = KeymapRuntime::mp20();
    let mut sink: Vec<String> = Vec::new();

    let codes = [
        Keycode::Plain(Key::Kp5),
        Keycode::Plain(Key::MediaPlay),
        Keycode::Chord(Modifiers::CTRL, Key::C),
        Keycode::Chord(Modifiers::CTRL_GUI, Key::D),
        Keycode::TapDance(TapDanceKey::Workspace),
        Keycode::TapDance(TapDanceKey::Arrows),
        Keycode::Transparent,
        Keycode::NoOp,
    ];

    for code in codes {
        for pressed in [true, false] {
            let event = KeyEvent { code, pressed };
            assert!(
                runtime.on_key_event(event, &mut sink),
                "{code} pressed={pressed} was not forwarded"
            );
        }
    }
    assert!(sink.is_empty(), "no non-macro event may emit text");
}

#[test]
fn test_hook_does_not_touch_layer_state() {
    let mut runtime = KeymapRuntime::mp20();
    let mut sink: Vec<String> = Vec::new();
    let before = *runtime.layer_state();

    runtime.on_key_event(KeyEvent::press(Keycode::Macro(MacroId::Boop)), &mut sink);
    runtime.on_key_event(KeyEvent::press(Keycode::Plain(Key::Kp1)), &mut sink);

    assert_eq!(*runtime.layer_state(), before);
}

#[test]
fn test_repeated_macro_presses_emit_each_time() {
    let mut runtime = KeymapRuntime::mp20();
    let mut sink: Vec<String> = Vec::new();

    for _ in 0..3 {
        runtime.on_key_event(KeyEvent::press(Keycode::Macro(MacroId::Boop)), &mut sink);
        runtime.on_key_event(KeyEvent::release(Keycode::Macro(MacroId::Boop)), &mut sink);
    }

    assert_eq!(sink, vec!["Boop. ", "Boop. ", "Boop. "]);
}

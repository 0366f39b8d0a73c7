//! Integration tests for the layer-selection state machine.
//!
//! Covers the gesture transition table: overlay mutual exclusion, toggle
//! semantics, the double-tap convergence on Macros, and no-op tap counts.

use padmap::engine::{Gesture, KeymapRuntime};
use padmap::models::{LayerId, TapDanceKey};

fn gesture(key: TapDanceKey, taps: u8) -> Gesture {
    Gesture::new(key, taps)
}

#[test]
fn test_fresh_runtime_has_no_overlay() {
    let runtime = KeymapRuntime::mp20();
    assert!(runtime.layer_state().is_active(LayerId::Numpad));
    assert_eq!(runtime.layer_state().active_overlay(), None);
}

#[test]
fn test_single_tap_activates_each_overlay() {
    let mut runtime = KeymapRuntime::mp20();
    runtime.on_gesture(gesture(TapDanceKey::Workspace, 1));
    assert_eq!(
        runtime.layer_state().active_overlay(),
        Some(LayerId::Workspace)
    );

    let mut runtime = KeymapRuntime::mp20();
    runtime.on_gesture(gesture(TapDanceKey::Arrows, 1));
    assert_eq!(
        runtime.layer_state().active_overlay(),
        Some(LayerId::Arrows)
    );
}

#[test]
fn test_single_tap_twice_toggles_off() {
    let mut runtime = KeymapRuntime::mp20();
    runtime.on_gesture(gesture(TapDanceKey::Workspace, 1));
    runtime.on_gesture(gesture(TapDanceKey::Workspace, 1));
    assert_eq!(runtime.layer_state().active_overlay(), None);

    runtime.on_gesture(gesture(TapDanceKey::Arrows, 1));
    runtime.on_gesture(gesture(TapDanceKey::Arrows, 1));
    assert_eq!(runtime.layer_state().active_overlay(), None);
}

#[test]
fn test_selecting_one_overlay_deactivates_the_others() {
    let mut runtime = KeymapRuntime::mp20();
    runtime.on_gesture(gesture(TapDanceKey::Workspace, 1));
    runtime.on_gesture(gesture(TapDanceKey::Arrows, 1));

    let state = runtime.layer_state();
    assert_eq!(state.active_overlay(), Some(LayerId::Arrows));
    assert!(!state.is_active(LayerId::Workspace));
    assert!(!state.is_active(LayerId::Macros));
}

#[test]
fn test_double_tap_convergence_from_any_prior_state() {
    // Double-tapping either bound key lands on "Macros only", regardless of
    // which overlay was active before.
    for prior in [
        None,
        Some(gesture(TapDanceKey::Workspace, 1)),
        Some(gesture(TapDanceKey::Arrows, 1)),
    ] {
        for double in [TapDanceKey::Workspace, TapDanceKey::Arrows] {
            let mut runtime = KeymapRuntime::mp20();
            if let Some(g) = prior {
                runtime.on_gesture(g);
            }
            runtime.on_gesture(gesture(double, 2));

            let state = runtime.layer_state();
            assert_eq!(state.active_overlay(), Some(LayerId::Macros));
            assert!(!state.is_active(LayerId::Workspace));
            assert!(!state.is_active(LayerId::Arrows));
        }
    }
}

#[test]
fn test_double_tap_toggles_macros_off_again() {
    let mut runtime = KeymapRuntime::mp20();
    runtime.on_gesture(gesture(TapDanceKey::Workspace, 2));
    assert_eq!(runtime.layer_state().active_overlay(), Some(LayerId::Macros));

    // A second double tap (from either key) inverts Macros back off.
    runtime.on_gesture(gesture(TapDanceKey::Arrows, 2));
    assert_eq!(runtime.layer_state().active_overlay(), None);
}

#[test]
fn test_out_of_range_tap_counts_are_noops() {
    let mut runtime = KeymapRuntime::mp20();
    runtime.on_gesture(gesture(TapDanceKey::Arrows, 1));
    let before = *runtime.layer_state();

    for taps in [0, 3, 4, 17, 255] {
        runtime.on_gesture(gesture(TapDanceKey::Workspace, taps));
        runtime.on_gesture(gesture(TapDanceKey::Arrows, taps));
        assert_eq!(*runtime.layer_state(), before, "taps={taps} mutated state");
    }
}

#[test]
fn test_mutual_exclusion_holds_across_arbitrary_sequences() {
    let sequence = [
        gesture(TapDanceKey::Workspace, 1),
        gesture(TapDanceKey::Arrows, 2),
        gesture(TapDanceKey::Arrows, 1),
        gesture(TapDanceKey::Arrows, 3),
        gesture(TapDanceKey::Workspace, 2),
        gesture(TapDanceKey::Workspace, 2),
        gesture(TapDanceKey::Arrows, 1),
        gesture(TapDanceKey::Workspace, 1),
        gesture(TapDanceKey::Workspace, 0),
        gesture(TapDanceKey::Arrows, 2),
        gesture(TapDanceKey::Workspace, 1),
        gesture(TapDanceKey::Arrows, 1),
    ];

    let mut runtime = KeymapRuntime::mp20();
    for (idx, g) in sequence.iter().enumerate() {
        runtime.on_gesture(*g);
        let state = runtime.layer_state();
        assert!(
            state.overlay_count() <= 1,
            "overlay exclusion violated after step {idx}: {:?}",
            state.names()
        );
        assert!(state.is_active(LayerId::Numpad));
        assert!(!state.is_active(LayerId::Modifier));
    }
}

#[test]
fn test_end_to_end_scenario() {
    // From the keymap's intended use: arrows, then macros, then workspace.
    let mut runtime = KeymapRuntime::mp20();

    runtime.on_gesture(gesture(TapDanceKey::Arrows, 1));
    assert_eq!(runtime.layer_state().active_overlay(), Some(LayerId::Arrows));

    runtime.on_gesture(gesture(TapDanceKey::Workspace, 2));
    assert_eq!(runtime.layer_state().active_overlay(), Some(LayerId::Macros));
    assert!(!runtime.layer_state().is_active(LayerId::Arrows));

    runtime.on_gesture(gesture(TapDanceKey::Workspace, 1));
    assert_eq!(
        runtime.layer_state().active_overlay(),
        Some(LayerId::Workspace)
    );
    assert!(!runtime.layer_state().is_active(LayerId::Macros));
}

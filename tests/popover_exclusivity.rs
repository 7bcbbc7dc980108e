//! Single-open behavior across several pickers sharing one coordinator.

mod common;

use std::sync::Arc;

use common::{assertions::assert_eq_logged, init_test_logging, picker, test_phase};
use edgy_color_picker::prelude::*;

#[test]
fn test_opening_b_closes_a() {
    init_test_logging();
    let coordinator = Arc::new(PopoverCoordinator::new());
    let mut a = picker(&coordinator, "a");
    let mut b = picker(&coordinator, "b");

    a.toggle();
    assert_eq_logged("a after toggle", a.state(), PopoverState::Open);

    b.toggle();
    assert_eq_logged("a after b opened", a.state(), PopoverState::Closed);
    assert_eq_logged("b after toggle", b.state(), PopoverState::Open);
    assert_eq_logged("open instance", coordinator.open_instance(), Some(b.id()));
}

#[test]
fn test_never_two_open_at_once() {
    init_test_logging();
    let coordinator = Arc::new(PopoverCoordinator::new());
    let mut pickers: Vec<PickerController> = (0..5)
        .map(|i| picker(&coordinator, &format!("p{i}")))
        .collect();

    let sequence = [0, 3, 3, 1, 4, 4, 4, 2, 0, 1];
    for index in sequence {
        let _phase = test_phase(&format!("toggle {index}"));
        pickers[index].toggle();
        let open = pickers.iter().filter(|p| p.is_open()).count();
        assert!(open <= 1, "{open} pickers open after toggling {index}");
    }
}

#[test]
fn test_closing_does_not_reopen_others() {
    init_test_logging();
    let coordinator = Arc::new(PopoverCoordinator::new());
    let mut a = picker(&coordinator, "a");
    let mut b = picker(&coordinator, "b");

    a.open();
    b.open();
    b.close();

    assert!(!a.is_open());
    assert!(!b.is_open());
    assert_eq!(coordinator.open_instance(), None);
}

#[test]
fn test_separate_coordinators_are_independent() {
    init_test_logging();
    let first = Arc::new(PopoverCoordinator::new());
    let second = Arc::new(PopoverCoordinator::new());
    let mut a = picker(&first, "a");
    let mut b = picker(&second, "b");

    a.open();
    b.open();
    assert!(a.is_open());
    assert!(b.is_open());
}

#[test]
fn test_closed_by_broadcast_ends_drag() {
    init_test_logging();
    let coordinator = Arc::new(PopoverCoordinator::new());
    let mut a = picker(&coordinator, "a");
    let mut b = picker(&coordinator, "b");

    a.open();
    a.pointer_down(Surface::SaturationValue, 10.0, 10.0);
    let before = a.color();

    b.open();
    a.pointer_move(200.0, 200.0);
    assert_eq!(a.color(), before);
    assert!(!a.is_dragging());
}

#[test]
fn test_dropped_picker_unsubscribes_and_releases() {
    init_test_logging();
    let coordinator = Arc::new(PopoverCoordinator::new());
    let mut a = picker(&coordinator, "a");
    {
        let mut b = picker(&coordinator, "b");
        b.open();
        assert_eq!(coordinator.subscriber_count(), 2);
    }
    assert_eq!(coordinator.subscriber_count(), 1);
    assert_eq!(coordinator.open_instance(), None);

    a.open();
    assert!(a.is_open());
}

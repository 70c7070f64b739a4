use std::time::Instant;

use insta::assert_snapshot;

use crate::core::tests::{Desk, setup_logger, thresholds};
use crate::core::{BarPosition, DisplayKind};

#[test]
fn overlay_holds_bar_hidden_until_it_closes() {
    setup_logger();
    let now = Instant::now();
    let desk = Desk::new();
    let mut hub = desk.hub(thresholds(), false);
    hub.start();

    desk.move_to(50.0);
    hub.tick(now);
    assert_eq!(desk.trace(), "");
    assert!(!hub.machine().state().hidden);

    desk.move_to(2.0);
    hub.tick(now);
    assert_snapshot!(desk.trace(), @"emit cursor_at_top");
    assert!(hub.machine().state().hidden);

    desk.move_to(50.0);
    desk.set_overlay(true);
    hub.tick(now);
    assert_eq!(desk.trace(), "");
    assert!(hub.machine().state().hidden);

    // Same distance, only the overlay went away.
    desk.set_overlay(false);
    hub.tick(now);
    assert_snapshot!(desk.trace(), @"emit cursor_away_from_top");
    assert!(!hub.machine().state().hidden);
}

#[test]
fn crossing_both_thresholds_in_one_tick_emits_once() {
    setup_logger();
    let now = Instant::now();
    let desk = Desk::new();
    let mut hub = desk.hub(thresholds(), false);
    hub.start();

    desk.move_to(120.0);
    hub.tick(now);
    desk.move_to(0.0);
    hub.tick(now);
    hub.tick(now);
    hub.tick(now);

    assert_snapshot!(desk.trace(), @"emit cursor_at_top");
    assert!(hub.machine().state().hidden);
}

#[test]
fn bouncer_repels_pointer_until_override_is_held() {
    setup_logger();
    let now = Instant::now();
    let desk = Desk::new();
    let mut hub = desk.hub(thresholds(), true);
    hub.start();

    // Each push towards the edge lands the pointer 6px below it, which is out of bouncer reach.
    for distance in [5.0, 2.0, 0.0] {
        desk.move_to(distance);
        hub.tick(now);
        assert_eq!(desk.distance(), 6.0);
        hub.tick(now);
    }

    desk.set_override(true);
    desk.move_to(1.0);
    hub.tick(now);

    // Override released while hidden: bounced back into the dead zone, bar stays hidden.
    desk.set_override(false);
    desk.move_to(1.0);
    hub.tick(now);
    hub.tick(now);
    assert!(hub.machine().state().hidden);

    desk.move_to(45.0);
    hub.tick(now);

    assert_snapshot!(desk.trace(), @r"
    warp (100.0, 6.0)
    warp (100.0, 6.0)
    warp (100.0, 6.0)
    emit cursor_at_top
    warp (100.0, 6.0)
    emit cursor_away_from_top
    ");
}

#[test]
fn external_primary_parks_the_bar_at_the_bottom() {
    setup_logger();
    let now = Instant::now();
    let desk = Desk::new();
    desk.set_display(DisplayKind::External);
    let mut hub = desk.hub(thresholds(), true);
    hub.start();
    assert_snapshot!(desk.trace(), @"emit display_external_primary");
    assert_eq!(hub.machine().state().position, BarPosition::Bottom);

    for distance in [0.0, 1.0, 3.0, 5.0, 6.0, 44.0, 45.0, 800.0, 0.0] {
        desk.move_to(distance);
        hub.tick(now);
    }
    desk.set_override(true);
    desk.move_to(0.0);
    hub.tick(now);

    assert_eq!(desk.trace(), "");
    assert_eq!(desk.distance(), 0.0);
    assert!(!hub.machine().state().hidden);
}

#[test]
fn builtin_primary_at_startup_emits_nothing() {
    setup_logger();
    let desk = Desk::new();
    let mut hub = desk.hub(thresholds(), true);
    hub.start();
    assert_eq!(desk.trace(), "");
    assert_eq!(desk.display_queries(), 1);
    assert_eq!(hub.machine().state().position, BarPosition::Top);
}

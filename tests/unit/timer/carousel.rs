use super::*;

use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn rejects_empty_or_non_positive_configuration() {
    assert!(matches!(
        CarouselController::new(0, 4000.0),
        Err(EngineError::Config(_))
    ));
    assert!(matches!(
        CarouselController::new(5, 0.0),
        Err(EngineError::Config(_))
    ));
    assert!(matches!(
        CarouselController::new(5, -1.0),
        Err(EngineError::Config(_))
    ));
}

#[test]
fn autoplay_advances_then_wraps() {
    let mut carousel = CarouselController::new(5, 4000.0).unwrap();
    carousel.tick(TimeMs(0.0));

    for ms in (0..=16_000).step_by(100) {
        carousel.tick(TimeMs(f64::from(ms)));
    }
    assert_eq!(carousel.state().index, 4);

    carousel.tick(TimeMs(20_000.0));
    assert_eq!(carousel.state().index, 0);
}

#[test]
fn pause_drops_the_pending_advance_and_resume_restarts_the_interval() {
    let mut carousel = CarouselController::new(5, 4000.0).unwrap();
    carousel.tick(TimeMs(0.0));
    carousel.tick(TimeMs(4000.0));
    assert_eq!(carousel.state().index, 1);

    // Pause 100 ms before the next advance would fire.
    carousel.tick(TimeMs(7900.0));
    carousel.pause();
    for ms in (8000..=18_000).step_by(100) {
        carousel.tick(TimeMs(f64::from(ms)));
    }
    assert_eq!(carousel.state().index, 1);
    assert!(carousel.state().paused);

    carousel.resume();
    carousel.tick(TimeMs(18_000.0));
    assert_eq!(carousel.state().index, 1);
    carousel.tick(TimeMs(21_999.0));
    assert_eq!(carousel.state().index, 1);
    carousel.tick(TimeMs(22_000.0));
    assert_eq!(carousel.state().index, 2);
}

#[test]
fn manual_navigation_wraps_both_ways() {
    let mut carousel = CarouselController::new(3, 4000.0).unwrap();
    carousel.prev();
    assert_eq!(carousel.state().index, 2);
    carousel.next();
    assert_eq!(carousel.state().index, 0);
    carousel.go_to(1).unwrap();
    assert_eq!(carousel.state().index, 1);
}

#[test]
fn go_to_rejects_out_of_range() {
    let mut carousel = CarouselController::new(3, 4000.0).unwrap();
    let err = carousel.go_to(3).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
    assert_eq!(carousel.state().index, 0);
}

#[test]
fn stalled_host_loop_catches_up() {
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let mut carousel = CarouselController::new(4, 1000.0)
        .unwrap()
        .with_on_change(move |i| s.borrow_mut().push(i));

    carousel.tick(TimeMs(0.0));
    carousel.tick(TimeMs(3500.0));
    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
}

#[test]
fn destroy_is_idempotent_and_silences_callbacks() {
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let mut carousel = CarouselController::new(5, 1000.0)
        .unwrap()
        .with_on_change(move |i| s.borrow_mut().push(i));

    carousel.tick(TimeMs(0.0));
    carousel.tick(TimeMs(1000.0));
    assert_eq!(*seen.borrow(), vec![1]);

    carousel.destroy();
    carousel.destroy();
    carousel.tick(TimeMs(5000.0));
    carousel.next();
    carousel.resume();
    carousel.tick(TimeMs(9000.0));
    assert_eq!(*seen.borrow(), vec![1]);
    assert!(carousel.is_destroyed());
}

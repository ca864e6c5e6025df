use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn drive(tw: &mut TypewriterController, from_ms: u64, to_ms: u64, step_ms: u64) {
    let mut ms = from_ms;
    while ms <= to_ms {
        tw.tick(TimeMs(ms as f64));
        ms += step_ms;
    }
}

#[test]
fn rejects_non_positive_intervals() {
    let mut tw = TypewriterController::new();
    let err = tw
        .start(TypewriterSpec::new("x", 0.0, 500.0), |_| {}, || {})
        .unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
    assert!(tw.state().is_none());
}

#[test]
fn reveals_one_character_per_interval_then_holds() {
    let mut tw = TypewriterController::new();
    let reveals: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let completed = Rc::new(Cell::new(0u32));

    let r = Rc::clone(&reveals);
    let c = Rc::clone(&completed);
    tw.start(
        TypewriterSpec::new("DONGGUK UMC", 50.0, 500.0),
        move |n| r.borrow_mut().push(n),
        move || c.set(c.get() + 1),
    )
    .unwrap();

    drive(&mut tw, 0, 550, 10);
    assert_eq!(*reveals.borrow(), (1..=11).collect::<Vec<_>>());
    assert_eq!(tw.revealed_text().unwrap(), "DONGGUK UMC");
    assert_eq!(tw.state().unwrap().phase, TypewriterPhase::Holding);
    assert_eq!(completed.get(), 0);

    // Completion fires exactly once, when the hold delay elapses.
    drive(&mut tw, 560, 1040, 10);
    assert_eq!(completed.get(), 0);
    tw.tick(TimeMs(1050.0));
    assert_eq!(completed.get(), 1);
    assert_eq!(tw.state().unwrap().phase, TypewriterPhase::Leaving);

    // Exit transition runs its course, then the run is done.
    tw.tick(TimeMs(1050.0 + DEFAULT_LEAVE_MS));
    assert_eq!(tw.state().unwrap().phase, TypewriterPhase::Done);
    assert_eq!(completed.get(), 1);
    assert!(!tw.is_active());
}

#[test]
fn stalled_ticks_catch_up_without_skipping_reveals() {
    let mut tw = TypewriterController::new();
    let reveals: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));

    let r = Rc::clone(&reveals);
    tw.start(
        TypewriterSpec::new("UMC", 50.0, 100.0),
        move |n| r.borrow_mut().push(n),
        || {},
    )
    .unwrap();

    tw.tick(TimeMs(0.0));
    tw.tick(TimeMs(900.0));
    assert_eq!(*reveals.borrow(), vec![1, 2, 3]);
    // A single late tick may traverse hold and leave in one pass.
    assert_eq!(tw.state().unwrap().phase, TypewriterPhase::Done);
}

#[test]
fn cancel_before_done_silences_everything() {
    let mut tw = TypewriterController::new();
    let reveals: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let completed = Rc::new(Cell::new(false));

    let r = Rc::clone(&reveals);
    let c = Rc::clone(&completed);
    tw.start(
        TypewriterSpec::new("DONGGUK UMC", 50.0, 500.0),
        move |n| r.borrow_mut().push(n),
        move || c.set(true),
    )
    .unwrap();

    drive(&mut tw, 0, 200, 10);
    let revealed = reveals.borrow().len();
    assert!(revealed > 0);

    tw.cancel();
    tw.cancel();
    drive(&mut tw, 210, 5000, 10);
    assert_eq!(reveals.borrow().len(), revealed);
    assert!(!completed.get());
    assert!(tw.state().is_none());
}

#[test]
fn restart_cancels_the_prior_run() {
    let mut tw = TypewriterController::new();
    let first_completed = Rc::new(Cell::new(false));
    let second_reveals: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));

    let c = Rc::clone(&first_completed);
    tw.start(TypewriterSpec::new("FIRST", 50.0, 500.0), |_| {}, move || {
        c.set(true)
    })
    .unwrap();
    drive(&mut tw, 0, 100, 10);

    let r = Rc::clone(&second_reveals);
    tw.start(
        TypewriterSpec::new("SECOND", 50.0, 500.0),
        move |n| r.borrow_mut().push(n),
        || {},
    )
    .unwrap();
    assert_eq!(tw.state().unwrap().revealed, 0);

    drive(&mut tw, 200, 5000, 10);
    assert_eq!(second_reveals.borrow().len(), "SECOND".len());
    // The replaced run's completion never fires.
    assert!(!first_completed.get());
}

#[test]
fn empty_text_holds_immediately() {
    let mut tw = TypewriterController::new();
    let completed = Rc::new(Cell::new(false));

    let c = Rc::clone(&completed);
    tw.start(TypewriterSpec::new("", 50.0, 100.0), |_| {}, move || {
        c.set(true)
    })
    .unwrap();

    tw.tick(TimeMs(0.0));
    // Zero characters reveal instantly; only the hold delay remains.
    assert_eq!(tw.state().unwrap().phase, TypewriterPhase::Holding);
    tw.tick(TimeMs(100.0));
    assert!(completed.get());
}

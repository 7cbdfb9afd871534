use slot::{Batch, Point, Publish, SharedSlot, Status, TransitionError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn batch_of(n: u32) -> Batch {
    (0..n).map(|i| Point::new(i, i + 1)).collect()
}

#[test]
fn new_slot_is_finished_and_empty() {
    let slot = SharedSlot::new();
    assert_eq!(slot.status(), Status::Finished);
    assert!(!slot.has_pending());
    let (batch, status) = slot.drain();
    assert!(batch.is_empty());
    assert_eq!(status, Status::Finished);
}

#[test]
fn publish_while_finished_requests_stop() {
    let slot = SharedSlot::new();
    assert_eq!(slot.try_publish(batch_of(3)), Publish::Stopped);
    assert!(!slot.has_pending());
}

#[test]
fn publish_then_drain_hands_over_batch() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    let b1 = batch_of(100);
    assert_eq!(slot.try_publish(b1.clone()), Publish::Accepted);
    assert!(slot.has_pending());

    let (batch, status) = slot.drain();
    assert_eq!(batch, b1);
    assert_eq!(status, Status::Started);
    assert!(!slot.has_pending());
}

#[test]
fn second_publish_is_rejected_until_drain() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    assert_eq!(slot.try_publish(batch_of(2)), Publish::Accepted);

    let b2 = batch_of(5);
    match slot.try_publish(b2.clone()) {
        Publish::Rejected(returned) => assert_eq!(returned, b2),
        other => panic!("expected rejection, got {other:?}"),
    }

    let (first, _) = slot.drain();
    assert_eq!(first.len(), 2);
    assert_eq!(slot.try_publish(b2), Publish::Accepted);
}

#[test]
fn drain_twice_yields_empty_second_time() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    slot.try_publish(batch_of(4));
    let (first, _) = slot.drain();
    let (second, status) = slot.drain();
    assert_eq!(first.len(), 4);
    assert!(second.is_empty());
    assert_eq!(status, Status::Started);
}

#[test]
fn paused_slot_rejects_publish() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    slot.set_paused(true).unwrap();
    assert!(matches!(slot.try_publish(batch_of(1)), Publish::Rejected(_)));
    slot.set_paused(false).unwrap();
    assert_eq!(slot.try_publish(batch_of(1)), Publish::Accepted);
}

#[test]
fn drain_while_paused_reports_paused_with_stale_batch() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    slot.try_publish(batch_of(7));
    slot.set_paused(true).unwrap();
    let (batch, status) = slot.drain();
    assert_eq!(batch.len(), 7);
    assert_eq!(status, Status::Paused);
}

#[test]
fn start_twice_reports_already_running() {
    let slot = SharedSlot::new();
    assert_eq!(slot.start(), Ok(()));
    assert_eq!(slot.start(), Err(TransitionError::AlreadyRunning));
    assert_eq!(slot.status(), Status::Started);
}

#[test]
fn start_while_paused_reports_already_running() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    slot.set_paused(true).unwrap();
    assert_eq!(slot.start(), Err(TransitionError::AlreadyRunning));
    assert_eq!(slot.status(), Status::Paused);
}

#[test]
fn stop_while_finished_reports_already_stopped() {
    let slot = SharedSlot::new();
    assert_eq!(slot.stop(), Err(TransitionError::AlreadyStopped));
    assert_eq!(slot.status(), Status::Finished);
}

#[test]
fn pause_while_finished_is_ignored() {
    let slot = SharedSlot::new();
    assert_eq!(slot.set_paused(true), Err(TransitionError::NotRunning));
    assert_eq!(slot.status(), Status::Finished);
}

#[test]
fn stop_discards_pending_batch() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    slot.try_publish(batch_of(10));
    slot.stop().unwrap();
    let (batch, status) = slot.drain();
    assert!(batch.is_empty());
    assert_eq!(status, Status::Finished);
    assert_eq!(slot.try_publish(batch_of(1)), Publish::Stopped);
}

#[test]
fn slot_can_be_restarted_after_stop() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    slot.stop().unwrap();
    slot.start().unwrap();
    assert_eq!(slot.status(), Status::Started);
    assert_eq!(slot.try_publish(batch_of(1)), Publish::Accepted);
}

#[test]
fn wait_for_room_returns_immediately_when_slot_accepts() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    let started = Instant::now();
    assert_eq!(slot.wait_for_room(Duration::from_secs(5)), Status::Started);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn wait_for_room_times_out_while_full() {
    let slot = SharedSlot::new();
    slot.start().unwrap();
    slot.try_publish(batch_of(1));
    let started = Instant::now();
    assert_eq!(slot.wait_for_room(Duration::from_millis(50)), Status::Started);
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert!(slot.has_pending());
}

#[test]
fn wait_for_room_wakes_on_drain() {
    let slot = Arc::new(SharedSlot::new());
    slot.start().unwrap();
    slot.try_publish(batch_of(1));

    let consumer = {
        let slot = Arc::clone(&slot);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            slot.drain()
        })
    };

    let started = Instant::now();
    let status = slot.wait_for_room(Duration::from_secs(5));
    assert_eq!(status, Status::Started);
    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(!slot.has_pending());
    let (batch, _) = consumer.join().unwrap();
    assert_eq!(batch.len(), 1);
}

#[test]
fn wait_for_room_wakes_on_stop() {
    let slot = Arc::new(SharedSlot::new());
    slot.start().unwrap();
    slot.set_paused(true).unwrap();

    let stopper = {
        let slot = Arc::clone(&slot);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            slot.stop()
        })
    };

    let started = Instant::now();
    assert_eq!(slot.wait_for_room(Duration::from_secs(5)), Status::Finished);
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(stopper.join().unwrap(), Ok(()));
}

#[test]
fn transition_errors_carry_operator_messages() {
    assert_eq!(
        TransitionError::AlreadyRunning.to_string(),
        "thread already started"
    );
    assert_eq!(
        TransitionError::AlreadyStopped.to_string(),
        "thread already finished"
    );
}

#[test]
fn status_display_and_running_flag() {
    assert_eq!(Status::Started.to_string(), "started");
    assert_eq!(Status::Paused.to_string(), "paused");
    assert_eq!(Status::Finished.to_string(), "finished");
    assert!(Status::Started.is_running());
    assert!(Status::Paused.is_running());
    assert!(!Status::Finished.is_running());
    assert_eq!(Status::default(), Status::Finished);
}

//! Auto-advance behaviour of the playback controller, run on paused tokio
//! time so durations are exact.

use instalearn::config::PlaybackConfig;
use instalearn::playback::{PlaybackController, PlaybackEvent, PlaybackHandle};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::Instant;

// "One." and "Two." are one word each: 3.5s on screen, then 300ms delay.
const TWO_REELS: &str = "One. Two.";
const REEL_CYCLE: Duration = Duration::from_millis(3800);
const SLACK: Duration = Duration::from_millis(50);

async fn started(text: &str) -> (PlaybackHandle, broadcast::Receiver<PlaybackEvent>) {
    let (handle, _task) = PlaybackController::spawn(PlaybackConfig::default());
    let mut events = handle.subscribe();
    handle.set_input(text).await.unwrap();
    handle.regenerate_seeded(1).await.unwrap();

    match events.recv().await.unwrap() {
        PlaybackEvent::BatchGenerated { .. } => {}
        other => panic!("expected BatchGenerated, got {other:?}"),
    }
    assert_eq!(next_activation(&mut events).await, 0);
    (handle, events)
}

async fn next_activation(events: &mut broadcast::Receiver<PlaybackEvent>) -> usize {
    loop {
        match events.recv().await.unwrap() {
            PlaybackEvent::ReelActivated { index, .. } => return index,
            PlaybackEvent::Progress { .. } | PlaybackEvent::BatchGenerated { .. } => {}
            other => panic!("unexpected event {other:?}"),
        }
    }
}

fn assert_about(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + SLACK,
        "elapsed {elapsed:?}, expected about {expected:?}"
    );
}

/// Drain queued events and report whether any reel activation was among them.
fn activated_since(events: &mut broadcast::Receiver<PlaybackEvent>) -> bool {
    loop {
        match events.try_recv() {
            Ok(PlaybackEvent::ReelActivated { .. }) => return true,
            Ok(_) => {}
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return false,
            Err(TryRecvError::Lagged(_)) => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_auto_advance_after_duration_and_delay() {
    let (_handle, mut events) = started(TWO_REELS).await;
    let start = Instant::now();

    assert_eq!(next_activation(&mut events).await, 1);
    assert_about(start.elapsed(), REEL_CYCLE);
}

#[tokio::test(start_paused = true)]
async fn test_auto_advance_wraps_to_first() {
    let (_handle, mut events) = started(TWO_REELS).await;
    let start = Instant::now();

    assert_eq!(next_activation(&mut events).await, 1);
    assert_eq!(next_activation(&mut events).await, 0);
    assert_about(start.elapsed(), REEL_CYCLE * 2);
}

#[tokio::test(start_paused = true)]
async fn test_progress_reaches_full() {
    let (_handle, mut events) = started(TWO_REELS).await;

    let mut percents = Vec::new();
    loop {
        match events.recv().await.unwrap() {
            PlaybackEvent::Progress { reel_id, percent } => {
                assert_eq!(reel_id.as_str(), "reel-0");
                percents.push(percent);
            }
            PlaybackEvent::ReelActivated { index, .. } => {
                assert_eq!(index, 1);
                break;
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    assert_eq!(percents.len(), 35);
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert!((percents[34] - 100.0).abs() < f32::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn test_pause_keeps_progress() {
    let (handle, mut events) = started(TWO_REELS).await;

    let mut ticks = 0;
    while ticks < 10 {
        if let PlaybackEvent::Progress { .. } = events.recv().await.unwrap() {
            ticks += 1;
        }
    }

    handle.toggle_play().await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(!activated_since(&mut events));
    assert!(!handle.snapshot().await.unwrap().playing);

    handle.toggle_play().await.unwrap();
    let resumed = Instant::now();
    assert_eq!(next_activation(&mut events).await, 1);
    // 25 remaining steps plus the delay.
    assert_about(resumed.elapsed(), Duration::from_millis(2800));
}

#[tokio::test(start_paused = true)]
async fn test_pause_during_advance_delay() {
    let (handle, mut events) = started(TWO_REELS).await;

    tokio::time::sleep(Duration::from_millis(3650)).await;
    handle.toggle_play().await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!activated_since(&mut events));
    assert_eq!(handle.snapshot().await.unwrap().index, 0);

    handle.toggle_play().await.unwrap();
    let resumed = Instant::now();
    assert_eq!(next_activation(&mut events).await, 1);
    assert_about(resumed.elapsed(), Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_manual_advance_restarts_timer() {
    let (handle, mut events) = started(TWO_REELS).await;

    tokio::time::sleep(Duration::from_millis(2000)).await;
    handle.advance().await.unwrap();
    let moved = Instant::now();
    assert_eq!(next_activation(&mut events).await, 1);

    assert_eq!(next_activation(&mut events).await, 0);
    assert_about(moved.elapsed(), REEL_CYCLE);
}

#[tokio::test(start_paused = true)]
async fn test_retreat_wraps_to_last() {
    let (handle, mut events) = started("A. B. C.").await;

    handle.retreat().await.unwrap();
    assert_eq!(next_activation(&mut events).await, 2);
    assert_eq!(handle.snapshot().await.unwrap().index, 2);
}

#[tokio::test(start_paused = true)]
async fn test_jump_to_out_of_range_ignored() {
    let (handle, mut events) = started(TWO_REELS).await;

    handle.jump_to(7).await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.index, 0);
    assert!(!activated_since(&mut events));

    handle.jump_to(1).await.unwrap();
    assert_eq!(next_activation(&mut events).await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_regenerate_replaces_batch() {
    let (handle, mut events) = started(TWO_REELS).await;

    tokio::time::sleep(Duration::from_millis(2000)).await;
    handle.set_input("Alpha. Beta. Gamma.").await.unwrap();
    handle.regenerate_seeded(2).await.unwrap();
    let regenerated = Instant::now();

    loop {
        match events.recv().await.unwrap() {
            PlaybackEvent::BatchGenerated { reels } => {
                assert_eq!(reels, 3);
                break;
            }
            PlaybackEvent::Progress { .. } => {}
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(next_activation(&mut events).await, 0);
    assert_eq!(next_activation(&mut events).await, 1);
    assert_about(regenerated.elapsed(), REEL_CYCLE);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.reels.len(), 3);
    assert_eq!(snapshot.current().unwrap().content(), "Beta.");
}

#[tokio::test(start_paused = true)]
async fn test_reset_stops_playback() {
    let (handle, mut events) = started(TWO_REELS).await;

    handle.reset().await.unwrap();
    loop {
        match events.recv().await.unwrap() {
            PlaybackEvent::Cleared => break,
            PlaybackEvent::Progress { .. } => {}
            other => panic!("unexpected event {other:?}"),
        }
    }

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.reels.is_empty());
    assert_eq!(snapshot.index, 0);
    assert!(!snapshot.playing);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_on_empty_batch_schedules_nothing() {
    let (handle, _task) = PlaybackController::spawn(PlaybackConfig::default());
    let mut events = handle.subscribe();

    handle.toggle_play().await.unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        PlaybackEvent::PlayToggled { playing: true }
    );
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_controller() {
    let (handle, task) = PlaybackController::spawn(PlaybackConfig::default());
    handle.set_input(TWO_REELS).await.unwrap();
    handle.regenerate().await.unwrap();

    handle.shutdown().await.unwrap();
    task.await.unwrap();

    assert!(handle.snapshot().await.is_err());
    assert!(handle.toggle_play().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_custom_timing() {
    let config = PlaybackConfig {
        tick_interval_ms: 500,
        advance_delay_ms: 0,
    };
    let (handle, _task) = PlaybackController::spawn(config);
    let mut events = handle.subscribe();
    handle.set_input(TWO_REELS).await.unwrap();
    handle.regenerate().await.unwrap();
    let start = Instant::now();

    assert_eq!(next_activation(&mut events).await, 0);
    assert_eq!(next_activation(&mut events).await, 1);
    // 3.5s rounds up to 7 ticks of 500ms.
    assert_about(start.elapsed(), Duration::from_millis(3500));
}

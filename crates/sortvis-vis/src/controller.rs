//! Shared playback controller driving the auto-advance task.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sortvis_steps::{Frame, FrameSequence, Mark};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::playback::{Playback, PlaybackCommand, PlaybackState, PlaybackStatus, TimerDirective};
use crate::timer::AutoAdvance;

/// Buffered updates per subscriber before it starts lagging.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// What a renderer needs after any state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackUpdate {
    pub status: PlaybackStatus,
    pub frame: Frame,
    /// Highlight of each bar in `frame`, in array order.
    pub marks: Vec<Mark>,
}

impl From<&Playback> for PlaybackUpdate {
    fn from(playback: &Playback) -> Self {
        let frame = playback.current();
        Self {
            status: playback.status(),
            marks: frame.marks(),
            frame: frame.clone(),
        }
    }
}

/// Playback state and its timer, locked together so a command and the
/// timer change it implies are applied atomically.
struct Inner {
    playback: Playback,
    timer: AutoAdvance,
}

/// The single owner of playback state.
pub struct Controller {
    inner: RwLock<Inner>,
    updates: broadcast::Sender<PlaybackUpdate>,
}

impl Controller {
    /// Create a stopped controller around `playback`.
    pub fn new(playback: Playback) -> Arc<Self> {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Arc::new(Self {
            inner: RwLock::new(Inner {
                playback,
                timer: AutoAdvance::new(),
            }),
            updates,
        })
    }

    /// Apply a command and publish the resulting update.
    pub async fn dispatch(self: &Arc<Self>, command: PlaybackCommand) -> PlaybackStatus {
        let mut inner = self.inner.write().await;
        let directive = inner.playback.apply(command);
        debug!(?command, ?directive, frame = inner.playback.current_frame(), "playback command");

        match directive {
            TimerDirective::Start(period) => {
                // The task must not keep the controller alive on its own.
                let controller = Arc::downgrade(self);
                inner.timer.start(period, move || {
                    let controller = controller.clone();
                    async move {
                        match controller.upgrade() {
                            Some(controller) => controller.tick().await,
                            None => false,
                        }
                    }
                });
            }
            TimerDirective::Cancel => inner.timer.cancel(),
            TimerDirective::Keep => {}
        }

        // Publish under the lock so subscribers see updates in apply order.
        let update = PlaybackUpdate::from(&inner.playback);
        let status = update.status.clone();
        self.publish(update);
        status
    }

    /// One auto-advance step. Returns whether the task should keep running.
    async fn tick(&self) -> bool {
        let mut inner = self.inner.write().await;
        let directive = inner.playback.apply(PlaybackCommand::Tick);
        let update = PlaybackUpdate::from(&inner.playback);

        if directive == TimerDirective::Cancel {
            debug!(frame = update.status.current_frame, "auto-advance finished");
        }
        self.publish(update);
        directive == TimerDirective::Keep
    }

    fn publish(&self, update: PlaybackUpdate) {
        // No subscribers is not an error.
        let _ = self.updates.send(update);
    }

    /// Receive every update from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackUpdate> {
        self.updates.subscribe()
    }

    /// Get the current playback status.
    pub async fn status(&self) -> PlaybackStatus {
        self.inner.read().await.playback.status()
    }

    /// Get a copy of the raw playback state.
    pub async fn state(&self) -> PlaybackState {
        *self.inner.read().await.playback.state()
    }

    /// Status plus the frame being displayed.
    pub async fn snapshot(&self) -> PlaybackUpdate {
        PlaybackUpdate::from(&self.inner.read().await.playback)
    }

    /// Get the frame being displayed.
    pub async fn current_frame(&self) -> Frame {
        self.inner.read().await.playback.current().clone()
    }

    /// The full active trace.
    pub async fn frames(&self) -> FrameSequence {
        self.inner.read().await.playback.frames().clone()
    }

    /// Whether an auto-advance task is running.
    pub async fn is_advancing(&self) -> bool {
        self.inner.read().await.timer.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{StepDirection, DEFAULT_SPEED_MS};
    use sortvis_steps::{Algorithm, DEFAULT_INPUT};
    use std::time::Duration;

    fn controller() -> Arc<Controller> {
        Controller::new(Playback::new(&DEFAULT_INPUT, Algorithm::Bubble, DEFAULT_SPEED_MS))
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn play_advances_on_timer() {
        let controller = controller();
        let status = controller.dispatch(PlaybackCommand::Play).await;
        assert!(status.is_playing);

        sleep_ms(1600).await;
        assert_eq!(controller.status().await.current_frame, 3);
        assert!(controller.is_advancing().await);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_timer() {
        let controller = controller();
        controller.dispatch(PlaybackCommand::Play).await;
        sleep_ms(1100).await;

        let status = controller.dispatch(PlaybackCommand::Pause).await;
        assert_eq!(status.current_frame, 2);
        assert!(!controller.is_advancing().await);

        sleep_ms(2000).await;
        assert_eq!(controller.status().await.current_frame, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_play_keeps_one_timer() {
        let controller = controller();
        controller.dispatch(PlaybackCommand::Play).await;
        sleep_ms(250).await;
        controller.dispatch(PlaybackCommand::Play).await;

        // Restarted at 250ms: ticks at 750ms and 1250ms only.
        sleep_ms(1100).await;
        assert_eq!(controller.status().await.current_frame, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn playback_stops_at_final_frame() {
        let controller = controller();
        let last = controller.frames().await.last_index();
        controller.dispatch(PlaybackCommand::Seek { frame: last - 2 }).await;
        controller.dispatch(PlaybackCommand::Play).await;

        sleep_ms(5000).await;
        let status = controller.status().await;
        assert_eq!(status.current_frame, last);
        assert!(!status.is_playing);
        assert!(!controller.is_advancing().await);

        let status = controller.dispatch(PlaybackCommand::Play).await;
        assert_eq!(status.current_frame, 0);
        assert!(status.is_playing);
    }

    #[tokio::test(start_paused = true)]
    async fn select_algorithm_cancels_timer() {
        let controller = controller();
        controller.dispatch(PlaybackCommand::Play).await;
        sleep_ms(1100).await;

        let status = controller
            .dispatch(PlaybackCommand::SelectAlgorithm { algorithm: Algorithm::Insertion })
            .await;
        assert_eq!(status.current_frame, 0);
        assert!(!status.is_playing);
        assert!(!controller.is_advancing().await);

        sleep_ms(2000).await;
        assert_eq!(controller.status().await.current_frame, 0);
        assert_eq!(
            controller.current_frame().await.description,
            "Starting insertion sort with array [5, 3, 8, 4, 2]"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_ticks() {
        let controller = controller();
        let mut updates = controller.subscribe();

        controller.dispatch(PlaybackCommand::Play).await;
        let first = updates.recv().await.unwrap();
        assert_eq!(first.status.current_frame, 0);
        assert!(first.status.is_playing);

        let tick = updates.recv().await.unwrap();
        assert_eq!(tick.status.current_frame, 1);
        assert_eq!(tick.frame.comparing, Some(vec![0, 1]));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_tick_advances_one_frame() {
        let controller = controller();
        controller.dispatch(PlaybackCommand::Play).await;
        sleep_ms(400).await;

        {
            // Holds the lock across the 500ms, 1000ms and 1500ms deadlines.
            let _guard = controller.inner.write().await;
            sleep_ms(1600).await;
        }

        sleep_ms(1).await;
        assert_eq!(controller.status().await.current_frame, 1);

        sleep_ms(500).await;
        assert_eq!(controller.status().await.current_frame, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn last_broadcast_matches_final_state() {
        let controller = controller();
        let mut updates = controller.subscribe();

        let tasks: Vec<_> = (0..40)
            .map(|i| {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move {
                    let command = if i % 2 == 0 {
                        PlaybackCommand::Seek { frame: i }
                    } else {
                        PlaybackCommand::Step { direction: StepDirection::Forward }
                    };
                    controller.dispatch(command).await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let mut last = None;
        loop {
            match updates.try_recv() {
                Ok(update) => last = Some(update),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        assert_eq!(last, Some(controller.snapshot().await));
    }

    #[tokio::test]
    async fn update_carries_bar_marks() {
        let controller = controller();
        let update = controller
            .dispatch(PlaybackCommand::Step { direction: StepDirection::Forward })
            .await;
        assert_eq!(update.current_frame, 1);

        let snapshot = controller.snapshot().await;
        assert_eq!(
            snapshot.marks,
            vec![Mark::Comparing, Mark::Comparing, Mark::Idle, Mark::Idle, Mark::Idle]
        );
    }

    #[tokio::test]
    async fn manual_steps_are_clamped() {
        let controller = controller();
        let back = PlaybackCommand::Step { direction: StepDirection::Backward };

        let status = controller.dispatch(back).await;
        assert_eq!(status.current_frame, 0);
        assert!(!status.can_step_backward);

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.frame.array, DEFAULT_INPUT);
        assert_eq!(controller.state().await.algorithm, Algorithm::Bubble);
    }
}

//! Scoped tick driver.
//!
//! [`TimerService`] owns a [`SessionTimer`] and the one repeating timer that
//! drives it: a single 1 s `tokio` interval task, armed when the countdown
//! starts and aborted on pause, reset, and teardown. The handle is held by
//! the service and every arming path aborts the previous handle first, so at
//! most one ticker is ever alive per instance -- there is no way to leak a
//! dangling timer past the service's lifetime.
//!
//! Events fan out on a broadcast channel; subscribers are pushed every state
//! change and never poll.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

use crate::events::Event;
use crate::timer::session::SessionTimer;

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct TimerService {
    timer: Arc<Mutex<SessionTimer>>,
    events: broadcast::Sender<Event>,
    ticker: Option<JoinHandle<()>>,
}

impl TimerService {
    pub fn new(timer: SessionTimer) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            timer: Arc::new(Mutex::new(timer)),
            events,
            ticker: None,
        }
    }

    /// Receive every event from here on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> Event {
        self.lock().snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.lock().remaining_secs()
    }

    /// Start the countdown and arm the ticker.
    pub fn start(&mut self) -> Option<Event> {
        let event = self.lock().start()?;
        self.arm();
        self.emit(&event);
        Some(event)
    }

    /// Cancel the pending tick, then stop the countdown.
    pub fn pause(&mut self) -> Option<Event> {
        self.disarm();
        let event = self.lock().pause()?;
        self.emit(&event);
        Some(event)
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Manual adjustment. Runs under the same lock as the ticker, so the
    /// update is atomic with respect to in-flight ticks; the schedule itself
    /// is left alone.
    pub fn adjust_by(&mut self, delta_secs: i64) -> Option<Event> {
        let event = self.lock().adjust_by(delta_secs)?;
        self.emit(&event);
        Some(event)
    }

    /// Cancel the pending tick, then reload the current phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.disarm();
        let event = self.lock().reset()?;
        self.emit(&event);
        Some(event)
    }

    /// Cancel the pending tick, then clear countdown and cycle progress.
    pub fn reset_cycle(&mut self) -> Option<Event> {
        self.disarm();
        let event = self.lock().reset_cycle()?;
        self.emit(&event);
        Some(event)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm(&mut self) {
        self.disarm();
        let timer = Arc::clone(&self.timer);
        let events = self.events.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The zeroth tick resolves immediately; consume it so the first
            // decrement lands one full second after arming.
            interval.tick().await;
            loop {
                interval.tick().await;
                let batch = {
                    let mut timer = timer.lock().unwrap_or_else(PoisonError::into_inner);
                    timer.tick()
                };
                let mut phase_done = batch.is_empty();
                for event in batch {
                    if matches!(event, Event::PhaseCompleted { .. }) {
                        phase_done = true;
                    }
                    let _ = events.send(event);
                }
                // The countdown stopped (completion, or a pause that beat the
                // abort): this ticker has nothing left to drive.
                if phase_done {
                    break;
                }
            }
        }));
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    fn emit(&self, event: &Event) {
        let _ = self.events.send(event.clone());
    }

    fn lock(&self) -> MutexGuard<'_, SessionTimer> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::cycle::CycleDurations;
    use crate::timer::Phase;

    fn service(focus_secs: u64) -> TimerService {
        TimerService::new(SessionTimer::new(CycleDurations {
            focus_secs,
            ..CycleDurations::default()
        }))
    }

    fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn full_phase_produces_ordered_events() {
        let mut service = service(5);
        let mut rx = service.subscribe();

        service.start();
        time::sleep(Duration::from_secs(6)).await;

        let events = drain(&mut rx);
        let ticks: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                Event::Tick { remaining_secs, .. } => Some(*remaining_secs),
                _ => None,
            })
            .collect();
        let near: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                Event::NearCompletion { remaining_secs, .. } => Some(*remaining_secs),
                _ => None,
            })
            .collect();
        let completions = events
            .iter()
            .filter(|e| matches!(e, Event::PhaseCompleted { .. }))
            .count();

        assert_eq!(ticks, vec![4, 3, 2, 1, 0]);
        assert_eq!(near, vec![3, 2, 1]);
        assert_eq!(completions, 1);
        assert!(!service.is_running());
        assert_eq!(service.remaining_secs(), 300);

        // The ticker retired with the completion; time passing changes nothing.
        time::sleep(Duration::from_secs(30)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_announces_the_new_break_phase() {
        let mut service = service(2);
        let mut rx = service.subscribe();

        service.start();
        time::sleep(Duration::from_secs(3)).await;

        let completed = drain(&mut rx).into_iter().find_map(|e| match e {
            Event::PhaseCompleted {
                now_is_break,
                phase,
                completed_focus_sessions,
                ..
            } => Some((now_is_break, phase, completed_focus_sessions)),
            _ => None,
        });
        assert_eq!(completed, Some((true, Phase::ShortBreak, 1)));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_the_pending_tick() {
        let mut service = service(60);
        service.start();
        time::sleep(Duration::from_millis(2500)).await;
        service.pause();
        let frozen = service.remaining_secs();
        assert_eq!(frozen, 58);

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(service.remaining_secs(), frozen, "no ticks after pause");
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_keeps_a_single_ticker() {
        let mut service = service(60);
        let mut rx = service.subscribe();

        assert!(service.start().is_some());
        assert!(service.start().is_none());
        time::sleep(Duration::from_millis(1500)).await;

        let ticks = drain(&mut rx)
            .iter()
            .filter(|e| matches!(e, Event::Tick { .. }))
            .count();
        assert_eq!(ticks, 1, "one second, one tick");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_stops_and_reloads() {
        let mut service = service(60);
        service.start();
        time::sleep(Duration::from_secs(5)).await;
        service.reset();

        assert!(!service.is_running());
        assert_eq!(service.remaining_secs(), 60);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(service.remaining_secs(), 60, "reset disarmed the ticker");
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_the_ticker() {
        let mut rx = {
            let mut service = service(60);
            let rx = service.subscribe();
            service.start();
            rx
        };
        // Service dropped: the sender side is gone once the ticker aborts.
        time::sleep(Duration::from_secs(2)).await;
        loop {
            match rx.try_recv() {
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(broadcast::error::TryRecvError::Closed) => break,
                Err(broadcast::error::TryRecvError::Empty) => {
                    panic!("ticker survived service teardown")
                }
            }
        }
    }
}

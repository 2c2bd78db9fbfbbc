//! Countdown controller: the Pomodoro state machine

use std::time::Duration;
use tracing::{debug, info};

use super::{display::DisplaySink, driver::TickDriver};
use crate::{
    services::notifier::{Notification, NotificationSink},
    state::timer_state::{format_mm_ss, Durations, Phase, TimerMode, TimerSnapshot, TimerState},
};

/// Interval between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Message emitted when a single countdown runs out
pub const DONE_MESSAGE: &str = "Time's up!";
/// Message emitted when a cycle enters the break phase
pub const BREAK_MESSAGE: &str = "Break Time!";
/// Message emitted when a cycle returns to the work phase
pub const WORK_MESSAGE: &str = "Work Time!";

/// Owns a [`TimerState`] and drives it from ticks
pub struct CountdownController {
    state: TimerState,
    generation: u64,
    driver: Box<dyn TickDriver>,
    display: Box<dyn DisplaySink>,
    notifier: Box<dyn NotificationSink>,
}

impl CountdownController {
    /// Create an idle controller and render its initial display
    pub fn new(
        durations: Durations,
        mode: TimerMode,
        driver: Box<dyn TickDriver>,
        display: Box<dyn DisplaySink>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        let controller = Self {
            state: TimerState::new(durations, mode),
            generation: 0,
            driver,
            display,
            notifier,
        };
        controller.render();
        controller
    }

    /// Start ticking. Does nothing if already running.
    pub fn start(&mut self) -> bool {
        if self.state.is_running {
            debug!("Start requested while running, ignoring");
            return false;
        }

        if self.state.remaining_seconds == 0 {
            // A finished single countdown starts over
            self.state.remaining_seconds = self.state.durations.for_phase(self.state.phase);
            self.render();
        }

        self.generation += 1;
        self.driver.begin(self.generation, TICK_PERIOD);
        self.state.is_running = true;
        debug_assert_eq!(self.driver.is_active(), self.state.is_running);
        info!(
            "Timer started: {} phase, {} remaining",
            self.state.phase.as_str(),
            self.format_display()
        );
        true
    }

    /// Pause ticking, keeping the remaining time
    pub fn stop(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }
        self.cancel_driver();
        info!("Timer stopped at {}", self.format_display());
        true
    }

    /// Cancel any driver and return to an idle work phase
    pub fn reset(&mut self) {
        self.cancel_driver();
        self.state.reset();
        self.render();
        info!("Timer reset to {}", self.format_display());
    }

    /// Apply a tick from the driver registered under `generation`.
    /// Ticks from an earlier registration are dropped.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping stale tick (generation {}, current {})",
                generation, self.generation
            );
            return false;
        }
        self.tick()
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running {
            debug!("Tick while stopped, ignoring");
            return false;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.expire();
        }
        self.render();
        true
    }

    /// Render the remaining time as `MM:SS`
    pub fn format_display(&self) -> String {
        format_mm_ss(self.state.remaining_seconds)
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from(&self.state)
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Generation of the most recent driver registration
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn expire(&mut self) {
        match self.state.mode {
            TimerMode::Single => {
                self.cancel_driver();
                info!("Countdown finished");
                self.notifier.emit(Notification::timer(DONE_MESSAGE));
            }
            TimerMode::Cycle => {
                let message = match self.state.advance_phase() {
                    Phase::Break => BREAK_MESSAGE,
                    Phase::Work => WORK_MESSAGE,
                };
                info!("Phase changed to {}", self.state.phase.as_str());
                self.notifier.emit(Notification::timer(message));
            }
        }
    }

    fn cancel_driver(&mut self) {
        self.driver.cancel();
        self.state.is_running = false;
        debug_assert_eq!(self.driver.is_active(), self.state.is_running);
    }

    /// Whether the tick driver currently has a registration
    pub fn driver_active(&self) -> bool {
        self.driver.is_active()
    }

    fn render(&self) {
        self.display.set_text(&self.format_display());
    }
}

impl std::fmt::Debug for CountdownController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Default work phase length in minutes
pub const DEFAULT_WORK_MINUTES: u64 = 25;
/// Default break phase length in minutes
pub const DEFAULT_BREAK_MINUTES: u64 = 5;

/// Countdown phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// The phase that follows this one in a cycle
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

/// Timer variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// One work countdown that stops and signals "done" on expiry
    Single,
    /// Alternates work and break phases until reset
    Cycle,
}

/// Phase durations, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work_seconds: u64,
    pub break_seconds: u64,
}

impl Durations {
    /// Create durations from seconds, rejecting empty phases
    pub fn new(work_seconds: u64, break_seconds: u64) -> Result<Self, String> {
        if work_seconds == 0 {
            return Err("Work duration must be at least one second".to_string());
        }
        if break_seconds == 0 {
            return Err("Break duration must be at least one second".to_string());
        }
        Ok(Self {
            work_seconds,
            break_seconds,
        })
    }

    /// Create durations from whole minutes
    pub fn from_minutes(work_minutes: u64, break_minutes: u64) -> Result<Self, String> {
        let work_seconds = work_minutes
            .checked_mul(60)
            .ok_or_else(|| "Work duration is too long".to_string())?;
        let break_seconds = break_minutes
            .checked_mul(60)
            .ok_or_else(|| "Break duration is too long".to_string())?;
        Self::new(work_seconds, break_seconds)
    }

    /// Configured length of a phase in seconds
    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::Break => self.break_seconds,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_MINUTES * 60,
            break_seconds: DEFAULT_BREAK_MINUTES * 60,
        }
    }
}

/// Mutable countdown state owned by a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub phase: Phase,
    pub is_running: bool,
    pub durations: Durations,
    pub mode: TimerMode,
}

impl TimerState {
    /// Create an idle timer at the start of a work phase
    pub fn new(durations: Durations, mode: TimerMode) -> Self {
        Self {
            remaining_seconds: durations.work_seconds,
            phase: Phase::Work,
            is_running: false,
            durations,
            mode,
        }
    }

    /// Restore the idle work-phase state, keeping configuration
    pub fn reset(&mut self) {
        self.remaining_seconds = self.durations.work_seconds;
        self.phase = Phase::Work;
        self.is_running = false;
    }

    /// Switch to the next phase and reload its duration
    pub fn advance_phase(&mut self) -> Phase {
        self.phase = self.phase.next();
        self.remaining_seconds = self.durations.for_phase(self.phase);
        self.phase
    }
}

/// Render seconds as zero-padded `MM:SS`
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Serializable view of a timer for API consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub running: bool,
    pub display: String,
    pub mode: TimerMode,
    pub durations: Durations,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            running: state.is_running,
            display: format_mm_ss(state.remaining_seconds),
            mode: state.mode,
            durations: state.durations,
        }
    }
}

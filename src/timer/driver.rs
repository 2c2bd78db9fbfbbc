//! Tick drivers: the "schedule repeating tick / cancel" capability

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, trace};

/// A tick emitted by a driver, tagged with the registration it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Something that can deliver periodic ticks until cancelled
pub trait TickDriver: Send {
    /// Start delivering ticks tagged with `generation` every `period`
    fn begin(&mut self, generation: u64, period: Duration);

    /// Stop delivering ticks. Must take effect before returning.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

/// Driver backed by a tokio interval task feeding a tick channel
#[derive(Debug)]
pub struct TokioTickDriver {
    tick_tx: mpsc::UnboundedSender<Tick>,
    handle: Option<JoinHandle<()>>,
}

impl TokioTickDriver {
    /// Create a driver together with the receiving end of its tick channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        (
            Self {
                tick_tx,
                handle: None,
            },
            tick_rx,
        )
    }
}

impl TickDriver for TokioTickDriver {
    fn begin(&mut self, generation: u64, period: Duration) {
        self.cancel();

        let tick_tx = self.tick_tx.clone();
        debug!("Registering tick driver generation {}", generation);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; a countdown should not
            // decrement at the moment it is started.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                trace!("Tick for generation {}", generation);
                if tick_tx.send(Tick { generation }).is_err() {
                    debug!("Tick receiver dropped, stopping driver");
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Tick driver cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TokioTickDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Observations recorded by a [`ManualTickDriver`]
#[derive(Debug, Default)]
pub struct ManualDriverLog {
    pub begins: Vec<(u64, Duration)>,
    pub cancels: usize,
    /// Number of drivers currently registered
    pub active: usize,
    /// Highest number of drivers ever registered at the same time
    pub max_active: usize,
}

/// Driver that never fires on its own; callers advance time by calling
/// the controller's tick entry points directly.
///
/// Every `begin` counts as a fresh registration, like a browser interval,
/// so a controller that forgets to guard against double starts shows up
/// as `max_active > 1`.
#[derive(Debug, Clone, Default)]
pub struct ManualTickDriver {
    log: Arc<Mutex<ManualDriverLog>>,
}

impl ManualTickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared log, readable after the driver has been moved into a controller
    pub fn log(&self) -> Arc<Mutex<ManualDriverLog>> {
        Arc::clone(&self.log)
    }
}

impl TickDriver for ManualTickDriver {
    fn begin(&mut self, generation: u64, period: Duration) {
        if let Ok(mut log) = self.log.lock() {
            log.begins.push((generation, period));
            log.active += 1;
            log.max_active = log.max_active.max(log.active);
        }
    }

    fn cancel(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            if log.active > 0 {
                log.cancels += 1;
                log.active -= 1;
            }
        }
    }

    fn is_active(&self) -> bool {
        self.log.lock().map(|log| log.active > 0).unwrap_or(false)
    }
}

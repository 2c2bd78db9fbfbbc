//! Configuration and CLI argument handling

use std::sync::Arc;
use clap::{Parser, ValueEnum};

use crate::{
    services::{
        DesktopNotifier, DisabledNotifier, LogNotifier, NotificationService, Permission,
        PromptedNotifier,
    },
    state::{timer_state::{DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES}, Durations, TimerMode},
};

/// Where timer notifications are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierKind {
    /// Desktop notification daemon
    Desktop,
    /// Log lines only
    Log,
    /// No notification support; every notification becomes an alert
    Off,
}

/// Answer given when the notifier first asks for permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PermissionAnswer {
    Allow,
    Deny,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tomato-clock")]
#[command(about = "A state-managed HTTP service hosting a Pomodoro countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Work phase duration in minutes
    #[arg(short, long, default_value_t = DEFAULT_WORK_MINUTES)]
    pub work: u64,

    /// Break phase duration in minutes
    #[arg(short = 'b', long = "break", default_value_t = DEFAULT_BREAK_MINUTES)]
    pub break_minutes: u64,

    /// Timer variant: one countdown, or alternating work and break phases
    #[arg(short, long, value_enum, default_value_t = TimerMode::Cycle)]
    pub mode: TimerMode,

    /// Notification backend
    #[arg(short, long, value_enum, default_value_t = NotifierKind::Desktop)]
    pub notifier: NotifierKind,

    /// Answer to the first notification permission prompt
    #[arg(long, value_enum, default_value_t = PermissionAnswer::Allow)]
    pub permission: PermissionAnswer,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validated phase durations
    pub fn durations(&self) -> Result<Durations, String> {
        Durations::from_minutes(self.work, self.break_minutes)
    }

    /// Build the configured notification service
    pub fn notification_service(&self) -> Arc<dyn NotificationService> {
        let answer = match self.permission {
            PermissionAnswer::Allow => Permission::Granted,
            PermissionAnswer::Deny => Permission::Denied,
        };

        match self.notifier {
            NotifierKind::Desktop => Arc::new(PromptedNotifier::new(DesktopNotifier, answer)),
            NotifierKind::Log => Arc::new(PromptedNotifier::new(LogNotifier, answer)),
            NotifierKind::Off => Arc::new(DisabledNotifier),
        }
    }
}

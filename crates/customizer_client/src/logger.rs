use bevy::prelude::*;
use customizer_core::{LogLevel, LogPrinter};

/// Сообщения ядра → bevy log (tracing)
pub struct BevyLogger;

impl LogPrinter for BevyLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warning => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
    }
}

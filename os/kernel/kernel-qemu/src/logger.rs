use crate::port::{DebugPort, PortSink};
use core::fmt::{self, Write};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// [`Log`] implementation writing one `[LEVEL] target: message` line per record
/// to a debug port.
///
/// Lives in a `static` so it can be installed without an allocator:
///
/// ```rust,no_run
/// use kernel_qemu::QemuLogger;
/// use log::LevelFilter;
///
/// static LOGGER: QemuLogger = QemuLogger::new(LevelFilter::Debug);
/// LOGGER.init().expect("logger installed once");
/// ```
#[derive(Debug)]
pub struct QemuLogger {
    port: DebugPort,
    max_level: LevelFilter,
}

impl QemuLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self {
            port: DebugPort::DEFAULT,
            max_level,
        }
    }

    /// Log to `port` instead of [`DebugPort::DEFAULT`].
    #[must_use]
    pub const fn on_port(mut self, port: DebugPort) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub const fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Install as the global logger. Call once during early init.
    ///
    /// # Errors
    /// [`SetLoggerError`] if a logger was already installed.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

/// Format a record as a single debug console line.
pub(crate) fn write_record(out: &mut impl Write, record: &Record<'_>) -> fmt::Result {
    writeln!(out, "[{}] {}: {}", record.level(), record.target(), record.args())
}

impl Log for QemuLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Best effort; there is nowhere to report a failed debug write.
        let _ = write_record(&mut PortSink::new(self.port), record);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn record_line_format() {
        let mut out = String::new();
        write_record(
            &mut out,
            &Record::builder()
                .args(format_args!("PPSL: {}", 960))
                .level(Level::Info)
                .target("kernel::boot")
                .build(),
        )
        .expect("string write");
        assert_eq!(out, "[INFO] kernel::boot: PPSL: 960\n");
    }

    #[test]
    fn level_filtering() {
        let logger = QemuLogger::new(LevelFilter::Info).on_port(DebugPort::DebugCon);
        let debug = Metadata::builder().level(Level::Debug).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&error));
        assert_eq!(logger.max_level(), LevelFilter::Info);
    }
}

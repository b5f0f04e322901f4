use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Writes every enabled record to stderr, keeping stdout for the board.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr().lock(),
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    log::set_logger(&LOGGER).map_err(|err| anyhow::anyhow!("Error initializing logger: {}", err))?;
    log::set_max_level(level);
    Ok(())
}

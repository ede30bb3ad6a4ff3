use crate::error::HarvestError;
use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Copies every log line to the log file and to stdout
struct Tee {
    file: File,
    stdout: io::Stdout,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        self.stdout.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.stdout.flush()
    }
}

/// Initializes the global logger: `timestamp - LEVEL - message` lines,
/// appended to `log_path` and echoed to stdout. `RUST_LOG` overrides the
/// default `info` level.
pub fn init(log_path: impl AsRef<Path>) -> Result<(), HarvestError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(Tee {
            file,
            stdout: io::stdout(),
        })))
        .try_init()
        .map_err(|e| HarvestError::Logger(e.to_string()))
}

//! Conversion timings and the debug event log.
//!
//! With `--perf`, each command phase reports its duration through `tracing`
//! under the `micronize::perf` target. With `--debug-log`, conversion and
//! watcher events are appended to a file, one line each, stamped with the
//! time since the log was opened.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

static TIMINGS: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: Mutex<Option<EventLog>> = Mutex::new(None);

struct EventLog {
    opened: Instant,
    writer: BufWriter<File>,
}

/// A timed command phase. Reports on drop when timings are enabled.
#[derive(Debug)]
pub struct Phase {
    name: &'static str,
    start: Instant,
}

impl Phase {
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Phase {
    fn drop(&mut self) {
        if timings_enabled() {
            tracing::info!(
                target: "micronize::perf",
                phase = self.name,
                elapsed_ms = millis(self.elapsed()),
                "phase finished"
            );
        }
    }
}

pub fn enable_timings(enabled: bool) {
    TIMINGS.store(enabled, Ordering::Relaxed);
}

pub fn timings_enabled() -> bool {
    TIMINGS.load(Ordering::Relaxed)
}

pub fn phase(name: &'static str) -> Phase {
    Phase {
        name,
        start: Instant::now(),
    }
}

/// Milliseconds with fractional part, for log fields.
pub fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Start appending events to `path`, replacing any log already open.
///
/// # Errors
/// Returns an error if the file cannot be created or the header written.
pub fn open_event_log(path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "micronize {} event log", env!("CARGO_PKG_VERSION"))?;
    writer.flush()?;
    let log = EventLog {
        opened: Instant::now(),
        writer,
    };
    *EVENT_LOG.lock().unwrap_or_else(PoisonError::into_inner) = Some(log);
    Ok(())
}

/// Append one event line if a log is open. Write failures are ignored.
pub fn log_event(name: &str, detail: impl Display) {
    let mut guard = EVENT_LOG.lock().unwrap_or_else(PoisonError::into_inner);
    let Some(log) = guard.as_mut() else {
        return;
    };
    let at = millis(log.opened.elapsed());
    let _ = writeln!(log.writer, "[{at:>10.3} ms] {name}: {detail}");
    let _ = log.writer.flush();
}

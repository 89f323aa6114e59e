use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    sync::Mutex,
};

use crate::trace::trace::TraceEvent;

/// JSON-lines sink for controller decisions.
///
/// Tracing is best effort: a trace file that cannot be opened disables the
/// logger, and a failed write drops that one event. Both print a warning on
/// stderr and never reach the controller.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    /// Append to `path`, creating it if needed.
    pub fn new(path: &str) -> Self {
        let sink = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Mutex::new(file)),
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                None
            }
        };

        Self { sink }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(e) = write_event(sink, event) {
            eprintln!(
                "Warning: dropped trace event (step {}, {}): {}",
                event.step, event.phase, e
            );
        }
    }
}

fn write_event(sink: &Mutex<File>, event: &TraceEvent) -> io::Result<()> {
    let line = serde_json::to_string(event).map_err(io::Error::other)?;
    let mut file = sink
        .lock()
        .map_err(|_| io::Error::other("trace file lock poisoned"))?;
    writeln!(file, "{}", line)
}

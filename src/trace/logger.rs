use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::warn;

use crate::trace::trace::TraceEvent;

/// Progress trace sink for a `ProgressEvaluator`.
///
/// Each applied action becomes one JSON line, skipped actions included, so a
/// failed run can be replayed step by step next to the host's own logs.
/// Several evaluators may share one file; lines are appended, never
/// rewritten. A trace that can't be opened or written only costs a warning:
/// scenario evaluation never fails because of its trace.
pub struct TraceLogger {
    sink: Option<Sink>,
}

struct Sink {
    path: PathBuf,
    file: Mutex<File>,
    written: Mutex<u64>,
}

impl TraceLogger {
    /// Append to the trace at `path`, creating the file if needed.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(Sink {
                    path: path.to_path_buf(),
                    file: Mutex::new(file),
                    written: Mutex::new(0),
                }),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "progress trace disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Trace file in use, if any.
    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|s| s.path.as_path())
    }

    /// Events written by this logger since it was opened.
    pub fn events_written(&self) -> u64 {
        self.sink
            .as_ref()
            .and_then(|s| s.written.lock().ok().map(|n| *n))
            .unwrap_or(0)
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                warn!(step = event.step, error = %e, "unserializable progress event");
                return;
            }
        };

        let Ok(mut file) = sink.file.lock() else {
            warn!(step = event.step, "progress trace lock poisoned");
            return;
        };
        if let Err(e) = writeln!(file, "{}", json) {
            warn!(step = event.step, path = %sink.path.display(), error = %e, "progress event not written");
            return;
        }
        if let Ok(mut written) = sink.written.lock() {
            *written += 1;
        }
    }
}

impl std::fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceLogger")
            .field("path", &self.path())
            .field("events_written", &self.events_written())
            .finish()
    }
}

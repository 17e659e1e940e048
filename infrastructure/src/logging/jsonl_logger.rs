//! Per-execution JSONL event log.
//!
//! A log file opens with a `log_opened` header naming its execution, then
//! holds one line per [`RunEvent`]. Every line carries a `seq` that restarts
//! at 0 with each header, so appended runs of the same execution stay apart.

use arena_application::{RunEvent, RunEventLogger};
use arena_domain::ExecutionId;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Serialize)]
struct Header<'a> {
    seq: u64,
    timestamp: String,
    #[serde(rename = "type")]
    kind: &'static str,
    execution_id: &'a ExecutionId,
}

#[derive(Serialize)]
struct EventLine<'a> {
    seq: u64,
    timestamp: String,
    #[serde(flatten)]
    event: &'a RunEvent,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

struct Sink {
    writer: BufWriter<File>,
    next_seq: u64,
    dropped: u64,
}

impl Sink {
    fn write_line(&mut self, line: &impl Serialize) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Appends an execution's [`RunEvent`]s to a JSONL file
pub struct JsonlRunEventLogger {
    sink: Mutex<Sink>,
    path: PathBuf,
    execution_id: ExecutionId,
}

impl JsonlRunEventLogger {
    /// Open `path` for appending and write the header line.
    ///
    /// Returns `None` (after a warning) when the directory, the file or the
    /// header cannot be written; the execution then runs without an event log.
    pub fn open(path: impl AsRef<Path>, execution_id: &ExecutionId) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        let mut sink = Sink {
            writer: BufWriter::new(file),
            next_seq: 1,
            dropped: 0,
        };
        let header = Header {
            seq: 0,
            timestamp: now(),
            kind: "log_opened",
            execution_id,
        };
        if let Err(e) = sink.write_line(&header) {
            warn!("Could not write event log header to {}: {}", path.display(), e);
            return None;
        }

        debug!(path = %path.display(), execution_id = %execution_id, "Event log opened");
        Some(Self {
            sink: Mutex::new(sink),
            path: path.to_path_buf(),
            execution_id: execution_id.clone(),
        })
    }

    /// Logger for one execution: `<dir>/<execution_id>.events.jsonl`
    pub fn for_execution(dir: impl AsRef<Path>, execution_id: &ExecutionId) -> Option<Self> {
        Self::open(
            dir.as_ref().join(format!("{}.events.jsonl", execution_id)),
            execution_id,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunEventLogger for JsonlRunEventLogger {
    fn log(&self, event: RunEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            warn!(event = event.kind(), "Event log lock poisoned; event dropped");
            return;
        };

        let line = EventLine {
            seq: sink.next_seq,
            timestamp: now(),
            event: &event,
        };
        match sink.write_line(&line) {
            Ok(()) => sink.next_seq += 1,
            Err(e) => {
                sink.dropped += 1;
                // Once per logger; the count is reported when it closes
                if sink.dropped == 1 {
                    warn!(
                        path = %self.path.display(),
                        event = event.kind(),
                        "Could not write run event: {}",
                        e
                    );
                }
            }
        }
    }
}

impl Drop for JsonlRunEventLogger {
    fn drop(&mut self) {
        let Ok(sink) = self.sink.get_mut() else {
            return;
        };
        if let Err(e) = sink.writer.flush() {
            warn!("Could not flush event log {}: {}", self.path.display(), e);
        }
        if sink.dropped > 0 {
            warn!(
                execution_id = %self.execution_id,
                dropped = sink.dropped,
                "Event log is missing events"
            );
        }
    }
}

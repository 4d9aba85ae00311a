use super::persistence::FileWriter;
use super::types::{ActionEntry, ActionPayload};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(g) => g,
        Err(e) => e.into_inner(),
    }
}

#[derive(Debug)]
pub enum LogReadError {
    Io(std::io::Error),
    /// A line other than the last one does not parse.
    Corrupt { line: usize, message: String },
}

impl fmt::Display for LogReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogReadError::Io(e) => write!(f, "{}", e),
            LogReadError::Corrupt { line, message } => {
                write!(f, "line {} is corrupt: {}", line, message)
            }
        }
    }
}

impl std::error::Error for LogReadError {}

struct ParsedLog {
    entries: Vec<ActionEntry>,
    /// Byte length of the prefix holding `entries`.
    valid_len: usize,
}

fn parse_entries(contents: &str) -> Result<ParsedLog, LogReadError> {
    let mut entries = Vec::new();
    let mut offset = 0;
    let mut valid_len = 0;
    for (index, line) in contents.split_inclusive('\n').enumerate() {
        offset += line.len();
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ActionEntry>(line.trim()) {
            Ok(entry) => {
                entries.push(entry);
                valid_len = offset;
            }
            Err(e) => {
                if !contents[offset..].trim().is_empty() {
                    return Err(LogReadError::Corrupt {
                        line: index + 1,
                        message: e.to_string(),
                    });
                }
                break;
            }
        }
    }
    Ok(ParsedLog { entries, valid_len })
}

/// Append-only record of session inputs.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: Mutex<Vec<ActionEntry>>,
    seq: AtomicU64,
    writer: Mutex<Option<FileWriter>>,
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog::default()
    }

    /// Mirror every subsequent append to `writer`.
    pub fn set_writer(&self, writer: Option<FileWriter>) {
        *lock(&self.writer) = writer;
    }

    /// Flush and detach the file writer, if any.
    pub fn shutdown(&self) {
        if let Some(writer) = lock(&self.writer).take() {
            writer.close();
        }
    }

    /// Read a JSON-lines log written by `FileWriter`. A torn final line (a write
    /// cut short by a crash) is skipped; a bad line before it is an error.
    pub fn read_entries(path: &Path) -> Result<Vec<ActionEntry>, LogReadError> {
        let contents = fs::read_to_string(path).map_err(LogReadError::Io)?;
        Ok(parse_entries(&contents)?.entries)
    }

    /// Read the log at `path` and cut a torn final line off the file so later
    /// appends start on a clean line.
    pub fn recover(path: &Path) -> Result<Vec<ActionEntry>, LogReadError> {
        let contents = fs::read_to_string(path).map_err(LogReadError::Io)?;
        let parsed = parse_entries(&contents)?;
        let kept = &contents[..parsed.valid_len];
        let torn = !contents[kept.len()..].trim().is_empty();
        let needs_newline = !kept.is_empty() && !kept.ends_with('\n');
        if torn || needs_newline {
            let mut file = OpenOptions::new()
                .write(true)
                .open(path)
                .map_err(LogReadError::Io)?;
            if torn {
                log::warn!(
                    "dropping torn tail of action log {:?} after {} entries",
                    path,
                    parsed.entries.len()
                );
                file.set_len(kept.len() as u64).map_err(LogReadError::Io)?;
            }
            if needs_newline {
                file.seek(SeekFrom::End(0)).map_err(LogReadError::Io)?;
                file.write_all(b"\n").map_err(LogReadError::Io)?;
            }
        }
        Ok(parsed.entries)
    }

    /// Append an entry, assigning the next sequence number (starting at 1).
    pub fn append(&self, payload: ActionPayload) -> ActionEntry {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let timestamp = match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(dur) => format!("{}", dur.as_millis()),
            Err(_) => "0".to_string(),
        };
        let entry = ActionEntry {
            seq,
            action_type: payload.action_type().to_string(),
            payload,
            timestamp,
        };
        lock(&self.entries).push(entry.clone());
        if let Some(writer) = &*lock(&self.writer) {
            writer.send(entry.clone());
        }
        entry
    }

    /// Snapshot of all entries for replay or inspection.
    pub fn entries(&self) -> Vec<ActionEntry> {
        lock(&self.entries).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

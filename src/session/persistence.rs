use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use super::types::ActionEntry;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(g) => g,
        Err(e) => e.into_inner(),
    }
}

/// Appends action entries to a JSON-lines file from a background thread.
#[derive(Clone, Debug)]
pub struct FileWriter {
    // Optional so close() can drop the sender and end the writer loop.
    sender: Arc<Mutex<Option<Sender<ActionEntry>>>>,
    handle: Arc<Mutex<Option<thread::JoinHandle<()>>>>,
}

impl FileWriter {
    pub fn new(path: PathBuf) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let (tx, rx) = mpsc::channel::<ActionEntry>();
        let handle = thread::spawn(move || {
            let mut writer = BufWriter::new(file);
            for entry in rx {
                match serde_json::to_vec(&entry) {
                    Ok(mut bytes) => {
                        bytes.push(b'\n');
                        if let Err(e) = writer.write_all(&bytes).and_then(|_| writer.flush()) {
                            log::error!("action log write to {:?} failed: {}", path, e);
                        }
                    }
                    Err(e) => log::error!("action log entry {} not serializable: {}", entry.seq, e),
                }
            }
            let _ = writer.flush();
        });

        Ok(FileWriter {
            sender: Arc::new(Mutex::new(Some(tx))),
            handle: Arc::new(Mutex::new(Some(handle))),
        })
    }

    pub fn send(&self, entry: ActionEntry) {
        if let Some(tx) = &*lock(&self.sender) {
            let _ = tx.send(entry);
        }
    }

    /// Drop the sender and join the writer thread so pending entries reach disk.
    pub fn close(&self) {
        lock(&self.sender).take();
        let handle = lock(&self.handle).take();
        if let Some(h) = handle {
            let _ = h.join();
        }
    }
}

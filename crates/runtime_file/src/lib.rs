// crates/runtime_file/src/lib.rs
mod reader;

pub use reader::{FileReadError, encode_data_url, read_as_data_url, sniff_mime};

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use bus::{CoreCommand, CoreEvent};

/// Spawn the file-read worker. It runs until `Shutdown` or until every command sender drops.
pub fn start_file_runtime(cmd_rx: Receiver<CoreCommand>, evt_tx: Sender<CoreEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                CoreCommand::ReadFile {
                    request_id,
                    input,
                    file,
                } => {
                    log::trace!(target: "runtime_file", "read #{request_id} {:?}", file.name());
                    let evt = match read_as_data_url(&file) {
                        Ok(data_uri) => CoreEvent::FileRead {
                            request_id,
                            input,
                            data_uri,
                        },
                        Err(err) => {
                            log::warn!(target: "runtime_file", "read #{request_id} failed: {err}");
                            CoreEvent::FileReadFailed {
                                request_id,
                                input,
                                error: err.to_string(),
                            }
                        }
                    };
                    // The UI side may already be gone; nothing left to notify.
                    if evt_tx.send(evt).is_err() {
                        break;
                    }
                }
                CoreCommand::Shutdown => break,
            }
        }
    })
}

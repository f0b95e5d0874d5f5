use core_types::{RequestId, SelectedFile};
use html::Id;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug)]
pub enum CoreCommand {
    // UI -> file runtime
    ReadFile {
        request_id: RequestId,
        input: Id,
        file: SelectedFile,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    // File runtime -> UI
    FileRead {
        request_id: RequestId,
        input: Id,
        data_uri: String,
    },
    FileReadFailed {
        request_id: RequestId,
        input: Id,
        error: String,
    },
}

impl CoreEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            CoreEvent::FileRead { request_id, .. } | CoreEvent::FileReadFailed { request_id, .. } => {
                *request_id
            }
        }
    }
}

pub struct Bus {
    pub cmd_tx: Sender<CoreCommand>,
    pub evt_rx: Receiver<CoreEvent>,
    pub evt_tx: Sender<CoreEvent>, // shareable for runtimes
}

impl Bus {
    /// Build a bus and hand back the command receiver for the runtime to own.
    pub fn new() -> (Self, Receiver<CoreCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        (
            Self {
                cmd_tx,
                evt_rx,
                evt_tx,
            },
            cmd_rx,
        )
    }
}

//! Shared plumbing for everything that renders a form field into the page.

use crate::config::PreviewConfig;
use crate::editor::EditorRegistry;
use bus::{CoreCommand, CoreEvent};
use core_types::{PageKind, RequestId, SelectedFile};
use form_state::FormStateStore;
use html::{Document, Id};
use std::collections::HashSet;
use std::sync::mpsc::Sender;

/// What the page host reports to installed binders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomEvent {
    /// Keystroke-level edit of a text control.
    Input(Id),
    /// Committed change: select pick, file pick or clear.
    Change(Id),
    Click(Id),
    MouseEnter(Id),
    MouseLeave(Id),
    /// Rich-text editor content changed; carries the id of the field it replaces.
    EditorChanged(String),
}

impl DomEvent {
    pub fn target(&self) -> Option<Id> {
        match self {
            DomEvent::Input(id)
            | DomEvent::Change(id)
            | DomEvent::Click(id)
            | DomEvent::MouseEnter(id)
            | DomEvent::MouseLeave(id) => Some(*id),
            DomEvent::EditorChanged(_) => None,
        }
    }
}

/// Outstanding file reads. Ids are never reused within a session.
pub struct FileReads {
    cmd_tx: Sender<CoreCommand>,
    next_request: RequestId,
    in_flight: HashSet<RequestId>,
}

impl FileReads {
    pub fn new(cmd_tx: Sender<CoreCommand>) -> Self {
        Self {
            cmd_tx,
            next_request: 1,
            in_flight: HashSet::new(),
        }
    }

    /// Queue an asynchronous read of `file` on behalf of `input`.
    pub fn submit(&mut self, input: Id, file: SelectedFile) -> Option<RequestId> {
        let request_id = self.next_request;
        self.next_request += 1;
        if let Err(e) = self.cmd_tx.send(CoreCommand::ReadFile {
            request_id,
            input,
            file,
        }) {
            log::warn!(target: "preview", "file runtime is gone, dropping read {request_id}: {e}");
            return None;
        }
        self.in_flight.insert(request_id);
        Some(request_id)
    }

    /// Mark a completion as delivered; `false` if it was not ours or already seen.
    pub fn complete(&mut self, request_id: RequestId) -> bool {
        self.in_flight.remove(&request_id)
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }
}

/// Everything a binder may touch while it runs.
pub struct BindContext<'a> {
    pub kind: PageKind,
    pub doc: &'a mut Document,
    pub form: &'a FormStateStore,
    pub editors: &'a EditorRegistry,
    pub reads: &'a mut FileReads,
    pub config: &'a PreviewConfig,
}

impl BindContext<'_> {
    /// Resolve an element by DOM id, logging when it is absent.
    pub fn resolve(&self, dom_id: &str) -> Option<Id> {
        let found = self.doc.get_element_by_id(dom_id);
        if found.is_none() {
            log::debug!(target: "preview", "{}: no element #{dom_id}", self.kind);
        }
        found
    }
}

/// A live link from one or more form fields to a preview element.
pub trait Binder {
    /// DOM id of the element this binder renders into.
    fn target_id(&self) -> &str;

    /// React to a host event. Returns `true` if the preview was re-rendered.
    fn handle_event(&mut self, cx: &mut BindContext<'_>, event: &DomEvent) -> bool;

    /// React to a file runtime completion. Returns `true` if it was consumed.
    fn handle_core_event(&mut self, _cx: &mut BindContext<'_>, _event: &CoreEvent) -> bool {
        false
    }
}

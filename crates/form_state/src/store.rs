//! Live state of form controls, keyed by document node id.
//!
//! The document keeps the markup defaults (`value="…"`, `<option selected>`); this store keeps
//! what the administrator has typed or picked since. Binders only read from here.

use core_types::SelectedFile;
use html::Id;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
struct ControlState {
    value: String,
    file: Option<SelectedFile>,
    selected: Option<usize>,
    revision: u64,
}

impl ControlState {
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[derive(Clone, Debug, Default)]
pub struct FormStateStore {
    controls: HashMap<Id, ControlState>,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an entry exists for this control.
    pub fn has(&self, id: Id) -> bool {
        self.controls.contains_key(&id)
    }

    /// Current value of a text-like control.
    pub fn get(&self, id: Id) -> Option<&str> {
        self.controls.get(&id).map(|c| c.value.as_str())
    }

    /// Set/overwrite the value; returns `true` if it changed.
    pub fn set(&mut self, id: Id, value: impl Into<String>) -> bool {
        let value = value.into();
        let entry = self.controls.entry(id).or_default();
        if entry.value == value {
            return false;
        }
        entry.value = value;
        entry.bump();
        true
    }

    /// Ensure an entry exists; if missing, inserts the provided initial value.
    pub fn ensure_initial(&mut self, id: Id, initial: String) {
        self.controls.entry(id).or_insert_with(|| ControlState {
            value: initial,
            ..ControlState::default()
        });
    }

    pub fn file(&self, id: Id) -> Option<&SelectedFile> {
        self.controls.get(&id).and_then(|c| c.file.as_ref())
    }

    /// Replace the file selection; `None` clears it. Always counts as a change,
    /// since picking the same file again still fires `change` in browsers.
    pub fn set_file(&mut self, id: Id, file: Option<SelectedFile>) {
        let entry = self.controls.entry(id).or_default();
        entry.value = file.as_ref().map(SelectedFile::name).unwrap_or_default();
        entry.file = file;
        entry.bump();
    }

    pub fn selected_index(&self, id: Id) -> Option<usize> {
        self.controls.get(&id).and_then(|c| c.selected)
    }

    pub fn set_selected_index(&mut self, id: Id, index: Option<usize>) -> bool {
        let entry = self.controls.entry(id).or_default();
        if entry.selected == index {
            return false;
        }
        entry.selected = index;
        entry.bump();
        true
    }

    pub fn ensure_initial_selected(&mut self, id: Id, index: Option<usize>) {
        self.controls.entry(id).or_insert_with(|| ControlState {
            selected: index,
            ..ControlState::default()
        });
    }

    /// Monotonic revision counter; increments on every change to the control.
    pub fn revision(&self, id: Id) -> u64 {
        self.controls.get(&id).map_or(0, |c| c.revision)
    }
}

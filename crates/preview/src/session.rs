//! One loaded admin page: document, form state, installed bindings and the file runtime.
//!
//! User actions update form state first, then go through the same event path the page
//! listens on. File decodes complete on a background thread; `pump` applies them.

use crate::binder::{BindContext, DomEvent, FileReads};
use crate::carousel::CarouselState;
use crate::config::PreviewConfig;
use crate::editor::{EditorRegistry, RichTextEditor};
use crate::error::PreviewResult;
use crate::page::{PreviewPageController, WidgetFactory, simulated_widgets};
use crate::pages::PageSpec;
use bus::{Bus, CoreCommand, CoreEvent};
use core_types::{PageKind, SelectedFile};
use form_state::{FormStateStore, seed_form_state_from_dom, select_by_value};
use html::{Document, Id};
use runtime_file::start_file_runtime;
use std::path::Path;
use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub struct SessionBuilder {
    kind: PageKind,
    markup: String,
    config: PreviewConfig,
    editors: EditorRegistry,
    widgets: WidgetFactory,
}

impl SessionBuilder {
    pub fn config(mut self, config: PreviewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config_file(self, path: &Path) -> PreviewResult<Self> {
        let config = PreviewConfig::load(path)?;
        Ok(self.config(config))
    }

    /// Mount a rich-text editor over the field with id `field_id`.
    pub fn editor(mut self, field_id: &str, editor: Box<dyn RichTextEditor>) -> Self {
        self.editors.register(field_id, editor);
        self
    }

    pub fn widgets(mut self, widgets: WidgetFactory) -> Self {
        self.widgets = widgets;
        self
    }

    pub fn open(self) -> PreviewSession {
        let Self {
            kind,
            markup,
            config,
            editors,
            widgets,
        } = self;

        let mut doc = Document::parse(&markup);
        let mut form = FormStateStore::new();
        seed_form_state_from_dom(&mut form, &doc);

        let (bus, cmd_rx) = Bus::new();
        let runtime = start_file_runtime(cmd_rx, bus.evt_tx.clone());
        let mut reads = FileReads::new(bus.cmd_tx.clone());

        let spec = PageSpec::for_page(kind, &config);
        let controller = {
            let mut cx = BindContext {
                kind,
                doc: &mut doc,
                form: &form,
                editors: &editors,
                reads: &mut reads,
                config: &config,
            };
            PreviewPageController::init(&mut cx, &spec, &widgets)
        };

        PreviewSession {
            kind,
            doc,
            form,
            editors,
            config,
            reads,
            bus,
            controller,
            runtime: Some(runtime),
        }
    }
}

pub struct PreviewSession {
    kind: PageKind,
    doc: Document,
    form: FormStateStore,
    editors: EditorRegistry,
    config: PreviewConfig,
    reads: FileReads,
    bus: Bus,
    controller: PreviewPageController,
    runtime: Option<JoinHandle<()>>,
}

impl PreviewSession {
    pub fn builder(kind: PageKind, markup: impl Into<String>) -> SessionBuilder {
        SessionBuilder {
            kind,
            markup: markup.into(),
            config: PreviewConfig::default(),
            editors: EditorRegistry::new(),
            widgets: simulated_widgets(),
        }
    }

    pub fn open(kind: PageKind, markup: impl Into<String>) -> Self {
        Self::builder(kind, markup).open()
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn form(&self) -> &FormStateStore {
        &self.form
    }

    pub fn controller(&self) -> &PreviewPageController {
        &self.controller
    }

    pub fn text_of(&self, dom_id: &str) -> Option<String> {
        self.doc.text_content(self.doc.get_element_by_id(dom_id)?)
    }

    pub fn inner_html_of(&self, dom_id: &str) -> Option<String> {
        self.doc.inner_html(self.doc.get_element_by_id(dom_id)?)
    }

    pub fn attribute_of(&self, dom_id: &str, name: &str) -> Option<&str> {
        self.doc.attribute(self.doc.get_element_by_id(dom_id)?, name)
    }

    pub fn carousel_state(&self, dom_id: &str) -> Option<CarouselState> {
        let root = self.doc.get_element_by_id(dom_id)?;
        self.controller
            .carousels()
            .iter()
            .find(|c| c.root() == root)
            .map(|c| c.state())
    }

    /// Replace a text control's value and fire `input`. `false` if there is no such element.
    pub fn type_text(&mut self, dom_id: &str, value: &str) -> bool {
        let Some(id) = self.lookup(dom_id) else {
            return false;
        };
        self.form.set(id, value);
        self.dispatch(DomEvent::Input(id));
        true
    }

    /// Pick the option with `value` and fire `change`.
    pub fn select_value(&mut self, dom_id: &str, value: &str) -> bool {
        let Some(id) = self.lookup(dom_id) else {
            return false;
        };
        if select_by_value(&self.doc, &mut self.form, id, value) {
            self.dispatch(DomEvent::Change(id));
        }
        true
    }

    pub fn choose_file(&mut self, dom_id: &str, file: SelectedFile) -> bool {
        self.set_file(dom_id, Some(file))
    }

    pub fn clear_file(&mut self, dom_id: &str) -> bool {
        self.set_file(dom_id, None)
    }

    fn set_file(&mut self, dom_id: &str, file: Option<SelectedFile>) -> bool {
        let Some(id) = self.lookup(dom_id) else {
            return false;
        };
        self.form.set_file(id, file);
        self.dispatch(DomEvent::Change(id));
        true
    }

    pub fn click(&mut self, dom_id: &str) -> bool {
        let Some(id) = self.lookup(dom_id) else {
            return false;
        };
        self.click_node(id)
    }

    /// Click the first element matching `selector`.
    pub fn click_selector(&mut self, selector: &str) -> bool {
        match self.doc.query_selector(selector) {
            Some(id) => self.click_node(id),
            None => false,
        }
    }

    pub fn click_node(&mut self, id: Id) -> bool {
        self.dispatch(DomEvent::Click(id))
    }

    pub fn hover(&mut self, dom_id: &str, inside: bool) -> bool {
        let Some(id) = self.lookup(dom_id) else {
            return false;
        };
        let event = if inside {
            DomEvent::MouseEnter(id)
        } else {
            DomEvent::MouseLeave(id)
        };
        self.dispatch(event)
    }

    /// Replace an editor's markup and fire its change notification.
    pub fn edit_editor(&mut self, field_id: &str, markup: &str) -> bool {
        let Some(editor) = self.editors.get_mut(field_id) else {
            log::debug!(target: "preview", "no editor mounted over #{field_id}");
            return false;
        };
        editor.set_data(markup);
        self.dispatch(DomEvent::EditorChanged(field_id.to_string()));
        true
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.controller.tick(&mut self.doc, elapsed);
    }

    /// Apply every file runtime completion already waiting. Returns how many were seen.
    pub fn pump(&mut self) -> usize {
        let mut seen = 0;
        loop {
            match self.bus.evt_rx.try_recv() {
                Ok(event) => {
                    self.apply_core_event(event);
                    seen += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!(target: "preview", "file runtime disconnected");
                    break;
                }
            }
        }
        seen
    }

    /// Pump until no read is outstanding or `timeout` passes. `true` if all reads finished.
    pub fn wait_for_reads(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.reads.pending() > 0 {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.bus.evt_rx.recv_timeout(left) {
                Ok(event) => self.apply_core_event(event),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    log::warn!(target: "preview", "file runtime disconnected");
                    break;
                }
            }
        }
        self.reads.pending() == 0
    }

    pub fn pending_reads(&self) -> usize {
        self.reads.pending()
    }

    fn apply_core_event(&mut self, event: CoreEvent) {
        if !self.reads.complete(event.request_id()) {
            log::debug!(target: "preview", "unknown read {}", event.request_id());
            return;
        }
        let mut cx = BindContext {
            kind: self.kind,
            doc: &mut self.doc,
            form: &self.form,
            editors: &self.editors,
            reads: &mut self.reads,
            config: &self.config,
        };
        self.controller.on_core_event(&mut cx, &event);
    }

    fn dispatch(&mut self, event: DomEvent) -> bool {
        let mut cx = BindContext {
            kind: self.kind,
            doc: &mut self.doc,
            form: &self.form,
            editors: &self.editors,
            reads: &mut self.reads,
            config: &self.config,
        };
        self.controller.dispatch(&mut cx, &event)
    }

    fn lookup(&self, dom_id: &str) -> Option<Id> {
        let id = self.doc.get_element_by_id(dom_id);
        if id.is_none() {
            log::debug!(target: "preview", "{}: no element #{dom_id}", self.kind);
        }
        id
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        let _ = self.bus.cmd_tx.send(CoreCommand::Shutdown);
        if let Some(handle) = self.runtime.take() {
            let _ = handle.join();
        }
    }
}

use crate::binder::{BindContext, Binder, DomEvent};
use crate::transform::Transform;
use core_types::RenderMode;
use html::Id;

/// Declarative text binding: which field feeds which preview element, and how.
#[derive(Clone, Debug)]
pub struct BindingSpec {
    pub source: String,
    pub target: String,
    pub mode: RenderMode,
    pub transform: Option<Transform>,
}

impl BindingSpec {
    pub fn text(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            mode: RenderMode::Text,
            transform: None,
        }
    }

    pub fn html(source: &str, target: &str) -> Self {
        Self {
            mode: RenderMode::Html,
            ..Self::text(source, target)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum TextSource {
    Field(Id),
    /// Rich-text editor mounted over the field with this id.
    Editor(String),
}

pub struct TextBinder {
    target_dom_id: String,
    source: TextSource,
    target: Id,
    mode: RenderMode,
    transform: Option<Transform>,
}

impl TextBinder {
    /// Resolve both ends and render once. `None` (and nothing rendered) if either end is
    /// missing from the page.
    pub fn bind(cx: &mut BindContext<'_>, spec: &BindingSpec) -> Option<Self> {
        let source = if cx.editors.contains(&spec.source) {
            TextSource::Editor(spec.source.clone())
        } else {
            TextSource::Field(cx.resolve(&spec.source)?)
        };
        let target = cx.resolve(&spec.target)?;
        let binder = Self {
            target_dom_id: spec.target.clone(),
            source,
            target,
            mode: spec.mode,
            transform: spec.transform,
        };
        binder.render(cx);
        Some(binder)
    }

    fn read(&self, cx: &BindContext<'_>) -> String {
        match &self.source {
            TextSource::Field(id) => cx.form.get(*id).unwrap_or_default().to_string(),
            TextSource::Editor(name) => cx.editors.get(name).map(|e| e.get_data()).unwrap_or_default(),
        }
    }

    fn render(&self, cx: &mut BindContext<'_>) {
        let raw = self.read(cx);
        let value = match &self.transform {
            Some(t) => t.apply(&raw, &cx.config.weight),
            None => raw,
        };
        match self.mode {
            RenderMode::Text => cx.doc.set_text_content(self.target, &value),
            RenderMode::Html => cx.doc.set_inner_html(self.target, &value),
        };
    }
}

impl Binder for TextBinder {
    fn target_id(&self) -> &str {
        &self.target_dom_id
    }

    fn handle_event(&mut self, cx: &mut BindContext<'_>, event: &DomEvent) -> bool {
        let ours = match (event, &self.source) {
            (DomEvent::Input(id) | DomEvent::Change(id), TextSource::Field(src)) => id == src,
            (DomEvent::EditorChanged(name), TextSource::Editor(src)) => name == src,
            _ => false,
        };
        if ours {
            self.render(cx);
        }
        ours
    }
}

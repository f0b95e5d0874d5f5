use crate::binder::{BindContext, Binder, DomEvent};
use form_state::{option_label, selected_option};
use html::Id;

/// What part of the chosen option is shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectSource {
    #[default]
    Label,
    Attribute(String),
}

#[derive(Clone, Debug)]
pub struct SelectBinding {
    pub select: String,
    pub target: String,
    pub source: SelectSource,
}

impl SelectBinding {
    pub fn label(select: &str, target: &str) -> Self {
        Self {
            select: select.to_string(),
            target: target.to_string(),
            source: SelectSource::Label,
        }
    }
}

/// Mirrors the visible label (or an attribute) of a select's current option.
pub struct SelectTextBinder {
    target_dom_id: String,
    select: Id,
    target: Id,
    source: SelectSource,
}

impl SelectTextBinder {
    pub fn bind(cx: &mut BindContext<'_>, spec: &SelectBinding) -> Option<Self> {
        let select = cx.resolve(&spec.select)?;
        let target = cx.resolve(&spec.target)?;
        let binder = Self {
            target_dom_id: spec.target.clone(),
            select,
            target,
            source: spec.source.clone(),
        };
        binder.render(cx);
        Some(binder)
    }

    fn render(&self, cx: &mut BindContext<'_>) {
        let text = match selected_option(cx.doc, cx.form, self.select) {
            Some(option) => match &self.source {
                SelectSource::Label => option_label(cx.doc, option),
                SelectSource::Attribute(name) => cx.doc.attribute(option, name).unwrap_or_default().to_string(),
            },
            None => String::new(),
        };
        cx.doc.set_text_content(self.target, &text);
    }
}

impl Binder for SelectTextBinder {
    fn target_id(&self) -> &str {
        &self.target_dom_id
    }

    fn handle_event(&mut self, cx: &mut BindContext<'_>, event: &DomEvent) -> bool {
        if *event != DomEvent::Change(self.select) {
            return false;
        }
        self.render(cx);
        true
    }
}

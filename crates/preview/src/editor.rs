use std::collections::HashMap;

/// A rich-text editor mounted over a form field. Binders read its markup instead of the
/// underlying field's value, and re-render when the host reports a change for its name.
pub trait RichTextEditor {
    fn get_data(&self) -> String;
    fn set_data(&mut self, markup: &str);
}

/// Editor that just holds its markup.
#[derive(Clone, Debug, Default)]
pub struct MemoryEditor {
    data: String,
}

impl MemoryEditor {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            data: initial.into(),
        }
    }
}

impl RichTextEditor for MemoryEditor {
    fn get_data(&self) -> String {
        self.data.clone()
    }

    fn set_data(&mut self, markup: &str) {
        self.data = markup.to_string();
    }
}

/// Editors keyed by the `id` of the field they replace.
#[derive(Default)]
pub struct EditorRegistry {
    editors: HashMap<String, Box<dyn RichTextEditor>>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, field_id: impl Into<String>, editor: Box<dyn RichTextEditor>) {
        self.editors.insert(field_id.into(), editor);
    }

    pub fn get(&self, field_id: &str) -> Option<&dyn RichTextEditor> {
        self.editors.get(field_id).map(|e| e.as_ref())
    }

    pub fn get_mut(&mut self, field_id: &str) -> Option<&mut (dyn RichTextEditor + 'static)> {
        self.editors.get_mut(field_id).map(|e| e.as_mut())
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.editors.contains_key(field_id)
    }
}

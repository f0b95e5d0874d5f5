use crate::store::FormStateStore;
use html::{Document, Id};

/// `<option>` descendants of a select (including those inside `<optgroup>`), in order.
pub fn options_of(doc: &Document, select: Id) -> Vec<Id> {
    doc.descendants_named(select, "option")
}

pub fn selected_option(doc: &Document, store: &FormStateStore, select: Id) -> Option<Id> {
    let index = store.selected_index(select)?;
    options_of(doc, select).get(index).copied()
}

/// The option's display text with whitespace collapsed, like `HTMLOptionElement.text`.
pub fn option_label(doc: &Document, option: Id) -> String {
    doc.text_content(option)
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `value` attribute, falling back to the label.
pub fn option_value(doc: &Document, option: Id) -> String {
    match doc.attribute(option, "value") {
        Some(v) => v.to_string(),
        None => option_label(doc, option),
    }
}

/// Select the first option whose value equals `value`. An empty `value` with no matching
/// option clears the selection. Returns `true` if the selection changed.
pub fn select_by_value(doc: &Document, store: &mut FormStateStore, select: Id, value: &str) -> bool {
    let index = options_of(doc, select)
        .into_iter()
        .position(|opt| option_value(doc, opt) == value);
    if index.is_none() && !value.is_empty() {
        log::debug!(target: "form_state", "no option with value {value:?}");
        return false;
    }
    store.set_selected_index(select, index)
}

use crate::dom::{ControlType, control_type, normalize_textarea_newlines};
use crate::store::FormStateStore;
use html::dom_utils::collect_text;
use html::{Document, Node};

/// Seed live control state from markup defaults. Controls already in the store keep
/// their state (user state wins over HTML defaults).
pub fn seed_form_state_from_dom(store: &mut FormStateStore, doc: &Document) {
    fn first_selected_option(select: &Node) -> Option<usize> {
        fn collect<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
            for c in node.children() {
                if c.is_element_named("option") {
                    out.push(c);
                }
                collect(c, out);
            }
        }
        let mut options = Vec::new();
        collect(select, &mut options);
        if options.is_empty() {
            return None;
        }
        Some(
            options
                .iter()
                .position(|o| o.has_attr("selected"))
                .unwrap_or(0),
        )
    }

    fn walk(store: &mut FormStateStore, node: &Node) {
        let id = node.id();
        match control_type(node) {
            ControlType::Text => {
                if !store.has(id) {
                    store.ensure_initial(id, node.attr("value").unwrap_or("").to_string());
                }
                return;
            }
            ControlType::File => {
                if !store.has(id) {
                    store.ensure_initial(id, String::new());
                }
                return;
            }
            ControlType::TextArea => {
                if store.has(id) {
                    return;
                }
                let mut initial = String::new();
                collect_text(node.children(), &mut initial);
                let mut initial = normalize_textarea_newlines(&initial);

                // HTML textarea parsing: if the first character is a newline, strip it.
                if initial.starts_with('\n') {
                    initial.remove(0);
                }

                store.ensure_initial(id, initial);
                return;
            }
            ControlType::Select => {
                if !store.has(id) {
                    store.ensure_initial_selected(id, first_selected_option(node));
                }
                return;
            }
            ControlType::Other => {}
        }

        for c in node.children() {
            walk(store, c);
        }
    }

    walk(store, doc.root());
}

use super::*;
use core_types::SelectedFile;
use html::Document;

const FORM: &str = r#"
<form>
  <input id="name" value="Bella">
  <input id="weight_kg" type="number" value="4.5">
  <input id="agree" type="checkbox" checked>
  <input id="image_upload" type="file">
  <textarea id="description">
Line one&#13;
Line two</textarea>
  <select id="status">
    <option value="available">Available</option>
    <option value="reserved" selected>  Reserved
       soon </option>
  </select>
  <select id="mom_id"><optgroup label="Moms"><option value="1">Bella</option><option value="2">Daisy</option></optgroup></select>
  <select id="empty"></select>
</form>"#;

fn setup() -> (Document, FormStateStore) {
    let doc = Document::parse(FORM);
    let mut store = FormStateStore::new();
    seed_form_state_from_dom(&mut store, &doc);
    (doc, store)
}

fn id(doc: &Document, dom_id: &str) -> html::Id {
    doc.get_element_by_id(dom_id)
        .unwrap_or_else(|| panic!("missing #{dom_id}"))
}

#[test]
fn seeds_text_inputs_from_value_attribute() {
    let (doc, store) = setup();
    assert_eq!(store.get(id(&doc, "name")), Some("Bella"));
    assert_eq!(store.get(id(&doc, "weight_kg")), Some("4.5"));
    assert!(!store.has(id(&doc, "agree")));
}

#[test]
fn seeds_textarea_with_normalized_newlines() {
    let (doc, store) = setup();
    assert_eq!(store.get(id(&doc, "description")), Some("Line one\nLine two"));
}

#[test]
fn seeds_select_from_selected_attribute_or_first_option() {
    let (doc, store) = setup();
    let status = id(&doc, "status");
    assert_eq!(store.selected_index(status), Some(1));
    let option = selected_option(&doc, &store, status).expect("selected option");
    assert_eq!(option_label(&doc, option), "Reserved soon");
    assert_eq!(option_value(&doc, option), "reserved");

    let mom = id(&doc, "mom_id");
    assert_eq!(store.selected_index(mom), Some(0));
    assert_eq!(options_of(&doc, mom).len(), 2);

    assert_eq!(store.selected_index(id(&doc, "empty")), None);
}

#[test]
fn user_state_survives_reseed() {
    let (doc, mut store) = setup();
    let name = id(&doc, "name");
    assert!(store.set(name, "Daisy"));
    seed_form_state_from_dom(&mut store, &doc);
    assert_eq!(store.get(name), Some("Daisy"));
}

#[test]
fn select_by_value_updates_index() {
    let (doc, mut store) = setup();
    let mom = id(&doc, "mom_id");
    assert!(select_by_value(&doc, &mut store, mom, "2"));
    assert_eq!(store.selected_index(mom), Some(1));
    assert!(!select_by_value(&doc, &mut store, mom, "2"));
    assert!(!select_by_value(&doc, &mut store, mom, "99"));
    assert_eq!(store.selected_index(mom), Some(1));
}

#[test]
fn file_selection_and_revision() {
    let (doc, mut store) = setup();
    let upload = id(&doc, "image_upload");
    let before = store.revision(upload);
    store.set_file(upload, Some(SelectedFile::from_bytes("pup.jpg", vec![0u8; 4])));
    assert_eq!(store.file(upload).map(SelectedFile::name).as_deref(), Some("pup.jpg"));
    assert_eq!(store.get(upload), Some("pup.jpg"));
    store.set_file(upload, None);
    assert!(store.file(upload).is_none());
    assert_eq!(store.revision(upload), before + 2);
}

#[test]
fn classifies_controls() {
    let doc = Document::parse(r#"<input id=a type=Email><input id=b type=submit><textarea id=c></textarea>"#);
    let kind = |dom_id: &str| control_type(doc.node(id(&doc, dom_id)).expect("node"));
    assert_eq!(kind("a"), ControlType::Text);
    assert_eq!(kind("b"), ControlType::Other);
    assert_eq!(kind("c"), ControlType::TextArea);
}

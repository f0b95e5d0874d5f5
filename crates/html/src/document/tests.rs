use super::*;

const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <form>
    <input id="main_title" name="main_title" value="Welcome">
    <input id="image_upload" type="file" data-current-image="/static/hero.jpg">
  </form>
  <div class="live-preview-container">
    <h1 id="preview-main-title">old</h1>
    <div class="hero-preview-wrapper"><section class="hero-section" style="color: red"></section></div>
  </div>
</body></html>"#;

#[test]
fn resolves_elements_by_id_and_selector() {
    let doc = Document::parse(PAGE);
    let title = doc.get_element_by_id("preview-main-title").expect("title");
    assert_eq!(doc.tag_name(title), Some("h1"));
    assert!(doc.get_element_by_id("missing").is_none());

    let hero = doc
        .query_selector(".hero-preview-wrapper .hero-section")
        .expect("hero");
    assert_eq!(doc.tag_name(hero), Some("section"));
    assert_eq!(doc.query_selector_all(r#"form input[type="file"]"#).len(), 1);
}

#[test]
fn text_content_is_literal() {
    let mut doc = Document::parse(PAGE);
    let title = doc.get_element_by_id("preview-main-title").expect("title");
    assert!(doc.set_text_content(title, "<b>Puppies</b> & more"));
    assert_eq!(doc.text_content(title).as_deref(), Some("<b>Puppies</b> & more"));
    assert_eq!(
        doc.inner_html(title).as_deref(),
        Some("&lt;b&gt;Puppies&lt;/b&gt; &amp; more")
    );
    assert!(doc.children_of(title).len() == 1);
}

#[test]
fn empty_text_content_removes_children() {
    let mut doc = Document::parse(PAGE);
    let title = doc.get_element_by_id("preview-main-title").expect("title");
    assert!(doc.set_text_content(title, ""));
    assert!(doc.children_of(title).is_empty());
    assert_eq!(doc.text_content(title).as_deref(), Some(""));
}

#[test]
fn inner_html_parses_markup_with_fresh_ids() {
    let mut doc = Document::parse(PAGE);
    let title = doc.get_element_by_id("preview-main-title").expect("title");
    assert!(doc.set_inner_html(title, "Line one<br>Line <em>two</em>"));
    assert_eq!(doc.text_content(title).as_deref(), Some("Line oneLine two"));
    assert_eq!(doc.descendants_named(title, "br").len(), 1);

    let ids = doc.children_of(title);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());
    assert!(ids.iter().all(|id| *id != title));
}

#[test]
fn style_property_round_trips_through_attribute() {
    let mut doc = Document::parse(PAGE);
    let hero = doc.query_selector(".hero-section").expect("hero");
    assert_eq!(doc.style_property(hero, "color"), Some("red"));

    assert!(doc.set_style_property(hero, "background-image", "url('data:x')"));
    assert_eq!(
        doc.style_property(hero, "background-image"),
        Some("url('data:x')")
    );
    assert_eq!(
        doc.attribute(hero, "style"),
        Some("color: red; background-image: url('data:x');")
    );
}

#[test]
fn set_attribute_style_resyncs_declarations() {
    let mut doc = Document::parse(PAGE);
    let hero = doc.query_selector(".hero-section").expect("hero");
    assert!(doc.set_attribute(hero, "style", "display: none"));
    assert_eq!(doc.style_property(hero, "display"), Some("none"));
    assert_eq!(doc.style_property(hero, "color"), None);
}

#[test]
fn removing_declarations_drops_empty_style_attribute() {
    let mut doc = Document::parse(PAGE);
    let hero = doc.query_selector(".hero-section").expect("hero");
    doc.set_style_property(hero, "display", "none");
    assert!(doc.remove_style_property(hero, "display"));
    assert_eq!(doc.attribute(hero, "style"), Some("color: red;"));
    assert!(!doc.remove_style_property(hero, "display"));
    assert!(doc.remove_style_property(hero, "COLOR"));
    assert!(!doc.has_attribute(hero, "style"));
    assert_eq!(doc.style_property(hero, "color"), None);
}

#[test]
fn insert_after_places_next_sibling() {
    let mut doc = Document::parse(PAGE);
    let input = doc.get_element_by_id("image_upload").expect("input");
    let container = Document::create_element("div", &[("class", "image-preview-container")]);
    let container_id = doc.insert_after(input, container).expect("inserted");
    let img_id = doc
        .append_child(container_id, Document::create_element("img", &[]))
        .expect("appended");

    assert!(doc.is_descendant_of(img_id, container_id));
    let form = doc.query_selector("form").expect("form");
    let kids = doc.children_of(form);
    let pos = kids.iter().position(|id| *id == input).expect("input child");
    assert_eq!(kids.get(pos + 1), Some(&container_id));
}

#[test]
fn unknown_ids_are_ignored() {
    let mut doc = Document::parse(PAGE);
    let ghost = Id(9_999);
    assert!(!doc.set_text_content(ghost, "x"));
    assert!(!doc.set_inner_html(ghost, "x"));
    assert!(!doc.set_attribute(ghost, "src", "x"));
    assert!(doc.text_content(ghost).is_none());
    assert!(doc.insert_after(ghost, Document::create_element("div", &[])).is_none());
}

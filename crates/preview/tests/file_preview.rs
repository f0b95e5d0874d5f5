use preview::{PageKind, PreviewSession, SelectedFile};
use std::time::Duration;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
const WAIT: Duration = Duration::from_secs(5);

fn png(name: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, PNG_MAGIC.to_vec())
}

#[test]
fn chosen_image_appears_after_decode() {
    let mut s = PreviewSession::open(PageKind::Puppy, include_str!("fixtures/puppy.html"));
    assert_eq!(s.attribute_of("preview-puppy-image", "src"), Some("/static/placeholder.png"));

    assert!(s.choose_file("image_upload", png("biscuit.png")));
    assert!(s.wait_for_reads(WAIT));
    let src = s.attribute_of("preview-puppy-image", "src").unwrap_or_default();
    assert!(src.starts_with("data:image/png;base64,"), "{src}");
}

#[test]
fn only_the_latest_selection_is_shown() {
    let mut s = PreviewSession::open(PageKind::Puppy, include_str!("fixtures/puppy.html"));
    s.choose_file("image_upload", SelectedFile::from_bytes("old.gif", b"GIF89a....".to_vec()));
    s.choose_file("image_upload", png("new.png"));
    assert!(s.wait_for_reads(WAIT));
    assert_eq!(s.pending_reads(), 0);
    let src = s.attribute_of("preview-puppy-image", "src").unwrap_or_default();
    assert!(src.starts_with("data:image/png;"), "{src}");
}

#[test]
fn hero_background_is_replaced() {
    let mut s = PreviewSession::open(PageKind::Hero, include_str!("fixtures/hero.html"));
    s.choose_file("image_upload", png("hero.png"));
    assert!(s.wait_for_reads(WAIT));
    let section = s.document().query_selector(".hero-section").unwrap();
    let bg = s.document().style_property(section, "background-image").unwrap_or_default();
    assert!(bg.starts_with("url('data:image/png;base64,"), "{bg}");
    assert_eq!(s.document().style_property(section, "min-height"), Some("300px"));
}

#[test]
fn clearing_after_decode_restores_original_image() {
    let mut s = PreviewSession::open(PageKind::Puppy, include_str!("fixtures/puppy.html"));
    s.choose_file("image_upload", png("biscuit.png"));
    assert!(s.wait_for_reads(WAIT));
    assert!(s.clear_file("image_upload"));
    assert_eq!(s.attribute_of("preview-puppy-image", "src"), Some("/static/placeholder.png"));
}

#[test]
fn clearing_hero_upload_restores_original_background() {
    let mut s = PreviewSession::open(PageKind::Hero, include_str!("fixtures/hero.html"));
    s.choose_file("image_upload", png("hero.png"));
    assert!(s.wait_for_reads(WAIT));
    s.clear_file("image_upload");
    let section = s.document().query_selector(".hero-section").unwrap();
    assert_eq!(
        s.document().style_property(section, "background-image"),
        Some("url('/static/hero.jpg')")
    );
    assert_eq!(s.document().style_property(section, "display"), None);
}

#[test]
fn unreadable_path_keeps_previous_preview() {
    let mut s = PreviewSession::open(PageKind::About, include_str!("fixtures/about.html"));
    s.choose_file(
        "image_upload",
        SelectedFile::Path("/definitely/not/here/about.png".into()),
    );
    assert!(s.wait_for_reads(WAIT));
    assert_eq!(s.attribute_of("preview-about-image", "src"), Some("/static/uploads/about.jpg"));
}

#[test]
fn clearing_before_decode_finishes_shows_fallback() {
    let mut s = PreviewSession::open(PageKind::About, include_str!("fixtures/about.html"));
    s.choose_file("image_upload", png("late.png"));
    s.clear_file("image_upload");
    assert!(s.wait_for_reads(WAIT));
    assert_eq!(s.attribute_of("preview-about-image", "src"), Some("/static/uploads/about.jpg"));
}

#[test]
fn upload_page_generates_thumbnails_for_form_inputs() {
    let mut s = PreviewSession::open(PageKind::ImageUpload, include_str!("fixtures/upload.html"));
    let doc = s.document();
    let containers = doc.query_selector_all("form .image-preview-container");
    assert_eq!(containers.len(), 2);
    assert!(doc.query_selector_all(".image-preview-container").len() == 2, "input outside a form is skipped");

    let thumbs = doc.query_selector_all(".image-preview-thumbnail");
    assert_eq!(doc.attribute(thumbs[0], "src"), Some("/static/uploads/photo.jpg"));
    assert_eq!(doc.style_property(containers[0], "display"), Some("block"));
    assert_eq!(doc.style_property(thumbs[0], "max-height"), Some("150px"));
    assert_eq!(doc.style_property(containers[1], "display"), Some("none"));

    let extra_thumb = thumbs[1];
    let extra_container = containers[1];
    s.choose_file("extra", png("extra.png"));
    assert!(s.wait_for_reads(WAIT));
    let doc = s.document();
    assert!(doc.attribute(extra_thumb, "src").unwrap_or_default().starts_with("data:image/png"));
    assert_eq!(doc.style_property(extra_container, "display"), Some("block"));

    s.clear_file("extra");
    assert_eq!(s.document().style_property(extra_container, "display"), Some("none"));
}

#[test]
fn container_follows_its_input() {
    let s = PreviewSession::open(PageKind::ImageUpload, include_str!("fixtures/upload.html"));
    let doc = s.document();
    let form = doc.get_element_by_id("gallery").unwrap();
    let kids = doc.children_of(form);
    let photo = doc.get_element_by_id("photo").unwrap();
    let at = kids.iter().position(|&k| k == photo).unwrap();
    let next = kids[at + 1];
    assert!(doc.node(next).is_some_and(|n| n.has_class("image-preview-container")));
}

use preview::{
    CarouselState, CarouselWidget, Document, Id, PageKind, PreviewConfig, PreviewSession, SimulatedCarousel,
    WidgetFactory,
};
use std::time::Duration;

const SECOND: Duration = Duration::from_secs(1);

fn active_slide(s: &PreviewSession, carousel: &str) -> usize {
    let doc = s.document();
    let root = doc.get_element_by_id(carousel).unwrap();
    doc.query_selector_all_within(root, ".carousel-item")
        .iter()
        .position(|&item| doc.node(item).is_some_and(|n| n.has_class("active")))
        .unwrap()
}

#[test]
fn public_carousel_cycles_until_first_manual_navigation() {
    let mut s = PreviewSession::open(PageKind::Parent, include_str!("fixtures/parent.html"));
    assert_eq!(s.carousel_state("parentCarousel-7"), Some(CarouselState::AutoCycling));

    s.tick(5 * SECOND);
    assert_eq!(active_slide(&s, "parentCarousel-7"), 1);

    assert!(s.click_selector("#parentCarousel-7 .carousel-control-next-icon"));
    assert_eq!(s.carousel_state("parentCarousel-7"), Some(CarouselState::ManuallyControlled));
    assert_eq!(active_slide(&s, "parentCarousel-7"), 2);

    s.tick(60 * SECOND);
    assert_eq!(active_slide(&s, "parentCarousel-7"), 2);
}

#[test]
fn indicator_click_is_manual_navigation() {
    let mut s = PreviewSession::open(PageKind::Parent, include_str!("fixtures/parent.html"));
    let first = s
        .document()
        .query_selector(r#"#parentCarousel-7 .carousel-indicators button[data-bs-slide-to="0"]"#)
        .unwrap();
    s.tick(5 * SECOND);
    assert!(s.click_node(first));
    assert_eq!(active_slide(&s, "parentCarousel-7"), 0);
    s.tick(30 * SECOND);
    assert_eq!(active_slide(&s, "parentCarousel-7"), 0);
    assert_eq!(s.carousel_state("parentCarousel-7"), Some(CarouselState::ManuallyControlled));
}

#[test]
fn hover_suspends_cycling() {
    let mut s = PreviewSession::open(PageKind::Parent, include_str!("fixtures/parent.html"));
    assert!(s.hover("parentCarousel-7", true));
    s.tick(20 * SECOND);
    assert_eq!(active_slide(&s, "parentCarousel-7"), 0);
    s.hover("parentCarousel-7", false);
    s.tick(5 * SECOND);
    assert_eq!(active_slide(&s, "parentCarousel-7"), 1);
    assert_eq!(s.carousel_state("parentCarousel-7"), Some(CarouselState::AutoCycling));
}

#[test]
fn live_preview_carousel_never_autoplays() {
    let mut s = PreviewSession::open(PageKind::Parent, include_str!("fixtures/parent.html"));
    assert_eq!(s.carousel_state("live-preview-carousel"), Some(CarouselState::ManuallyControlled));
    s.tick(60 * SECOND);
    assert_eq!(active_slide(&s, "live-preview-carousel"), 0);
    s.click_selector("#live-preview-carousel .carousel-control-next");
    assert_eq!(active_slide(&s, "live-preview-carousel"), 1);
    s.click_selector("#live-preview-carousel .carousel-control-next");
    assert_eq!(active_slide(&s, "live-preview-carousel"), 0);
}

#[test]
fn widgets_without_reconfigure_are_restarted() {
    let widgets: WidgetFactory = Box::new(|doc: &Document, root: Id| -> Box<dyn CarouselWidget> {
        Box::new(SimulatedCarousel::for_element(doc, root).fixed_config())
    });
    let mut s = PreviewSession::builder(PageKind::Parent, include_str!("fixtures/parent.html"))
        .widgets(widgets)
        .open();
    s.tick(5 * SECOND);
    s.click_selector("#parentCarousel-7 .carousel-control-prev");
    assert_eq!(active_slide(&s, "parentCarousel-7"), 0);
    s.tick(60 * SECOND);
    assert_eq!(active_slide(&s, "parentCarousel-7"), 0);
}

#[test]
fn interval_comes_from_config() {
    let config = PreviewConfig::from_toml_str("[carousel]\ninterval_ms = 1000").unwrap();
    let mut s = PreviewSession::builder(PageKind::Parent, include_str!("fixtures/parent.html"))
        .config(config)
        .open();
    s.tick(2 * SECOND);
    assert_eq!(active_slide(&s, "parentCarousel-7"), 2);
}

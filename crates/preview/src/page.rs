use crate::annotate::DataAnnotator;
use crate::binder::{BindContext, Binder, DomEvent};
use crate::carousel::{CarouselAutoplayController, CarouselWidget, SimulatedCarousel};
use crate::image_file::{ImageFileBinder, ImageTarget};
use crate::pages::{CarouselMode, PageSpec};
use crate::placeholder::PlaceholderTextBinder;
use crate::select::SelectTextBinder;
use crate::text::TextBinder;
use bus::CoreEvent;
use core_types::PageKind;
use html::{Document, Id};
use std::time::Duration;

/// Builds the widget driving a carousel rooted at the given element.
pub type WidgetFactory = Box<dyn Fn(&Document, Id) -> Box<dyn CarouselWidget>>;

pub fn simulated_widgets() -> WidgetFactory {
    Box::new(|doc: &Document, root: Id| -> Box<dyn CarouselWidget> {
        Box::new(SimulatedCarousel::for_element(doc, root))
    })
}

const THUMBNAIL_STYLE: &str =
    "max-height: 150px; max-width: 100%; border: 1px solid #ddd; border-radius: 4px; padding: 5px;";

/// Everything installed on one admin page.
pub struct PreviewPageController {
    kind: PageKind,
    binders: Vec<Box<dyn Binder>>,
    carousels: Vec<CarouselAutoplayController>,
}

impl PreviewPageController {
    /// Annotate, bind, start carousels, then run one synthetic change so the preview
    /// reflects the loaded form. Missing elements only skip their own binding.
    pub fn init(cx: &mut BindContext<'_>, spec: &PageSpec, widgets: &WidgetFactory) -> Self {
        let kind = spec.kind;
        let mut controller = Self {
            kind,
            binders: Vec::new(),
            carousels: Vec::new(),
        };

        let mut annotated_select = None;
        if spec.annotate {
            match DataAnnotator::new(&cx.config.annotator).annotate(cx.doc) {
                Ok(_) => annotated_select = cx.doc.get_element_by_id(&cx.config.annotator.select),
                Err(e) => log::warn!(target: "preview", "{kind}: skipping annotation: {e}"),
            }
        }

        for binding in &spec.text {
            if enabled(cx, kind, &binding.target) {
                controller.push(TextBinder::bind(cx, binding));
            }
        }
        for binding in &spec.images {
            if enabled(cx, kind, binding.target.label()) {
                controller.push(ImageFileBinder::bind(cx, binding));
            }
        }
        for binding in &spec.selects {
            if enabled(cx, kind, &binding.target) {
                controller.push(SelectTextBinder::bind(cx, binding));
            }
        }
        for binding in &spec.placeholders {
            if enabled(cx, kind, &binding.target) {
                controller.push(PlaceholderTextBinder::bind(cx, binding));
            }
        }
        if spec.auto_image_previews {
            for binder in install_auto_previews(cx) {
                controller.binders.push(Box::new(binder));
            }
        }

        for carousel in &spec.carousels {
            for root in cx.doc.query_selector_all(&carousel.selector) {
                let widget = widgets(&*cx.doc, root);
                let settings = &cx.config.carousel;
                let ctl = match carousel.mode {
                    CarouselMode::AutoCycling => CarouselAutoplayController::autoplay(cx.doc, root, widget, settings),
                    CarouselMode::Manual => CarouselAutoplayController::manual(cx.doc, root, widget, settings),
                };
                controller.carousels.push(ctl);
            }
        }

        if let Some(select) = annotated_select {
            controller.dispatch(cx, &DomEvent::Change(select));
        }

        log::info!(
            target: "preview",
            "{kind}: {} binding(s), {} carousel(s) installed",
            controller.binders.len(),
            controller.carousels.len()
        );
        controller
    }

    fn push<B: Binder + 'static>(&mut self, binder: Option<B>) {
        if let Some(b) = binder {
            self.binders.push(Box::new(b));
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn binding_targets(&self) -> Vec<&str> {
        self.binders.iter().map(|b| b.target_id()).collect()
    }

    pub fn carousels(&self) -> &[CarouselAutoplayController] {
        &self.carousels
    }

    /// Route a host event to every carousel and binder. Returns `true` if any reacted.
    pub fn dispatch(&mut self, cx: &mut BindContext<'_>, event: &DomEvent) -> bool {
        let mut handled = false;
        for carousel in &mut self.carousels {
            if carousel.handle_event(cx.doc, event) {
                carousel.sync_dom(cx.doc);
                handled = true;
            }
        }
        for binder in &mut self.binders {
            handled |= binder.handle_event(cx, event);
        }
        if handled {
            log::trace!(target: "preview", "{}: handled {event:?}", self.kind);
        }
        handled
    }

    pub fn on_core_event(&mut self, cx: &mut BindContext<'_>, event: &CoreEvent) -> bool {
        let mut consumed = false;
        for binder in &mut self.binders {
            consumed |= binder.handle_core_event(cx, event);
        }
        if !consumed {
            log::debug!(target: "preview", "{}: discarding stale read {}", self.kind, event.request_id());
        }
        consumed
    }

    pub fn tick(&mut self, doc: &mut Document, elapsed: Duration) {
        for carousel in &mut self.carousels {
            carousel.tick(elapsed);
            carousel.sync_dom(doc);
        }
    }
}

fn enabled(cx: &BindContext<'_>, kind: PageKind, target: &str) -> bool {
    let on = !cx.config.is_disabled(kind, target);
    if !on {
        log::debug!(target: "preview", "{kind}: binding for #{target} disabled by config");
    }
    on
}

/// Give every file input inside a form a thumbnail container right after it.
fn install_auto_previews(cx: &mut BindContext<'_>) -> Vec<ImageFileBinder> {
    let mut binders = Vec::new();
    for input in cx.doc.query_selector_all(r#"form input[type="file"]"#) {
        let mut container = Document::create_element("div", &[("class", "image-preview-container mt-2")]);
        let thumbnail = Document::create_element(
            "img",
            &[("class", "image-preview-thumbnail"), ("style", THUMBNAIL_STYLE)],
        );
        if let Some(children) = container.children_mut() {
            children.push(thumbnail);
        }
        let Some(container) = cx.doc.insert_after(input, container) else {
            continue;
        };
        let Some(&thumbnail) = cx.doc.children_of(container).first() else {
            continue;
        };
        let label = cx
            .doc
            .attribute(input, "id")
            .or_else(|| cx.doc.attribute(input, "name"))
            .unwrap_or("file input")
            .to_string();
        binders.push(ImageFileBinder::attach(
            cx,
            label,
            input,
            thumbnail,
            ImageTarget::Src,
            Some(container),
            None,
        ));
    }
    binders
}

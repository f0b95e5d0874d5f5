//! Binding tables for each admin page, keyed by the element ids the templates render.

use crate::config::PreviewConfig;
use crate::image_file::ImageBinding;
use crate::placeholder::PlaceholderBinding;
use crate::select::SelectBinding;
use crate::text::BindingSpec;
use crate::transform::Transform;
use core_types::PageKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselMode {
    AutoCycling,
    Manual,
}

#[derive(Clone, Debug)]
pub struct CarouselSpec {
    pub selector: String,
    pub mode: CarouselMode,
}

impl CarouselSpec {
    fn new(selector: &str, mode: CarouselMode) -> Self {
        Self {
            selector: selector.to_string(),
            mode,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PageSpec {
    pub kind: PageKind,
    pub text: Vec<BindingSpec>,
    pub images: Vec<ImageBinding>,
    pub selects: Vec<SelectBinding>,
    pub placeholders: Vec<PlaceholderBinding>,
    /// Run the litter payload annotator before binding.
    pub annotate: bool,
    /// Give every `form input[type="file"]` a generated thumbnail preview.
    pub auto_image_previews: bool,
    pub carousels: Vec<CarouselSpec>,
}

impl PageSpec {
    fn empty(kind: PageKind) -> Self {
        Self {
            kind,
            text: Vec::new(),
            images: Vec::new(),
            selects: Vec::new(),
            placeholders: Vec::new(),
            annotate: false,
            auto_image_previews: false,
            carousels: Vec::new(),
        }
    }

    pub fn for_page(kind: PageKind, config: &PreviewConfig) -> Self {
        let mut page = Self::empty(kind);
        match kind {
            PageKind::Hero => {
                page.text = hero_text();
                page.images = vec![ImageBinding::background("image_upload", ".hero-preview-wrapper .hero-section")];
            }
            PageKind::About => {
                page.text = vec![
                    BindingSpec::text("about_title", "preview-about-title"),
                    BindingSpec::html("about_content_html", "preview-about-content"),
                ];
                page.images = vec![ImageBinding::src("image_upload", "preview-about-image")];
            }
            PageKind::Parent => {
                page.text = parent_text();
                page.text.push(BindingSpec::text("weight_kg", "preview-parent-weight").with_transform(Transform::WeightKg));
                page.carousels = vec![
                    CarouselSpec::new("#live-preview-carousel", CarouselMode::Manual),
                    CarouselSpec::new(r#"[id^="parentCarousel-"]"#, CarouselMode::AutoCycling),
                ];
            }
            PageKind::Puppy => {
                page.text = vec![BindingSpec::text("name", "preview-puppy-name")];
                page.images = vec![ImageBinding::src("image_upload", "preview-puppy-image")];
                page.selects = vec![
                    SelectBinding::label("status", "preview-puppy-status"),
                    SelectBinding::label("mom_id", "preview-mom-name"),
                    SelectBinding::label("dad_id", "preview-dad-name"),
                ];
            }
            PageKind::Announcement => {
                page.text = vec![
                    BindingSpec::text("main_text", "preview-main-text"),
                    BindingSpec::text("button_text", "preview-button-text"),
                ];
                page.placeholders = vec![PlaceholderBinding {
                    template_field: "sub_text".to_string(),
                    select: config.annotator.select.clone(),
                    target: "preview-sub-text".to_string(),
                    tokens: config.annotator.fields.clone(),
                }];
                page.annotate = true;
            }
            PageKind::Review => {
                page.text = vec![
                    BindingSpec::text("author_name", "preview-author-name"),
                    BindingSpec::html("testimonial_text", "preview-testimonial-text")
                        .with_transform(Transform::NewlinesToBreaks),
                ];
            }
            PageKind::Content => {
                page.text = hero_text();
                page.text.push(BindingSpec::text("about_title", "preview-about-title"));
                page.text.push(BindingSpec::html("about_content", "preview-about-content"));
                page.text.extend(parent_text());
            }
            PageKind::ImageUpload => {
                page.auto_image_previews = true;
            }
        }
        page
    }
}

fn hero_text() -> Vec<BindingSpec> {
    vec![
        BindingSpec::text("main_title", "preview-main-title"),
        BindingSpec::text("subtitle", "preview-subtitle"),
        BindingSpec::text("description", "preview-description"),
        BindingSpec::text("scroll_text_main", "preview-scroll-main"),
        BindingSpec::text("scroll_text_secondary", "preview-scroll-secondary"),
    ]
}

fn parent_text() -> Vec<BindingSpec> {
    vec![
        BindingSpec::text("name", "preview-parent-name"),
        BindingSpec::text("breed", "preview-parent-breed"),
        BindingSpec::html("description", "preview-parent-description"),
    ]
}

mod annotate;
mod binder;
mod carousel;
mod config;
mod editor;
mod error;
mod image_file;
mod page;
mod pages;
mod placeholder;
mod select;
mod session;
mod text;
mod transform;

pub use annotate::DataAnnotator;
pub use binder::{BindContext, Binder, DomEvent, FileReads};
pub use carousel::{
    CarouselAutoplayController, CarouselConfig, CarouselState, CarouselWidget, SimulatedCarousel,
};
pub use config::{
    AnnotatorConfig, CarouselSettings, FieldMapping, PageOverrides, PreviewConfig, WeightConfig,
};
pub use editor::{EditorRegistry, MemoryEditor, RichTextEditor};
pub use error::{ConfigError, PreviewError, PreviewResult};
pub use image_file::{ElementRef, ImageBinding, ImageFileBinder, ImageTarget};
pub use page::{PreviewPageController, WidgetFactory, simulated_widgets};
pub use pages::{CarouselMode, CarouselSpec, PageSpec};
pub use placeholder::{PlaceholderBinding, PlaceholderTextBinder, substitute};
pub use select::{SelectBinding, SelectSource, SelectTextBinder};
pub use session::{PreviewSession, SessionBuilder};
pub use text::{BindingSpec, TextBinder};
pub use transform::{Transform, format_weight, newlines_to_breaks, parse_leading_number};

pub use core_types::{PageKind, RenderMode, SelectedFile};
pub use html::{Document, Id};

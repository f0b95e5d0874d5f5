use crate::binder::{BindContext, Binder, DomEvent};
use bus::CoreEvent;
use core_types::RequestId;
use html::{Document, Id};

/// How a decoded image is applied to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageTarget {
    Src,
    /// Inline `background-image: url('…')`.
    BackgroundImage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementRef {
    Id(String),
    Selector(String),
}

impl ElementRef {
    pub fn resolve(&self, doc: &Document) -> Option<Id> {
        match self {
            ElementRef::Id(dom_id) => doc.get_element_by_id(dom_id),
            ElementRef::Selector(sel) => doc.query_selector(sel),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ElementRef::Id(s) | ElementRef::Selector(s) => s,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageBinding {
    pub input: String,
    pub target: ElementRef,
    pub apply: ImageTarget,
    /// Element shown while a preview exists and hidden otherwise.
    pub container: Option<String>,
    /// Shown when no file is selected. Defaults to the input's `data-current-image`,
    /// then to whatever image the target showed when bound.
    pub fallback: Option<String>,
}

impl ImageBinding {
    pub fn src(input: &str, target: &str) -> Self {
        Self {
            input: input.to_string(),
            target: ElementRef::Id(target.to_string()),
            apply: ImageTarget::Src,
            container: None,
            fallback: None,
        }
    }

    pub fn background(input: &str, target_selector: &str) -> Self {
        Self {
            target: ElementRef::Selector(target_selector.to_string()),
            apply: ImageTarget::BackgroundImage,
            ..Self::src(input, "")
        }
    }
}

/// Shows a locally chosen image before upload. Decoding happens on the file runtime; only
/// the completion for the most recent selection is applied.
pub struct ImageFileBinder {
    label: String,
    input: Id,
    target: Id,
    apply: ImageTarget,
    container: Option<Id>,
    fallback: Option<String>,
    latest: Option<RequestId>,
    /// Set while the target itself is hidden for lack of a container and fallback.
    hidden_display: Option<Option<String>>,
}

impl ImageFileBinder {
    pub fn bind(cx: &mut BindContext<'_>, spec: &ImageBinding) -> Option<Self> {
        let input = cx.resolve(&spec.input)?;
        let Some(target) = spec.target.resolve(cx.doc) else {
            log::debug!(target: "preview", "{}: no preview element {}", cx.kind, spec.target.label());
            return None;
        };
        let container = spec.container.as_deref().and_then(|c| cx.resolve(c));
        Some(Self::attach(
            cx,
            spec.target.label().to_string(),
            input,
            target,
            spec.apply,
            container,
            spec.fallback.clone(),
        ))
    }

    /// Wire up already resolved nodes and show the initial state.
    pub fn attach(
        cx: &mut BindContext<'_>,
        label: String,
        input: Id,
        target: Id,
        apply: ImageTarget,
        container: Option<Id>,
        fallback: Option<String>,
    ) -> Self {
        let fallback = fallback.or_else(|| {
            cx.doc
                .attribute(input, "data-current-image")
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        })
        .or_else(|| initial_image(cx.doc, target, apply));
        let mut binder = Self {
            label,
            input,
            target,
            apply,
            container,
            fallback,
            latest: None,
            hidden_display: None,
        };
        binder.show_fallback(cx);
        binder
    }

    pub fn input(&self) -> Id {
        self.input
    }

    /// Request id of the read whose result would still be applied.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.latest
    }

    fn show_fallback(&mut self, cx: &mut BindContext<'_>) {
        match self.fallback.clone() {
            Some(url) => self.show_image(cx, &url),
            None if self.container.is_some() => self.set_container_visible(cx, false),
            None => self.hide_target(cx),
        }
    }

    fn hide_target(&mut self, cx: &mut BindContext<'_>) {
        if self.hidden_display.is_none() {
            let display = cx.doc.style_property(self.target, "display").map(str::to_string);
            self.hidden_display = Some(display);
        }
        cx.doc.set_style_property(self.target, "display", "none");
    }

    fn unhide_target(&mut self, cx: &mut BindContext<'_>) {
        match self.hidden_display.take() {
            Some(Some(display)) => {
                cx.doc.set_style_property(self.target, "display", &display);
            }
            Some(None) => {
                cx.doc.remove_style_property(self.target, "display");
            }
            None => {}
        }
    }

    fn show_image(&mut self, cx: &mut BindContext<'_>, url: &str) {
        match self.apply {
            ImageTarget::Src => {
                cx.doc.set_attribute(self.target, "src", url);
            }
            ImageTarget::BackgroundImage => {
                cx.doc
                    .set_style_property(self.target, "background-image", &format!("url('{url}')"));
            }
        }
        self.unhide_target(cx);
        self.set_container_visible(cx, true);
    }

    fn set_container_visible(&self, cx: &mut BindContext<'_>, visible: bool) {
        if let Some(container) = self.container {
            let display = if visible { "block" } else { "none" };
            cx.doc.set_style_property(container, "display", display);
        }
    }

    fn on_selection_changed(&mut self, cx: &mut BindContext<'_>) {
        match cx.form.file(self.input) {
            Some(file) => {
                log::debug!(target: "preview", "{}: reading {}", self.label, file.name());
                self.latest = cx.reads.submit(self.input, file.clone());
            }
            None => {
                if let Some(stale) = self.latest.take() {
                    log::debug!(target: "preview", "{}: selection cleared, dropping read {stale}", self.label);
                }
                self.show_fallback(cx);
            }
        }
    }
}

/// The image the target shows before any selection: its `src`, or the URL inside its
/// inline `background-image`.
fn initial_image(doc: &Document, target: Id, apply: ImageTarget) -> Option<String> {
    let url = match apply {
        ImageTarget::Src => doc.attribute(target, "src")?,
        ImageTarget::BackgroundImage => css_url(doc.style_property(target, "background-image")?)?,
    };
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

/// `url('a.jpg')`, `url("a.jpg")` or `url(a.jpg)` to `a.jpg`.
fn css_url(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix("url(")?.strip_suffix(')')?.trim();
    let unquoted = inner
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(inner);
    Some(unquoted)
}

impl Binder for ImageFileBinder {
    fn target_id(&self) -> &str {
        &self.label
    }

    fn handle_event(&mut self, cx: &mut BindContext<'_>, event: &DomEvent) -> bool {
        if *event != DomEvent::Change(self.input) {
            return false;
        }
        self.on_selection_changed(cx);
        true
    }

    fn handle_core_event(&mut self, cx: &mut BindContext<'_>, event: &CoreEvent) -> bool {
        let (request_id, input) = match event {
            CoreEvent::FileRead {
                request_id, input, ..
            }
            | CoreEvent::FileReadFailed {
                request_id, input, ..
            } => (*request_id, *input),
        };
        if input != self.input || self.latest != Some(request_id) {
            return false;
        }
        self.latest = None;
        match event {
            CoreEvent::FileRead { data_uri, .. } => {
                log::trace!(target: "preview", "{}: applying read {request_id}", self.label);
                self.show_image(cx, data_uri);
            }
            CoreEvent::FileReadFailed { error, .. } => {
                log::warn!(target: "preview", "{}: could not preview file: {error}", self.label);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_url_accepts_quoted_and_bare_forms() {
        assert_eq!(css_url("url('/static/hero.jpg')"), Some("/static/hero.jpg"));
        assert_eq!(css_url(r#"url("a b.png")"#), Some("a b.png"));
        assert_eq!(css_url(" url(plain.gif) "), Some("plain.gif"));
        assert_eq!(css_url("none"), None);
    }

    #[test]
    fn initial_image_reads_the_target() {
        let doc = Document::parse(
            r#"<img id="a" src="/p.png"><img id="b" src=""><div id="c" style="background-image: url('data:image/png;base64,AAA=')"></div>"#,
        );
        let id = |s: &str| doc.get_element_by_id(s).unwrap();
        assert_eq!(initial_image(&doc, id("a"), ImageTarget::Src).as_deref(), Some("/p.png"));
        assert_eq!(initial_image(&doc, id("b"), ImageTarget::Src), None);
        assert_eq!(
            initial_image(&doc, id("c"), ImageTarget::BackgroundImage).as_deref(),
            Some("data:image/png;base64,AAA=")
        );
    }
}

//! Rotating slide displays: a widget seam, an in-memory widget, and the controller that
//! turns autoplay off for good once the visitor navigates by hand.

use crate::binder::DomEvent;
use crate::config::CarouselSettings;
use html::{Document, Id};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselConfig {
    /// `None` disables automatic advance.
    pub interval: Option<Duration>,
    pub pause_on_hover: bool,
}

impl CarouselConfig {
    pub fn autoplay(settings: &CarouselSettings) -> Self {
        Self {
            interval: Some(settings.interval()),
            pause_on_hover: settings.pause_on_hover,
        }
    }

    pub fn without_autoplay(self) -> Self {
        Self {
            interval: None,
            ..self
        }
    }
}

pub trait CarouselWidget {
    fn start(&mut self, config: CarouselConfig);
    fn pause(&mut self);
    /// Resume automatic advance, if the config has an interval.
    fn cycle(&mut self);
    fn next(&mut self);
    fn prev(&mut self);
    fn to(&mut self, index: usize);
    /// Swap the config of a started widget. `false` if the widget cannot do that.
    fn reconfigure(&mut self, config: CarouselConfig) -> bool;
    fn dispose(&mut self);
    fn active_index(&self) -> usize;
    fn is_cycling(&self) -> bool;
    fn hover(&mut self, inside: bool);
    /// Advance the widget's clock.
    fn tick(&mut self, elapsed: Duration);
}

/// Tick-driven widget over `slides` slides.
#[derive(Clone, Debug)]
pub struct SimulatedCarousel {
    slides: usize,
    active: usize,
    config: Option<CarouselConfig>,
    cycling: bool,
    hovered: bool,
    elapsed: Duration,
    reconfigurable: bool,
    starts: usize,
}

impl SimulatedCarousel {
    pub fn new(slides: usize) -> Self {
        Self {
            slides,
            active: 0,
            config: None,
            cycling: false,
            hovered: false,
            elapsed: Duration::ZERO,
            reconfigurable: true,
            starts: 0,
        }
    }

    /// Slides are the `.carousel-item`s under `root`; the one marked `active` is current.
    pub fn for_element(doc: &Document, root: Id) -> Self {
        let items = doc.query_selector_all_within(root, ".carousel-item");
        let mut widget = Self::new(items.len());
        widget.active = items
            .iter()
            .position(|&item| doc.node(item).is_some_and(|n| n.has_class("active")))
            .unwrap_or(0);
        widget
    }

    /// A widget whose config is fixed once started.
    pub fn fixed_config(mut self) -> Self {
        self.reconfigurable = false;
        self
    }

    pub fn config(&self) -> Option<CarouselConfig> {
        self.config
    }

    /// How many times `start` has been called.
    pub fn starts(&self) -> usize {
        self.starts
    }

    fn go(&mut self, index: usize) {
        if self.slides > 0 {
            self.active = index % self.slides;
        }
        self.elapsed = Duration::ZERO;
    }
}

impl CarouselWidget for SimulatedCarousel {
    fn start(&mut self, config: CarouselConfig) {
        self.config = Some(config);
        self.cycling = false;
        self.elapsed = Duration::ZERO;
        self.starts += 1;
    }

    fn pause(&mut self) {
        self.cycling = false;
        self.elapsed = Duration::ZERO;
    }

    fn cycle(&mut self) {
        self.cycling = self.config.is_some_and(|c| c.interval.is_some());
        self.elapsed = Duration::ZERO;
    }

    fn next(&mut self) {
        self.go(self.active + 1);
    }

    fn prev(&mut self) {
        self.go(self.active + self.slides.saturating_sub(1));
    }

    fn to(&mut self, index: usize) {
        if index < self.slides {
            self.go(index);
        }
    }

    fn reconfigure(&mut self, config: CarouselConfig) -> bool {
        if !self.reconfigurable || self.config.is_none() {
            return false;
        }
        self.config = Some(config);
        if config.interval.is_none() {
            self.cycling = false;
        }
        true
    }

    fn dispose(&mut self) {
        self.config = None;
        self.cycling = false;
    }

    fn active_index(&self) -> usize {
        self.active
    }

    fn is_cycling(&self) -> bool {
        self.cycling
    }

    fn hover(&mut self, inside: bool) {
        self.hovered = inside;
        if inside {
            self.elapsed = Duration::ZERO;
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        let Some(config) = self.config else { return };
        let Some(interval) = config.interval else { return };
        if !self.cycling || self.slides < 2 || interval.is_zero() {
            return;
        }
        if self.hovered && config.pause_on_hover {
            return;
        }
        self.elapsed += elapsed;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            self.active = (self.active + 1) % self.slides;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselState {
    AutoCycling,
    ManuallyControlled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Navigation {
    Prev,
    Next,
    To(Option<usize>),
}

pub struct CarouselAutoplayController {
    root: Id,
    label: String,
    widget: Box<dyn CarouselWidget>,
    config: CarouselConfig,
    state: CarouselState,
    prev: Vec<Id>,
    next: Vec<Id>,
    indicators: Vec<Id>,
}

impl CarouselAutoplayController {
    /// Start `widget` auto-advancing.
    pub fn autoplay(
        doc: &Document,
        root: Id,
        mut widget: Box<dyn CarouselWidget>,
        settings: &CarouselSettings,
    ) -> Self {
        let config = CarouselConfig::autoplay(settings);
        widget.start(config);
        widget.cycle();
        Self::new(doc, root, widget, config, CarouselState::AutoCycling)
    }

    /// Start `widget` with automatic advance off from the outset.
    pub fn manual(
        doc: &Document,
        root: Id,
        mut widget: Box<dyn CarouselWidget>,
        settings: &CarouselSettings,
    ) -> Self {
        let config = CarouselConfig::autoplay(settings).without_autoplay();
        widget.start(config);
        Self::new(doc, root, widget, config, CarouselState::ManuallyControlled)
    }

    fn new(
        doc: &Document,
        root: Id,
        widget: Box<dyn CarouselWidget>,
        config: CarouselConfig,
        state: CarouselState,
    ) -> Self {
        let label = doc
            .attribute(root, "id")
            .map_or_else(|| format!("carousel {root:?}"), |id| format!("#{id}"));
        log::debug!(target: "preview", "{label}: started {state:?}");
        Self {
            root,
            label,
            widget,
            config,
            state,
            prev: doc.query_selector_all_within(root, ".carousel-control-prev"),
            next: doc.query_selector_all_within(root, ".carousel-control-next"),
            indicators: doc.query_selector_all_within(root, ".carousel-indicators"),
        }
    }

    pub fn root(&self) -> Id {
        self.root
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn widget(&self) -> &dyn CarouselWidget {
        self.widget.as_ref()
    }

    /// Returns `true` if the event concerned this carousel.
    pub fn handle_event(&mut self, doc: &Document, event: &DomEvent) -> bool {
        match event {
            DomEvent::Click(target) => match self.navigation_for(doc, *target) {
                Some(nav) => {
                    self.on_manual_navigation();
                    match nav {
                        Navigation::Prev => self.widget.prev(),
                        Navigation::Next => self.widget.next(),
                        Navigation::To(Some(index)) => self.widget.to(index),
                        Navigation::To(None) => {}
                    }
                    true
                }
                None => false,
            },
            DomEvent::MouseEnter(target) if self.contains(doc, *target) => {
                self.widget.hover(true);
                true
            }
            DomEvent::MouseLeave(target) if self.contains(doc, *target) => {
                self.widget.hover(false);
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.widget.tick(elapsed);
    }

    /// Move the `active` class onto the widget's current slide.
    pub fn sync_dom(&self, doc: &mut Document) {
        let active = self.widget.active_index();
        for (i, item) in doc.query_selector_all_within(self.root, ".carousel-item").into_iter().enumerate() {
            let classes = doc.attribute(item, "class").unwrap_or_default();
            let mut list: Vec<&str> = classes.split_whitespace().filter(|c| *c != "active").collect();
            if i == active {
                list.push("active");
            }
            let updated = list.join(" ");
            if updated != classes {
                doc.set_attribute(item, "class", &updated);
            }
        }
    }

    fn contains(&self, doc: &Document, target: Id) -> bool {
        target == self.root || doc.is_descendant_of(target, self.root)
    }

    fn navigation_for(&self, doc: &Document, target: Id) -> Option<Navigation> {
        let within = |controls: &[Id]| {
            controls
                .iter()
                .any(|&c| target == c || doc.is_descendant_of(target, c))
        };
        if within(&self.prev) {
            Some(Navigation::Prev)
        } else if within(&self.next) {
            Some(Navigation::Next)
        } else if within(&self.indicators) {
            let index = doc
                .attribute(target, "data-bs-slide-to")
                .and_then(|v| v.trim().parse().ok());
            Some(Navigation::To(index))
        } else {
            None
        }
    }

    /// First manual navigation stops automatic advance for good.
    fn on_manual_navigation(&mut self) {
        if self.state == CarouselState::ManuallyControlled {
            return;
        }
        self.widget.pause();
        let off = self.config.without_autoplay();
        if !self.widget.reconfigure(off) {
            log::debug!(target: "preview", "{}: widget cannot reconfigure, restarting it", self.label);
            let at = self.widget.active_index();
            self.widget.dispose();
            self.widget.start(off);
            self.widget.to(at);
        }
        self.config = off;
        self.state = CarouselState::ManuallyControlled;
        log::info!(target: "preview", "{}: autoplay stopped after manual navigation", self.label);
    }
}

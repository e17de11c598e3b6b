//! Per-page UI state: which tab, panel, FAQ item or dialog is open.
//!
//! All of it lives for one page view. The server reads it from the query
//! string so links work without script; `static/site.js` drives the same
//! toggles in the browser.

pub mod accordion;
pub mod panels;
pub mod reveal;
pub mod schedule;

use serde::Deserialize;

pub use accordion::Accordion;
pub use panels::{Panel, Panels};
pub use reveal::{Reveal, RevealLatch};
pub use schedule::ScheduleTabs;

use crate::site::SiteContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Contact,
    Document,
}

impl Dialog {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contact" => Some(Dialog::Contact),
            "document" => Some(Dialog::Document),
            _ => None,
        }
    }
}

/// Raw query parameters of a page request. Values that do not parse are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UiQuery {
    pub day: Option<String>,
    pub panel: Option<String>,
    pub faq: Option<String>,
    pub dialog: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub schedule: ScheduleTabs,
    pub panels: Panels,
    pub faq: Accordion,
    pub dialog: Option<Dialog>,
    pub reduced_motion: bool,
}

impl UiState {
    pub fn from_query(site: &SiteContent, query: &UiQuery, reduced_motion: bool) -> Self {
        let schedule = ScheduleTabs::new(site, query.day.as_deref());

        let mut panels = Panels::default();
        if let Some(panel) = query.panel.as_deref().and_then(Panel::parse) {
            panels.open(panel);
        }

        let mut faq = Accordion::new(site.faq.items.len());
        if let Some(index) = query.faq.as_deref().and_then(|v| v.parse().ok()) {
            faq.toggle(index);
        }

        let mut ui = Self {
            schedule,
            panels,
            faq,
            dialog: None,
            reduced_motion,
        };

        let dialog = query
            .dialog
            .as_deref()
            .and_then(Dialog::parse)
            .filter(|d| *d != Dialog::Document || site.about.support.is_some());
        if let Some(dialog) = dialog {
            ui.open_dialog(dialog);
        }

        ui
    }

    /// Show `dialog` on top of the page. Open panels close underneath it.
    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.panels.dismiss_all();
        self.dialog = Some(dialog);
    }

    /// A reveal for a card at `index` in its section.
    pub fn reveal(&self, index: usize) -> Reveal {
        let reveal = Reveal::staggered(index);
        if self.reduced_motion {
            reveal.shown()
        } else {
            reveal
        }
    }
}

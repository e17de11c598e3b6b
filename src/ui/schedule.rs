use crate::site::{SiteContent, Weekday};

/// Selected day of the weekly schedule tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTabs {
    selected: Weekday,
}

impl ScheduleTabs {
    /// Select `requested` if the schedule lists it, otherwise the first listed day.
    pub fn new(site: &SiteContent, requested: Option<&str>) -> Self {
        let fallback = site
            .schedule
            .days
            .first()
            .map(|d| d.day)
            .unwrap_or(Weekday::Monday);

        let mut tabs = Self { selected: fallback };
        if let Some(day) = requested.and_then(Weekday::parse) {
            tabs.select(site, day);
        }
        tabs
    }

    pub fn selected(&self) -> Weekday {
        self.selected
    }

    pub fn is_selected(&self, day: Weekday) -> bool {
        self.selected == day
    }

    /// Switch to `day`. Days the schedule does not list leave the selection as is.
    pub fn select(&mut self, site: &SiteContent, day: Weekday) -> bool {
        if site.schedule_day(day).is_none() {
            return false;
        }
        self.selected = day;
        true
    }
}

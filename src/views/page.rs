use askama::Template;
use axum::response::Html;
use chrono::Datelike;

use crate::contact::{ContactSubmission, SubmissionStatus};
use crate::error::AppError;
use crate::site::content::{
    Benefit, FaqItem, InterestOption, ScheduleDay, Testimonial, Trainer, phone_href,
};
use crate::site::{SiteContent, SiteRegistry, structured_data};
use crate::ui::{Dialog, Panel, Reveal, UiState};

/// What the contact forms on the page show.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub values: ContactSubmission,
    pub status: SubmissionStatus,
    pub error: Option<String>,
    /// Seconds until a modal that just succeeded closes itself.
    pub dismiss_after_secs: Option<u64>,
}

impl FormView {
    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == SubmissionStatus::Error
    }

    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}

struct Card<'a, T> {
    item: &'a T,
    reveal: Reveal,
}

struct DayTab<'a> {
    day: &'a ScheduleDay,
    selected: bool,
    href: String,
}

struct FaqRow<'a> {
    item: &'a FaqItem,
    open: bool,
    href: String,
}

struct InterestRow<'a> {
    option: &'a InterestOption,
    selected: bool,
}

struct SiteLink {
    href: String,
    name: String,
    current: bool,
}

#[derive(Template)]
#[template(path = "site/page.html")]
struct SitePageTemplate<'a> {
    site: &'a SiteContent,
    base: String,
    year: i32,
    phone_href: String,
    pricing_phone_href: Option<String>,
    business_json_ld: String,
    faq_json_ld: String,
    menu_open: bool,
    sites_open: bool,
    contact_open: bool,
    document_open: bool,
    refresh: Option<String>,
    section_reveal: Reveal,
    benefits: Vec<Card<'a, Benefit>>,
    testimonials: Vec<Card<'a, Testimonial>>,
    trainers: Vec<Card<'a, Trainer>>,
    days: Vec<DayTab<'a>>,
    selected_day: &'a ScheduleDay,
    faq_items: Vec<FaqRow<'a>>,
    interests: Vec<InterestRow<'a>>,
    sites: Vec<SiteLink>,
    form: FormView,
}

fn cards<'a, T>(items: &'a [T], ui: &UiState) -> Vec<Card<'a, T>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Card {
            item,
            reveal: ui.reveal(i + 1),
        })
        .collect()
}

pub fn render_site_page(
    site: &SiteContent,
    registry: &SiteRegistry,
    ui: &UiState,
    form: FormView,
) -> Result<Html<String>, AppError> {
    let base = format!("/{}/", site.slug);

    let selected_day = site
        .schedule_day(ui.schedule.selected())
        .or_else(|| site.schedule.days.first())
        .ok_or_else(|| AppError::Internal(format!("Site '{}' has no schedule days", site.slug)))?;

    let days = site
        .schedule
        .days
        .iter()
        .map(|day| DayTab {
            day,
            selected: ui.schedule.is_selected(day.day),
            href: format!("{base}?day={}#schedule", day.day.as_str()),
        })
        .collect();

    let faq_items = site
        .faq
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| FaqRow {
            item,
            open: ui.faq.is_open(i),
            href: if ui.faq.is_open(i) {
                format!("{base}#faq")
            } else {
                format!("{base}?faq={i}#faq")
            },
        })
        .collect();

    let interests = site
        .form
        .interests
        .iter()
        .map(|option| InterestRow {
            option,
            selected: option.value == form.values.interest,
        })
        .collect();

    let sites = registry
        .iter()
        .map(|other| SiteLink {
            href: format!("/{}/", other.slug),
            name: other.business.name.clone(),
            current: other.slug == site.slug,
        })
        .collect();

    let refresh = form
        .dismiss_after_secs
        .filter(|_| form.is_success())
        .map(|secs| format!("{secs};url={base}"));

    let template = SitePageTemplate {
        site,
        year: chrono::Local::now().year(),
        phone_href: phone_href(&site.business.phone),
        pricing_phone_href: site
            .pricing
            .as_ref()
            .and_then(|p| p.phone.as_deref())
            .map(phone_href),
        business_json_ld: structured_data::to_script(&structured_data::local_business(site)),
        faq_json_ld: structured_data::to_script(&structured_data::faq_page(site)),
        menu_open: ui.panels.is_open(Panel::Menu),
        sites_open: ui.panels.is_open(Panel::Sites),
        contact_open: ui.dialog == Some(Dialog::Contact),
        document_open: ui.dialog == Some(Dialog::Document),
        refresh,
        section_reveal: ui.reveal(0),
        benefits: cards(&site.benefits.items, ui),
        testimonials: cards(&site.testimonials.items, ui),
        trainers: cards(&site.trainers.items, ui),
        days,
        selected_day,
        faq_items,
        interests,
        sites,
        form,
        base,
    };

    Ok(Html(template.render()?))
}

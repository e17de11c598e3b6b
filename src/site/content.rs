use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contact::FormEndpoint;

static PHONE_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d+]").unwrap());

/// Everything one gym's page shows, loaded from `sites/<slug>.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteContent {
    pub slug: String,
    pub business: Business,
    pub seo: Seo,
    pub nav: Vec<NavLink>,
    pub hero: Hero,
    pub about: About,
    pub benefits: CardSection<Benefit>,
    pub testimonials: CardSection<Testimonial>,
    pub trainers: CardSection<Trainer>,
    pub schedule: Schedule,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    pub faq: Faq,
    pub contact: ContactSection,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub sponsors: Vec<Image>,
    pub footer: Footer,
    pub form: FormSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Business {
    pub name: String,
    /// Wordmark shown when there is no logo image.
    pub wordmark: String,
    #[serde(default)]
    pub logo: Option<Image>,
    pub address: Address,
    #[serde(default)]
    pub legal_line: Option<String>,
    pub phone: String,
    /// Human-readable hours, e.g. "Po-So: 9:00 - 20:00".
    pub hours: String,
    /// schema.org openingHours entries, e.g. "Mo-Fr 9:00-20:00".
    #[serde(default)]
    pub opening_hours: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Address {
    pub street: String,
    pub locality: String,
    pub postal_code: String,
    pub country: String,
    pub display: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub canonical_url: String,
    #[serde(default)]
    pub og_image: Option<String>,
    pub lang: String,
    pub locale: String,
    #[serde(default)]
    pub twitter_site: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavLink {
    pub anchor: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hero {
    pub headline: String,
    pub lead: String,
    pub cta: String,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub badge: Option<Image>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct About {
    pub heading: String,
    pub body: Vec<String>,
    #[serde(default)]
    pub support: Option<SupportDocument>,
}

/// A document shown in a dialog from the about section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupportDocument {
    pub caption: String,
    pub button: String,
    pub title: String,
    pub image: Image,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardSection<T> {
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Benefit {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Testimonial {
    pub name: String,
    pub tenure: String,
    pub quote: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

impl Testimonial {
    /// Avatar letters: first letter of the first and last word of the name.
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        let first = words.next().and_then(|w| w.chars().next());
        let last = words.last().and_then(|w| w.chars().next());
        first
            .into_iter()
            .chain(last)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn stars(&self) -> String {
        "★".repeat(usize::from(self.rating.min(5)))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Trainer {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo: Option<Image>,
    #[serde(default)]
    pub flag: Option<Image>,
    #[serde(default)]
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Schedule {
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub cta: Option<String>,
    pub days: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleDay {
    pub day: Weekday,
    /// Tab label, e.g. "Po".
    pub short_label: String,
    pub label: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub closed: Option<ClosedNote>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Session {
    pub name: String,
    pub audience: String,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClosedNote {
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pricing {
    pub heading: String,
    #[serde(default)]
    pub intro: Option<String>,
    pub columns: PricingColumns,
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingColumns {
    pub days: String,
    pub time: String,
    pub monthly: String,
    pub single: String,
    pub group: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Plan {
    pub group: String,
    pub days: String,
    pub time: String,
    #[serde(default)]
    pub monthly: Option<String>,
    pub single: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Faq {
    pub heading: String,
    #[serde(default)]
    pub intro: Option<String>,
    pub items: Vec<FaqItem>,
    #[serde(default)]
    pub cta: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactSection {
    pub heading: String,
    pub lead: String,
    pub directions_heading: String,
    pub directions_intro: String,
    #[serde(default)]
    pub directions: Vec<String>,
    #[serde(default)]
    pub parking: Option<String>,
    #[serde(default)]
    pub map_embed_url: Option<String>,
    #[serde(default)]
    pub map_title: Option<String>,
    #[serde(default)]
    pub cta: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    Telegram,
    Facebook,
    Instagram,
    Other,
}

impl SocialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialKind::Telegram => "telegram",
            SocialKind::Facebook => "facebook",
            SocialKind::Instagram => "instagram",
            SocialKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub url: String,
    pub handle: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Footer {
    pub blurb: String,
    pub quick_links_heading: String,
    pub contact_heading: String,
    #[serde(default)]
    pub legal_links: Vec<NavLink>,
    pub rights: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormSettings {
    pub endpoint: FormEndpoint,
    pub interests: Vec<InterestOption>,
    #[serde(default)]
    pub honeypot: Option<String>,
    #[serde(default)]
    pub copy: FormCopy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterestOption {
    pub value: String,
    pub label: String,
}

/// Form labels and status messages. Defaults are the Czech copy the gyms use.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormCopy {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub interest_placeholder: String,
    pub message: String,
    pub submit: String,
    pub submitting: String,
    pub success: String,
    pub fallback_error: String,
}

impl Default for FormCopy {
    fn default() -> Self {
        Self {
            title: "Kontaktujte nás".to_string(),
            first_name: "Jméno".to_string(),
            last_name: "Příjmení".to_string(),
            email: "Email".to_string(),
            phone: "Telefon".to_string(),
            interest_placeholder: "Vyberte zájem".to_string(),
            message: "Zpráva".to_string(),
            submit: "Odeslat".to_string(),
            submitting: "Odesílání...".to_string(),
            success: "Děkujeme za zprávu! Ozveme se vám co nejdříve.".to_string(),
            fallback_error: "Nastala chyba při odesílání. Zkuste to prosím znovu.".to_string(),
        }
    }
}

impl SiteContent {
    /// Anchors of the sections the page renders, in page order.
    pub fn section_ids(&self) -> Vec<&'static str> {
        let mut ids = vec!["about", "benefits", "testimonials", "trainers", "schedule"];
        if self.pricing.is_some() {
            ids.push("pricing");
        }
        ids.extend(["faq", "contact"]);
        ids
    }

    pub fn interest(&self, value: &str) -> Option<&InterestOption> {
        self.form.interests.iter().find(|option| option.value == value)
    }

    pub fn schedule_day(&self, day: Weekday) -> Option<&ScheduleDay> {
        self.schedule.days.iter().find(|d| d.day == day)
    }
}

/// `tel:` link target with spacing and punctuation removed.
pub fn phone_href(phone: &str) -> String {
    format!("tel:{}", PHONE_NOISE_RE.replace_all(phone, ""))
}

use std::path::Path;

use gymsite::contact::{ResponseContract, ServiceVerdict};
use gymsite::site::content::{InterestOption, phone_href};
use gymsite::site::structured_data::{faq_page, local_business, to_script};
use gymsite::site::{ContentError, SiteContent, SiteRegistry, Weekday};
use gymsite::ui::{Accordion, Dialog, Panel, Panels, Reveal, RevealLatch, ScheduleTabs, UiQuery, UiState};
use serde_json::json;

fn bundled() -> SiteRegistry {
    SiteRegistry::load_dir(Path::new("sites")).expect("bundled sites load")
}

fn boxing() -> SiteContent {
    (*bundled().get("velozo-boxing").unwrap()).clone()
}

fn mma() -> SiteContent {
    (*bundled().get("czech-eagles-mma").unwrap()).clone()
}

fn invalid_reason(site: SiteContent) -> String {
    match SiteRegistry::from_sites(vec![site]) {
        Err(ContentError::Invalid { reason, .. }) => reason,
        other => panic!("expected Invalid, got {other:?}"),
    }
}

// ── Registry ────────────────────────────────────────────────────

#[test]
fn bundled_sites_load() {
    let sites = bundled();
    assert_eq!(sites.len(), 2);
    let slugs: Vec<&str> = sites.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, ["czech-eagles-mma", "velozo-boxing"]);
    assert!(sites.get("karate").is_none());
}

#[test]
fn empty_directory_is_an_error() {
    let dir = std::env::temp_dir().join(format!("gymsite-empty-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let err = SiteRegistry::load_dir(&dir).unwrap_err();
    assert!(matches!(err, ContentError::NoSites(_)));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn duplicate_slug_is_rejected() {
    let err = SiteRegistry::from_sites(vec![boxing(), boxing()]).unwrap_err();
    assert!(matches!(err, ContentError::DuplicateSlug(slug) if slug == "velozo-boxing"));
}

#[test]
fn bad_slug_is_rejected() {
    let mut site = boxing();
    site.slug = "Velozo Boxing".to_string();
    assert!(invalid_reason(site).contains("slug"));
}

#[test]
fn nav_must_point_at_rendered_sections() {
    let mut site = boxing();
    site.pricing = None;
    assert!(invalid_reason(site).contains("#pricing"));
}

#[test]
fn duplicate_interest_is_rejected() {
    let mut site = mma();
    site.form.interests.push(InterestOption {
        value: "bjj".to_string(),
        label: "BJJ znovu".to_string(),
    });
    assert!(invalid_reason(site).contains("'bjj'"));
}

#[test]
fn endpoint_must_be_http() {
    let mut site = boxing();
    site.form.endpoint.url = "ftp://forms.example/f/1".to_string();
    assert!(invalid_reason(site).contains("endpoint"));

    let mut site = boxing();
    site.form.endpoint.url = "/f/relative".to_string();
    assert!(invalid_reason(site).contains("endpoint"));
}

#[test]
fn response_paths_must_name_a_field() {
    for path in ["", ".", "data..ok", "ok."] {
        let mut site = boxing();
        site.form.endpoint.response.ack_field = path.to_string();
        assert!(invalid_reason(site).contains("ack_field"), "path {path:?}");
    }

    let mut site = boxing();
    site.form.endpoint.response.errors_field = String::new();
    assert!(invalid_reason(site).contains("errors_field"));

    let mut site = boxing();
    site.form.endpoint.response.message_field = "..".to_string();
    assert!(invalid_reason(site).contains("message_field"));

    let mut site = boxing();
    site.form.endpoint.response.ack_field = "data.ok".to_string();
    assert!(SiteRegistry::from_sites(vec![site]).is_ok());
}

#[test]
fn empty_ack_path_never_accepts() {
    let contract = ResponseContract {
        ack_field: String::new(),
        ..ResponseContract::default()
    };
    let body = json!({ "errors": [{ "message": "Invalid email" }] });
    assert_eq!(
        contract.interpret(&body),
        ServiceVerdict::Rejected(Some("Invalid email".to_string()))
    );
}

#[test]
fn dotted_contract_paths() {
    let contract = ResponseContract {
        ack_field: "data.ok".to_string(),
        errors_field: "data.problems".to_string(),
        message_field: "text".to_string(),
    };
    assert_eq!(contract.interpret(&json!({ "data": { "ok": 1 } })), ServiceVerdict::Accepted);
    assert_eq!(
        contract.interpret(&json!({ "data": { "ok": 0, "problems": [{ "text": "Plno" }] } })),
        ServiceVerdict::Rejected(Some("Plno".to_string()))
    );
    assert_eq!(
        contract.interpret(&json!({ "ok": true })),
        ServiceVerdict::Rejected(None)
    );
}

#[test]
fn interest_lookup_is_per_site() {
    assert!(boxing().interest("kids").is_some());
    assert!(boxing().interest("bjj").is_none());
    assert!(mma().interest("bjj").is_some());
}

// ── Content helpers ─────────────────────────────────────────────

#[test]
fn phone_href_strips_formatting() {
    assert_eq!(phone_href("+420 603 586 073"), "tel:+420603586073");
    assert_eq!(phone_href("778-425 (965)"), "tel:778425965");
}

#[test]
fn testimonial_initials_and_stars() {
    let site = boxing();
    let first = &site.testimonials.items[0];
    assert_eq!(first.name, "Jan Novák");
    assert_eq!(first.initials(), "JN");
    assert_eq!(first.stars().chars().count(), 5);
}

#[test]
fn section_ids_follow_pricing() {
    assert!(boxing().section_ids().contains(&"pricing"));
    assert!(!mma().section_ids().contains(&"pricing"));
}

#[test]
fn weekday_parse_is_case_insensitive() {
    assert_eq!(Weekday::parse("Sunday"), Some(Weekday::Sunday));
    assert_eq!(Weekday::parse("nedele"), None);
}

// ── Structured data ─────────────────────────────────────────────

#[test]
fn local_business_carries_contact_details() {
    let data = local_business(&boxing());
    assert_eq!(data["@type"], "SportsActivityLocation");
    assert_eq!(data["name"], "VELOZO Team Boxing Teplice");
    assert_eq!(data["address"]["postalCode"], "415 01");
    assert!(data["sameAs"].as_array().is_some_and(|links| !links.is_empty()));
}

#[test]
fn faq_page_lists_every_question() {
    let site = mma();
    let data = faq_page(&site);
    let entities = data["mainEntity"].as_array().unwrap();
    assert_eq!(entities.len(), site.faq.items.len());
    assert_eq!(entities[0]["acceptedAnswer"]["@type"], "Answer");
}

#[test]
fn script_body_cannot_close_the_element() {
    let script = to_script(&json!({ "text": "a </script><script>alert(1)" }));
    assert!(!script.contains("</script>"));
    assert!(script.contains("<\\/script>"));
}

// ── Schedule tabs ───────────────────────────────────────────────

#[test]
fn schedule_selects_requested_day() {
    let site = boxing();
    let tabs = ScheduleTabs::new(&site, Some("friday"));
    assert_eq!(tabs.selected(), Weekday::Friday);
    assert!(tabs.is_selected(Weekday::Friday));
    assert!(!tabs.is_selected(Weekday::Monday));
}

#[test]
fn schedule_falls_back_to_first_listed_day() {
    let mut site = boxing();
    site.schedule.days.retain(|d| d.day != Weekday::Monday);

    assert_eq!(ScheduleTabs::new(&site, None).selected(), Weekday::Tuesday);
    assert_eq!(ScheduleTabs::new(&site, Some("monday")).selected(), Weekday::Tuesday);
    assert_eq!(ScheduleTabs::new(&site, Some("garbage")).selected(), Weekday::Tuesday);

    let mut tabs = ScheduleTabs::new(&site, None);
    assert!(!tabs.select(&site, Weekday::Monday));
    assert!(tabs.select(&site, Weekday::Sunday));
    assert_eq!(tabs.selected(), Weekday::Sunday);
}

// ── Accordion & panels ──────────────────────────────────────────

#[test]
fn accordion_keeps_one_item_open() {
    let mut faq = Accordion::new(4);
    assert_eq!(faq.open_item(), None);

    faq.toggle(1);
    assert!(faq.is_open(1));

    faq.toggle(3);
    assert_eq!(faq.open_item(), Some(3));
    assert!(!faq.is_open(1));

    faq.toggle(3);
    assert_eq!(faq.open_item(), None);
}

#[test]
fn accordion_ignores_out_of_range() {
    let mut faq = Accordion::new(2);
    faq.toggle(0);
    faq.toggle(2);
    assert_eq!(faq.open_item(), Some(0));

    let mut empty = Accordion::new(0);
    empty.toggle(0);
    assert_eq!(empty.open_item(), None);
}

#[test]
fn panels_are_mutually_exclusive() {
    let mut panels = Panels::default();
    panels.open(Panel::Menu);
    assert!(panels.is_open(Panel::Menu));

    panels.open(Panel::Sites);
    assert!(panels.is_open(Panel::Sites));
    assert!(!panels.is_open(Panel::Menu));

    panels.dismiss_all();
    assert_eq!(panels, Panels::default());
}

#[test]
fn opening_a_dialog_closes_panels() {
    let site = boxing();
    let query = UiQuery {
        panel: Some("sites".to_string()),
        dialog: Some("contact".to_string()),
        ..UiQuery::default()
    };
    let ui = UiState::from_query(&site, &query, false);
    assert_eq!(ui.dialog, Some(Dialog::Contact));
    assert_eq!(ui.panels, Panels::default());

    let menu = UiQuery {
        panel: Some("menu".to_string()),
        ..UiQuery::default()
    };
    let mut ui = UiState::from_query(&site, &menu, false);
    assert!(ui.panels.is_open(Panel::Menu));
    ui.open_dialog(Dialog::Contact);
    assert!(!ui.panels.is_open(Panel::Menu));
}

// ── Reveal ──────────────────────────────────────────────────────

#[test]
fn reveal_latch_fires_once() {
    let mut latch = RevealLatch::default();
    assert!(!latch.observe(false));
    assert!(latch.observe(true));
    assert!(latch.has_animated());
    // Leaving and re-entering the viewport does not replay it.
    assert!(!latch.observe(false));
    assert!(!latch.observe(true));
    assert!(latch.has_animated());
}

#[test]
fn reveal_is_staggered() {
    assert_eq!(Reveal::staggered(0).delay_ms, 0);
    assert_eq!(Reveal::staggered(3).delay_ms, 300);
    assert_eq!(Reveal::staggered(2).class(), "reveal");
    assert_eq!(Reveal::staggered(2).shown().class(), "reveal is-visible");
}

// ── Query-driven UI state ───────────────────────────────────────

#[test]
fn ui_state_from_query() {
    let site = boxing();
    let query = UiQuery {
        day: Some("wednesday".to_string()),
        panel: Some("menu".to_string()),
        faq: Some("1".to_string()),
        dialog: None,
    };
    let ui = UiState::from_query(&site, &query, false);

    assert_eq!(ui.schedule.selected(), Weekday::Wednesday);
    assert!(ui.panels.is_open(Panel::Menu));
    assert!(ui.faq.is_open(1));
    assert_eq!(ui.dialog, None);
    assert_eq!(ui.reveal(1).class(), "reveal");
}

#[test]
fn ui_state_ignores_junk() {
    let mut site = boxing();
    site.about.support = None;
    let query = UiQuery {
        day: Some("funday".to_string()),
        panel: Some("cart".to_string()),
        faq: Some("abc".to_string()),
        dialog: Some("document".to_string()),
    };
    let ui = UiState::from_query(&site, &query, true);

    assert_eq!(ui.schedule.selected(), Weekday::Monday);
    assert_eq!(ui.panels, Panels::default());
    assert_eq!(ui.faq.open_item(), None);
    assert_eq!(ui.dialog, None);
    assert_eq!(ui.reveal(1).class(), "reveal is-visible");
}

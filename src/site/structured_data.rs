//! schema.org JSON-LD blocks embedded in the page head.

use serde_json::{Value, json};

use super::SiteContent;

pub fn local_business(site: &SiteContent) -> Value {
    let address = &site.business.address;
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "SportsActivityLocation",
        "name": site.business.name,
        "description": site.seo.description,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": address.street,
            "addressLocality": address.locality,
            "postalCode": address.postal_code,
            "addressCountry": address.country,
        },
        "telephone": site.business.phone,
        "openingHours": site.business.opening_hours,
        "url": site.seo.canonical_url,
    });

    if let Some(image) = &site.seo.og_image {
        data["image"] = json!(absolute_url(&site.seo.canonical_url, image));
    }

    let same_as: Vec<&str> = site.social.iter().map(|s| s.url.as_str()).collect();
    if !same_as.is_empty() {
        data["sameAs"] = json!(same_as);
    }

    data
}

pub fn faq_page(site: &SiteContent) -> Value {
    let entities: Vec<Value> = site
        .faq
        .items
        .iter()
        .map(|item| {
            json!({
                "@type": "Question",
                "name": item.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": item.answer,
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// Serialize for a `<script type="application/ld+json">` body.
pub fn to_script(value: &Value) -> String {
    // A literal "</" would end the script element early.
    value.to_string().replace("</", "<\\/")
}

fn absolute_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

use askama::Template;
use axum::response::Html;

use crate::error::AppError;
use crate::site::SiteRegistry;

struct SiteRow {
    href: String,
    name: String,
    tagline: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    rows: Vec<SiteRow>,
}

pub fn render_index(sites: &SiteRegistry) -> Result<Html<String>, AppError> {
    let rows = sites
        .iter()
        .map(|site| SiteRow {
            href: format!("/{}/", site.slug),
            name: site.business.name.clone(),
            tagline: site.hero.lead.clone(),
        })
        .collect();

    Ok(Html(IndexTemplate { rows }.render()?))
}

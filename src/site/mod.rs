pub mod content;
pub mod structured_data;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;

pub use content::{SiteContent, Weekday};

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").unwrap());

#[derive(Debug)]
pub enum ContentError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid { slug: String, reason: String },
    DuplicateSlug(String),
    NoSites(PathBuf),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Io { path, source } => write!(f, "Cannot read {}: {source}", path.display()),
            ContentError::Parse { path, source } => {
                write!(f, "Invalid site content in {}: {source}", path.display())
            }
            ContentError::Invalid { slug, reason } => write!(f, "Site '{slug}': {reason}"),
            ContentError::DuplicateSlug(slug) => write!(f, "Site slug '{slug}' is defined twice"),
            ContentError::NoSites(dir) => write!(f, "No site content found in {}", dir.display()),
        }
    }
}

impl std::error::Error for ContentError {}

/// All gyms served by this process, keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: BTreeMap<String, Arc<SiteContent>>,
}

impl SiteRegistry {
    /// Load every `*.json` file in `dir` as one site.
    pub fn load_dir(dir: &Path) -> Result<Self, ContentError> {
        let entries = std::fs::read_dir(dir).map_err(|source| ContentError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sites = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            let site: SiteContent =
                serde_json::from_str(&raw).map_err(|source| ContentError::Parse { path: path.clone(), source })?;
            tracing::debug!("Loaded site '{}' from {}", site.slug, path.display());
            sites.push(site);
        }

        if sites.is_empty() {
            return Err(ContentError::NoSites(dir.to_path_buf()));
        }

        Self::from_sites(sites)
    }

    pub fn from_sites(sites: Vec<SiteContent>) -> Result<Self, ContentError> {
        let mut map = BTreeMap::new();
        for site in sites {
            validate(&site)?;
            if map.contains_key(&site.slug) {
                return Err(ContentError::DuplicateSlug(site.slug));
            }
            map.insert(site.slug.clone(), Arc::new(site));
        }
        Ok(Self { sites: map })
    }

    pub fn get(&self, slug: &str) -> Option<Arc<SiteContent>> {
        self.sites.get(slug).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SiteContent>> {
        self.sites.values()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

fn validate(site: &SiteContent) -> Result<(), ContentError> {
    let invalid = |reason: String| ContentError::Invalid {
        slug: site.slug.clone(),
        reason,
    };

    if !SLUG_RE.is_match(&site.slug) {
        return Err(invalid("slug must be lowercase letters, digits and dashes".to_string()));
    }

    let url = &site.form.endpoint.url;
    let scheme_ok = url
        .parse::<reqwest::Url>()
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host());
    if !scheme_ok {
        return Err(invalid(format!("form endpoint '{url}' is not an absolute http(s) URL")));
    }

    let contract = &site.form.endpoint.response;
    for (name, path) in [
        ("ack_field", &contract.ack_field),
        ("errors_field", &contract.errors_field),
        ("message_field", &contract.message_field),
    ] {
        // An empty segment would resolve to the enclosing object.
        if path.split('.').any(str::is_empty) {
            return Err(invalid(format!("response {name} '{path}' is not a dotted field path")));
        }
    }

    if site.form.interests.is_empty() {
        return Err(invalid("form needs at least one interest".to_string()));
    }
    let mut seen = HashSet::new();
    for option in &site.form.interests {
        if option.value.is_empty() {
            return Err(invalid("interest values must not be empty".to_string()));
        }
        if !seen.insert(option.value.as_str()) {
            return Err(invalid(format!("interest '{}' is listed twice", option.value)));
        }
    }

    if site.schedule.days.is_empty() {
        return Err(invalid("schedule has no days".to_string()));
    }
    let mut days = HashSet::new();
    for day in &site.schedule.days {
        if !days.insert(day.day) {
            return Err(invalid(format!("schedule lists {} twice", day.day.as_str())));
        }
    }

    let sections = site.section_ids();
    for link in &site.nav {
        if !sections.contains(&link.anchor.as_str()) {
            return Err(invalid(format!("nav link '#{}' has no matching section", link.anchor)));
        }
    }

    Ok(())
}

use std::sync::Arc;

use crate::config::Config;
use crate::contact::client::FormService;
use crate::rate_limit::{ContactRateLimiter, InFlightGuard};
use crate::site::SiteRegistry;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub sites: SiteRegistry,
    pub forms: Arc<dyn FormService>,
    pub contact_limiter: ContactRateLimiter,
    pub in_flight: InFlightGuard,
}

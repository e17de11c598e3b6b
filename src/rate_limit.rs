use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Per-IP-per-site contact submission limiter using a fixed window.
pub struct ContactRateLimiter {
    /// (site slug, ip) -> (count, window_start)
    entries: DashMap<(String, IpAddr), (u32, Instant)>,
}

impl ContactRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if a submission is allowed. Returns Ok(()) or Err with retry-after seconds.
    pub fn check(&self, site: &str, ip: IpAddr, limit: u32, window_secs: u64) -> Result<(), u64> {
        let key = (site.to_string(), ip);
        let window = Duration::from_secs(window_secs);
        let now = Instant::now();

        let mut entry = self.entries.entry(key).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > window {
            *count = 1;
            *start = now;
            return Ok(());
        }

        if *count >= limit {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(window_secs.saturating_sub(elapsed).max(1));
        }

        *count += 1;
        Ok(())
    }

    /// Remove stale entries older than the given duration.
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}

impl Default for ContactRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks contact submissions currently being relayed, one per (site, ip).
#[derive(Clone, Default)]
pub struct InFlightGuard {
    entries: Arc<DashMap<(String, IpAddr), ()>>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for (site, ip). `None` while another submission holds it.
    pub fn try_acquire(&self, site: &str, ip: IpAddr) -> Option<InFlightTicket> {
        let key = (site.to_string(), ip);
        match self.entries.entry(key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => None,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlightTicket {
                    entries: Arc::clone(&self.entries),
                    key,
                })
            }
        }
    }
}

/// Releases its slot when dropped.
pub struct InFlightTicket {
    entries: Arc<DashMap<(String, IpAddr), ()>>,
    key: (String, IpAddr),
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.entries.remove(&self.key);
    }
}

//! One fetcher per upstream hazard feed.
//!
//! Every fetcher splits transport from normalization: `fetch` does the HTTP
//! work and hands the raw payload to a pure `parse_*` function, so the same
//! payload always normalizes to the same events (ids and "now" fallbacks aside).

use tracing::warn;

use crate::error::Result;
use crate::models::{HazardEvent, HazardType};

pub mod earthquake;
pub mod flood;
pub mod tsunami;
pub mod weather;
pub mod wildfire;

pub use earthquake::EarthquakeSource;
pub use flood::FloodSource;
pub use tsunami::TsunamiSource;
pub use weather::WeatherSource;
pub use wildfire::WildfireSource;

/// Upper bound on events a single source contributes per pass.
pub const MAX_EVENTS_PER_SOURCE: usize = 100;

#[allow(async_fn_in_trait)]
pub trait HazardSource {
    fn kind(&self) -> HazardType;

    /// Fetch and normalize. `Err` means the whole source is unavailable.
    async fn fetch(&self) -> Result<Vec<HazardEvent>>;

    /// Failure-isolated variant: logs and yields no events instead of failing.
    async fn fetch_or_empty(&self) -> Vec<HazardEvent> {
        match self.fetch().await {
            Ok(events) => events,
            Err(e) => {
                warn!(source = self.kind().label(), error = %e, "hazard source unavailable");
                Vec::new()
            }
        }
    }
}

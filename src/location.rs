//! Location directory types and free-tier filtering.

use crate::error::Error;
use serde::Deserialize;

/// A region entry from `/api/location/list/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: String,
    /// Region code used when requesting servers.
    pub region: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country_code: String,
    /// 0 for public locations.
    #[serde(rename = "type", default)]
    pub kind: i64,
    /// 0 for free-tier locations.
    #[serde(default)]
    pub proxy_type: i64,
}

impl Location {
    /// Whether this location is usable without a paid subscription.
    pub fn is_free(&self) -> bool {
        self.proxy_type == 0
    }
}

/// A country name lookup entry accompanying the location list.
#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

/// Payload of a successful `/api/location/list/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationList {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub countries: Vec<Country>,
}

impl LocationList {
    /// Locations eligible for scanning. An empty free-tier set is fatal:
    /// it fails here, before any server-list request is made.
    pub fn free_locations(&self) -> Result<Vec<Location>, Error> {
        let free: Vec<Location> =
            self.locations.iter().filter(|l| l.is_free()).cloned().collect();
        if free.is_empty() {
            return Err(Error::NoFreeLocations);
        }
        Ok(free)
    }

    /// Display name for a location, falling back to the raw region code when
    /// its country code is missing from the lookup. Cosmetic only.
    pub fn country_name(&self, location: &Location) -> String {
        self.countries
            .iter()
            .find(|c| c.code == location.country_code)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| location.region.clone())
    }
}

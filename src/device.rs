//! Synthetic device identity used for anonymous registration.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Registration payload describing the (synthetic) device.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub udid: String,
    pub app_version: String,
    pub platform: String,
    pub platform_version: String,
    pub time_zone: String,
    pub device_name: String,
}

impl DeviceInfo {
    /// Synthesize a device identity with a fresh random udid.
    ///
    /// The udid is a v4 UUID built from the supplied rng so tests can
    /// make it deterministic.
    pub fn generate(rng: &mut dyn RngCore, app_version: &str, user_agent: &str) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let udid = uuid::Builder::from_random_bytes(bytes).into_uuid();

        Self {
            udid: udid.to_string(),
            app_version: app_version.to_string(),
            platform: "chrome".to_string(),
            platform_version: user_agent.to_string(),
            time_zone: local_time_zone(),
            device_name: "Chrome 120.0.0.0".to_string(),
        }
    }
}

/// IANA timezone name of the host, or "UTC" when it cannot be determined.
///
/// Honors `TZ` when set, otherwise follows the `/etc/localtime` link into
/// the zoneinfo database.
fn local_time_zone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() {
            return tz;
        }
    }
    std::fs::read_link("/etc/localtime")
        .ok()
        .and_then(|path| zone_from_localtime_link(&path))
        .unwrap_or_else(|| "UTC".to_string())
}

/// Extract the zone name from a zoneinfo path, e.g.
/// `/usr/share/zoneinfo/Europe/Berlin` -> `Europe/Berlin`.
fn zone_from_localtime_link(path: &std::path::Path) -> Option<String> {
    let path = path.to_str()?;
    let (_, zone) = path.split_once("zoneinfo/")?;
    if zone.is_empty() {
        return None;
    }
    Some(zone.to_string())
}

/// Tokens issued by the registration endpoint. The refresh token is kept
/// for completeness but never used after issuance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    #[test]
    fn udid_is_a_valid_v4_uuid() {
        let mut rng = StdRng::seed_from_u64(7);
        let info = DeviceInfo::generate(&mut rng, "3.7.8", "test-agent");
        let parsed = Uuid::parse_str(&info.udid).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(info.platform, "chrome");
        assert_eq!(info.platform_version, "test-agent");
    }

    #[test]
    fn udid_is_deterministic_under_a_seeded_rng() {
        let a = DeviceInfo::generate(&mut StdRng::seed_from_u64(42), "3.7.8", "ua");
        let b = DeviceInfo::generate(&mut StdRng::seed_from_u64(42), "3.7.8", "ua");
        let c = DeviceInfo::generate(&mut StdRng::seed_from_u64(43), "3.7.8", "ua");
        assert_eq!(a.udid, b.udid);
        assert_ne!(a.udid, c.udid);
    }

    #[test]
    fn zone_name_extracted_from_zoneinfo_path() {
        let path = std::path::Path::new("/usr/share/zoneinfo/Europe/Berlin");
        assert_eq!(zone_from_localtime_link(path).as_deref(), Some("Europe/Berlin"));

        let bare = std::path::Path::new("/etc/something-else");
        assert_eq!(zone_from_localtime_link(bare), None);
    }

    #[test]
    fn time_zone_is_always_populated() {
        let mut rng = StdRng::seed_from_u64(2);
        let info = DeviceInfo::generate(&mut rng, "3.7.8", "ua");
        assert!(!info.time_zone.is_empty());
    }

    #[test]
    fn payload_serializes_camel_case() {
        let mut rng = StdRng::seed_from_u64(1);
        let info = DeviceInfo::generate(&mut rng, "3.7.8", "ua");
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("appVersion").is_some());
        assert!(json.get("platformVersion").is_some());
        assert!(json.get("timeZone").is_some());
        assert!(json.get("deviceName").is_some());
    }
}

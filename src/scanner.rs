//! Scan-and-select loop for finding the best available proxy server.
//!
//! Locations are tried in a shuffled order, each under a fixed protocol
//! order. The first unauthenticated server wins outright and ends the scan;
//! failing that, the first authenticated server seen anywhere is used as a
//! fallback. Individual attempt failures never abort the scan.

use crate::api::ServerDirectory;
use crate::config::FetchConfig;
use crate::error::Error;
use crate::location::Location;
use crate::proxy::Server;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

/// A server recorded during the scan, together with the protocol it was
/// found under.
#[derive(Debug, Clone)]
pub struct ScanCandidate {
    pub server: Server,
    pub protocol: String,
}

impl ScanCandidate {
    /// Whether the recorded server requires no credentials.
    pub fn is_unauthenticated(&self) -> bool {
        self.server.is_unauthenticated()
    }
}

/// Two-slot accumulator holding the scan result.
///
/// `best` is the first unauthenticated server found and terminates the scan.
/// `fallback` is the first authenticated server seen; it is never overwritten
/// by a later authenticated find and never cleared by failed attempts.
#[derive(Debug, Default)]
pub struct CandidateSlots {
    best: Option<ScanCandidate>,
    fallback: Option<ScanCandidate>,
}

impl CandidateSlots {
    /// Record an unauthenticated find. Always wins.
    pub fn record_unauthenticated(&mut self, candidate: ScanCandidate) {
        self.best = Some(candidate);
    }

    /// Record an authenticated fallback. First-found-wins; ignored once any
    /// candidate is held.
    pub fn record_fallback(&mut self, candidate: ScanCandidate) {
        if self.best.is_none() && self.fallback.is_none() {
            self.fallback = Some(candidate);
        }
    }

    /// Whether an unauthenticated server has been found.
    pub fn has_best(&self) -> bool {
        self.best.is_some()
    }

    /// The scan result: the unauthenticated find if any, else the fallback.
    pub fn resolve(self) -> Option<ScanCandidate> {
        self.best.or(self.fallback)
    }
}

/// Scan up to `min(|locations|, max_scan_attempts)` shuffled locations for a
/// proxy server, probing each protocol in the configured order.
///
/// Attempt failures (transport errors, bad statuses, malformed bodies) are
/// logged and swallowed. Fails with `NoProxyFound` only when no attempt ever
/// produced a server.
pub async fn scan<D, R>(
    directory: &D,
    token: &str,
    free_locations: &[Location],
    config: &FetchConfig,
    rng: &mut R,
) -> Result<ScanCandidate, Error>
where
    D: ServerDirectory + ?Sized,
    R: Rng + ?Sized,
{
    if free_locations.is_empty() {
        return Err(Error::NoFreeLocations);
    }

    let mut shuffled = free_locations.to_vec();
    shuffled.shuffle(rng);
    let attempts = shuffled.len().min(config.max_scan_attempts);

    info!("scanning up to {} locations for an unauthenticated proxy", attempts);

    let mut slots = CandidateSlots::default();

    for location in shuffled.iter().take(attempts) {
        for protocol in &config.protocols {
            match directory.server_list(token, protocol, location).await {
                Ok(servers) if !servers.is_empty() => {
                    if let Some(unauth) = servers.iter().find(|s| s.is_unauthenticated()) {
                        info!(
                            "found unauthenticated proxy in {} ({})",
                            location.region, protocol
                        );
                        slots.record_unauthenticated(ScanCandidate {
                            server: unauth.clone(),
                            protocol: protocol.clone(),
                        });
                        // Escapes the protocol loop only; the location loop
                        // re-checks below.
                        break;
                    }
                    slots.record_fallback(ScanCandidate {
                        server: servers[0].clone(),
                        protocol: protocol.clone(),
                    });
                }
                Ok(_) => {
                    debug!("no servers in {} ({})", location.region, protocol);
                }
                Err(err) => {
                    debug!("scan attempt failed in {} ({}): {}", location.region, protocol, err);
                }
            }
        }
        if slots.has_best() {
            break;
        }
    }

    slots.resolve().ok_or(Error::NoProxyFound)
}

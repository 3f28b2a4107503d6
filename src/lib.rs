//! # vpn-proxy-fetch
//!
//! A single-run client for a VPN provider's HTTP API: registers an anonymous
//! device, lists free-tier locations, scans them for an unauthenticated proxy
//! server (falling back to an authenticated one), and verifies the selected
//! proxy with a test request routed through it.

pub mod api;
pub mod config;
pub mod device;
pub mod error;
pub mod location;
pub mod proxy;
pub mod scanner;
pub mod verify;

pub use api::{ApiClient, ServerDirectory};
pub use config::{FetchConfig, FetchConfigBuilder};
pub use device::{DeviceInfo, Tokens};
pub use error::Error;
pub use location::{Country, Location, LocationList};
pub use proxy::{SelectedProxy, Server};
pub use scanner::{scan, CandidateSlots, ScanCandidate};
pub use verify::verify_proxy;

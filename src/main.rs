//! Binary entry point: the linear registration → locations → scan → verify run.

use log::{error, info, warn};
use rand::Rng;
use std::process::ExitCode;

use vpn_proxy_fetch::{
    scan, verify_proxy, ApiClient, DeviceInfo, Error, FetchConfig, SelectedProxy,
};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = FetchConfig::default();
    let client = ApiClient::new(&config)?;
    let mut rng = rand::rng();

    info!("registering device anonymously");
    let device = DeviceInfo::generate(&mut rng, &config.app_version, &config.user_agent);
    let tokens = client.register(&device).await?;
    info!("got access token");

    info!("fetching available locations");
    let directory = client.locations(&tokens.access_token).await?;
    let free_locations = directory.free_locations()?;

    let picked = &free_locations[rng.random_range(0..free_locations.len())];
    info!(
        "{} free locations, e.g. {} ({})",
        free_locations.len(),
        directory.country_name(picked),
        picked.region
    );

    let candidate = scan(&client, &tokens.access_token, &free_locations, &config, &mut rng).await?;
    if !candidate.is_unauthenticated() {
        warn!("no unauthenticated proxy found after scanning, using an authenticated one");
    }

    let proxy = SelectedProxy::from_server(&candidate.server, &candidate.protocol)
        .ok_or(Error::NoProxyFound)?;
    let proxy_url = proxy.url();

    info!("verifying proxy connection");
    if verify_proxy(&proxy_url, &config.verify_url, config.request_timeout).await {
        info!("proxy verification successful");
    } else {
        warn!("proxy verification failed, reporting the proxy URL anyway");
    }

    println!("{proxy_url}");
    Ok(())
}

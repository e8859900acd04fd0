use bikya_booking::{api, config, db, BackendConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let config = BackendConfig::from_env()?;
    let addr = config.bind_addr;
    info!(%addr, tax_rate = config.tax_rate, "starting mock booking backend");

    // routing for the server
    let httpd = api::api(db::Db::seeded(config));
    warp::serve(httpd).run(addr).await;
    Ok(())
}

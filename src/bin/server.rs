use env_logger::Target;
use log::{LevelFilter, info};
use swansea_activities::{
    api,
    config::{LoadFromEnv, ServerConfig},
    store::ActivityStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(Target::Stdout)
        .init();

    let config = ServerConfig::load_from_env()?;
    let store = ActivityStore::connect(&config.database_url).await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Serving activities on http://{}", listener.local_addr()?);
    axum::serve(listener, api::router(store)).await?;
    Ok(())
}

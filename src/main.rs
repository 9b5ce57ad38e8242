use env_logger::Target;
use log::LevelFilter;
use swansea_activities::{ScrapingContext, scrape_job::run_scrape_job};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(Target::Stdout)
        .init();

    let ctx = ScrapingContext::new().await?;
    run_scrape_job(&ctx).await;
    log::info!("{} activities now stored.", ctx.store.count().await?);
    Ok(())
}

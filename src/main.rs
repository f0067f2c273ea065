use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use studyplan::config::AppConfig;
use studyplan::data::SystemClock;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studyplan=info")),
        )
        .init();

    let figment = rocket::Config::figment();
    let config: AppConfig = figment.extract()?;

    tracing::info!(
        seeded = config.seed_mock_data,
        signed_in = config.dev_user.is_some(),
        "starting study planner"
    );

    let auth = Arc::new(config.auth_provider());

    studyplan::build(figment, config, Arc::new(SystemClock), auth)
        .launch()
        .await?;

    Ok(())
}

use interview_conduct::{
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    utils::logging::init_tracing,
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let pool = create_pool().await?;
    run_migrations(&pool).await?;

    let state = AppState::new(pool);
    info!(
        autosave = state.settings.autosave_on_navigate,
        auto_advance = state.settings.advancement.enabled,
        min_rating = state.settings.advancement.min_rating,
        "Interview conduct backend ready"
    );

    Ok(())
}

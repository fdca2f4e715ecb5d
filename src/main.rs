mod modules;

use anyhow::Context;
use bookdesk_kernel::settings::Settings;
use bookdesk_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let settings = Settings::load().with_context(|| "failed to load bookdesk settings")?;

    tracing::info!(
        env = ?settings.environment,
        source_mode = ?settings.source.mode,
        "bookdesk bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings)
        .with_context(|| "failed to register modules")?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    bookdesk_http::start_server(&registry, &settings).await
}

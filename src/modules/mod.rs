pub mod books;
pub mod schedule;

use std::sync::Arc;

use bookdesk_kernel::settings::{Settings, SourceMode};
use bookdesk_kernel::ModuleRegistry;

use books::builder::CatalogBuilder;
use books::cache::CatalogCache;
use books::source::OpenLibrarySource;
use schedule::store::ScheduleStore;

/// Register all bookdesk modules with the registry, wiring the shared
/// catalog cache and schedule store.
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let cache = Arc::new(build_cache(settings)?);
    let store = Arc::new(ScheduleStore::new());

    registry.register(books::create_module(cache.clone()));
    registry.register(schedule::create_module(cache, store));

    Ok(())
}

fn build_cache(settings: &Settings) -> anyhow::Result<CatalogCache> {
    match settings.source.mode {
        SourceMode::Online => {
            let source = Arc::new(OpenLibrarySource::new(
                settings.source.base_url.clone(),
                settings.source.limit,
            ));
            Ok(CatalogCache::lazy(CatalogBuilder::new(source)))
        }
        SourceMode::Offline => {
            let catalog = books::offline::load(&settings.source.offline_path)?;
            Ok(CatalogCache::preloaded(catalog))
        }
    }
}

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{CatalogService, MediaStorage, SeaOrmCatalogService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub media: Arc<MediaStorage>,

    pub catalog: Arc<dyn CatalogService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let media = Arc::new(MediaStorage::new(config.media_root()));
        let config_arc = Arc::new(RwLock::new(config));

        let catalog = Arc::new(SeaOrmCatalogService::new(
            store.clone(),
            media.clone(),
            config_arc.clone(),
        )) as Arc<dyn CatalogService>;

        Ok(Self {
            config: config_arc,
            store,
            media,
            catalog,
        })
    }
}

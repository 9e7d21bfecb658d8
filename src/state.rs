use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, RecipeService, SeaOrmAuthService, SeaOrmRecipeService,
};

/// Shared application state: the config, the store, and the domain
/// services built on top of it.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Arc<Store>,

    pub recipe_service: Arc<dyn RecipeService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(
            Store::with_pool_options(
                &config.general.database_path,
                config.general.max_db_connections,
                config.general.min_db_connections,
            )
            .await?,
        );

        let config = Arc::new(RwLock::new(config));

        let recipe_service: Arc<dyn RecipeService> =
            Arc::new(SeaOrmRecipeService::new(store.clone()));

        let auth_service: Arc<dyn AuthService> =
            Arc::new(SeaOrmAuthService::new(store.clone(), config.clone()));

        Ok(Self {
            config,
            store,
            recipe_service,
            auth_service,
        })
    }
}

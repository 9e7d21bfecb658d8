use crate::config::SecurityConfig;
use crate::domain::RecipeId;
use crate::entities::recipes;
use crate::models::recipe::{CreateRecipeCommand, RecipeDetail, RecipeSummary, UpdateRecipeCommand};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("memory") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn recipe_repo(&self) -> repositories::recipe::RecipeRepository {
        repositories::recipe::RecipeRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn create_recipe(
        &self,
        cmd: &CreateRecipeCommand,
        created_by_id: i32,
    ) -> Result<RecipeId> {
        self.recipe_repo().create(cmd, created_by_id).await
    }

    pub async fn list_recipes(&self) -> Result<Vec<RecipeSummary>> {
        self.recipe_repo().list_live().await
    }

    pub async fn list_recipes_by_creator(
        &self,
        user_id: i32,
        limit: u64,
    ) -> Result<Vec<RecipeSummary>> {
        self.recipe_repo().list_by_creator(user_id, limit).await
    }

    pub async fn get_recipe_detail(&self, id: RecipeId) -> Result<Option<RecipeDetail>> {
        self.recipe_repo().find_live_detail(id).await
    }

    pub async fn find_recipe_any(&self, id: RecipeId) -> Result<Option<recipes::Model>> {
        self.recipe_repo().find_any(id).await
    }

    pub async fn apply_recipe_update(
        &self,
        recipe: recipes::Model,
        cmd: &UpdateRecipeCommand,
    ) -> Result<()> {
        self.recipe_repo().apply_update(recipe, cmd).await
    }

    pub async fn mark_recipe_deleted(&self, recipe: recipes::Model) -> Result<()> {
        self.recipe_repo().mark_deleted(recipe).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(username, password, config).await
    }

    pub async fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn get_api_key(&self, username: &str) -> Result<Option<String>> {
        self.user_repo().get_api_key(username).await
    }

    pub async fn regenerate_api_key(&self, username: &str) -> Result<String> {
        self.user_repo().regenerate_api_key(username).await
    }
}

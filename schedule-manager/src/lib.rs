use std::path::Path;

use sqlx::{
    sqlite::{
        SqliteConnectOptions,
        SqlitePoolOptions,
    },
    SqlitePool,
};
use tracing::info;

pub mod application;
pub mod domain;
pub mod infrastructure;

use domain::error::StoreError;
use infrastructure::holiday_repo::HolidayRepository;
use infrastructure::lead_time_repo::LeadTimeRuleRepository;
use infrastructure::status_repo::StatusRepository;

// 全てのリポジトリを保持するコンテナ
pub struct AppServices {
    pub status: StatusRepository,
    pub rule: LeadTimeRuleRepository,
    pub holiday: HolidayRepository,
    pool: SqlitePool,
}

impl AppServices {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            // poolは内部で参照カウントされているのでcloneしても低コスト
            status: StatusRepository::new(pool.clone()),
            rule: LeadTimeRuleRepository::new(pool.clone()),
            holiday: HolidayRepository::new(pool.clone()),
            pool,
        }
    }

    /// 複数のリポジトリにまたがるトランザクション用
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// DBファイルを開く (なければ作る) -> マイグレーション
    pub async fn connect(db_path: &Path) -> Result<Self, StoreError> {
        info!(path = %db_path.display(), "opening schedule config store");

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        migrate(&pool).await?;

        Ok(Self::new(pool))
    }
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

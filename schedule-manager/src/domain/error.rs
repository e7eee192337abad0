use production_schedule::ScheduleError;
use thiserror::Error;

/// 設定ストアとコマンド層のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// 指定したキー/IDの行がない
    #[error("{0} not found")]
    NotFound(String),
    /// DBの値がドメインの型に変換できない、または保存できない値
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

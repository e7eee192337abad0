use std::collections::HashSet;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use production_schedule::{JobStatus, Slot};

use crate::domain::config_model::StatusRow;
use crate::domain::error::StoreError;

pub struct StatusRepository {
    pool: SqlitePool,
}

impl StatusRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 末尾に追加する (現在の最大 sort_order + 1)
    pub async fn add_status(&self, key: &str, slot: Slot) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let next_order: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM job_statuses"
        )
        .fetch_one(&mut *tx)
        .await?;

        let id = sqlx::query("INSERT INTO job_statuses (status_key, sort_order, slot) VALUES (?, ?, ?)")
            .bind(key)
            .bind(next_order)
            .bind(slot.as_str())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        tx.commit().await?;
        info!(id, key, order = next_order, slot = slot.as_str(), "added job status");
        Ok(id)
    }

    /// order とフラグをそのまま保存する (id はDB側で振り直す)
    pub async fn insert_status(&self, status: &JobStatus) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = Self::insert_status_with(&mut *tx, status).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// 呼び出し元のトランザクション内で保存する. 使用中の order は受け付けない
    pub async fn insert_status_with(conn: &mut SqliteConnection, status: &JobStatus) -> Result<i64, StoreError> {
        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_statuses WHERE sort_order = ?")
            .bind(status.order)
            .fetch_one(&mut *conn)
            .await?;

        if taken > 0 {
            return Err(StoreError::InvalidRecord(format!(
                "order {} of status {} is already used",
                status.order, status.key
            )));
        }

        let id = sqlx::query(
            "INSERT INTO job_statuses (status_key, sort_order, is_anchor, is_final, slot)
             VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&status.key)
        .bind(status.order)
        .bind(status.is_anchor)
        .bind(status.is_final)
        .bind(status.slot.as_str())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        info!(id, key = %status.key, order = status.order, "inserted job status");
        Ok(id)
    }

    /// order の昇順
    pub async fn list_statuses(&self) -> Result<Vec<JobStatus>, StoreError> {
        let rows: Vec<StatusRow> = sqlx::query_as(
            "SELECT id, status_key, sort_order, is_anchor, is_final, slot
             FROM job_statuses ORDER BY sort_order ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StatusRow::into_domain).collect()
    }

    /// 並び替え. `keys` の順に 0, 1, 2... を振り直す
    ///
    /// `keys` は全ステータスをちょうど1回ずつ含むこと. 存在しないキーは
    /// `NotFound`、抜けや重複は `InvalidRecord` で、どちらも何も変更しない.
    pub async fn reorder_statuses(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let stored: Vec<String> = sqlx::query_scalar("SELECT status_key FROM job_statuses")
            .fetch_all(&mut *tx)
            .await?;

        if let Some(key) = keys.iter().find(|key| !stored.iter().any(|s| s.as_str() == **key)) {
            // tx は drop でロールバックされる
            return Err(StoreError::NotFound(format!("status {key}")));
        }

        let distinct: HashSet<&str> = keys.iter().copied().collect();
        if distinct.len() != keys.len() || keys.len() != stored.len() {
            return Err(StoreError::InvalidRecord(format!(
                "reorder must list every status once ({} keys given, {} stored)",
                keys.len(),
                stored.len()
            )));
        }

        // 一意インデックスに当たらないよう、全件を 0..len より上へ逃がしてから振り直す
        let (min, max): (Option<i64>, Option<i64>) =
            sqlx::query_as("SELECT MIN(sort_order), MAX(sort_order) FROM job_statuses")
                .fetch_one(&mut *tx)
                .await?;

        if let (Some(min), Some(max)) = (min, max) {
            let shift = max.max(0) + keys.len() as i64 + 1 - min;
            sqlx::query("UPDATE job_statuses SET sort_order = sort_order + ?")
                .bind(shift)
                .execute(&mut *tx)
                .await?;
        }

        for (index, key) in keys.iter().enumerate() {
            sqlx::query("UPDATE job_statuses SET sort_order = ? WHERE status_key = ?")
                .bind(index as i64)
                .bind(*key)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(count = keys.len(), "reordered job statuses");
        Ok(())
    }

    /// 基準ステータスを1つだけにする
    pub async fn set_anchor(&self, key: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE job_statuses SET is_anchor = 0")
            .execute(&mut *tx)
            .await?;

        let affected = sqlx::query("UPDATE job_statuses SET is_anchor = 1 WHERE status_key = ?")
            .bind(key)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(StoreError::NotFound(format!("status {key}")));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn set_final(&self, key: &str, is_final: bool) -> Result<(), StoreError> {
        let affected = sqlx::query("UPDATE job_statuses SET is_final = ? WHERE status_key = ?")
            .bind(is_final)
            .bind(key)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(StoreError::NotFound(format!("status {key}")));
        }
        Ok(())
    }

    /// ON DELETE CASCADE により、このステータスを参照するルールも削除される
    pub async fn delete_status(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM job_statuses WHERE status_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

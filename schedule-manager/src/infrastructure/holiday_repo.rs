use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use production_schedule::{DateValue, WorkingCalendar};

use crate::domain::config_model::HolidayRow;
use crate::domain::error::StoreError;

pub struct HolidayRepository {
    pool: SqlitePool,
}

impl HolidayRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 同じ日付を二度登録した場合は名前だけ更新する
    pub async fn add_holiday(&self, date: DateValue, name: &str) -> Result<i64, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Self::add_holiday_with(&mut *conn, date, name).await
    }

    pub async fn add_holiday_with(conn: &mut SqliteConnection, date: DateValue, name: &str) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO holidays (holiday_date, name) VALUES (?, ?)
             ON CONFLICT (holiday_date) DO UPDATE SET name = excluded.name
             RETURNING id"
        )
        .bind(date.as_naive_date())
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        info!(id, %date, label = name, "added holiday");
        Ok(id)
    }

    /// 日付の昇順
    pub async fn list_holidays(&self) -> Result<Vec<DateValue>, StoreError> {
        let rows: Vec<HolidayRow> = sqlx::query_as(
            "SELECT id, holiday_date, name FROM holidays ORDER BY holiday_date ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(HolidayRow::into_domain).collect()
    }

    pub async fn delete_holiday(&self, date: DateValue) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM holidays WHERE holiday_date = ?")
            .bind(date.as_naive_date())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn calendar(&self) -> Result<WorkingCalendar, StoreError> {
        Ok(WorkingCalendar::with_holidays(self.list_holidays().await?))
    }
}

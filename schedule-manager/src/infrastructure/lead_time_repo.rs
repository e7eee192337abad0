use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use production_schedule::{Direction, LeadTimeRule, RuleId};

use crate::domain::config_model::LeadTimeRuleRow;
use crate::domain::error::StoreError;

pub struct LeadTimeRuleRepository {
    pool: SqlitePool,
}

impl LeadTimeRuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add_rule(
        &self,
        subject_status_key: &str,
        anchor_status_key: &str,
        offset_days: u32,
        direction: Direction,
    ) -> Result<RuleId, StoreError> {
        let rule = LeadTimeRule::new(0, subject_status_key, anchor_status_key, offset_days, direction);
        let mut conn = self.pool.acquire().await?;
        Self::insert_rule_with(&mut *conn, &rule).await
    }

    /// `rule.id` は使わずDBで振る. `active` はそのまま保存する
    pub async fn insert_rule_with(conn: &mut SqliteConnection, rule: &LeadTimeRule) -> Result<RuleId, StoreError> {
        if rule.is_self_referential() {
            return Err(StoreError::InvalidRecord(format!(
                "rule for {} cannot be anchored on itself",
                rule.subject_status_key
            )));
        }

        let id = sqlx::query(
            "INSERT INTO lead_time_rules (subject_status_key, anchor_status_key, offset_days, direction, active)
             VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&rule.subject_status_key)
        .bind(&rule.anchor_status_key)
        .bind(i64::from(rule.offset_days))
        .bind(rule.direction.as_str())
        .bind(rule.active)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        info!(
            id,
            subject = %rule.subject_status_key,
            anchor = %rule.anchor_status_key,
            offset_days = rule.offset_days,
            active = rule.active,
            "added lead-time rule"
        );
        Ok(id)
    }

    /// id の昇順. 同じ対象のルールが複数あれば先に登録した方がコアで採用される
    pub async fn list_rules(&self) -> Result<Vec<LeadTimeRule>, StoreError> {
        let rows: Vec<LeadTimeRuleRow> = sqlx::query_as(
            "SELECT id, subject_status_key, anchor_status_key, offset_days, direction, active
             FROM lead_time_rules ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LeadTimeRuleRow::into_domain).collect()
    }

    pub async fn set_active(&self, rule_id: RuleId, active: bool) -> Result<(), StoreError> {
        let affected = sqlx::query("UPDATE lead_time_rules SET active = ? WHERE id = ?")
            .bind(active)
            .bind(rule_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(StoreError::NotFound(format!("rule {rule_id}")));
        }
        Ok(())
    }

    pub async fn update_offset(&self, rule_id: RuleId, offset_days: u32, direction: Direction) -> Result<(), StoreError> {
        let affected = sqlx::query("UPDATE lead_time_rules SET offset_days = ?, direction = ? WHERE id = ?")
            .bind(i64::from(offset_days))
            .bind(direction.as_str())
            .bind(rule_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(StoreError::NotFound(format!("rule {rule_id}")));
        }
        Ok(())
    }

    pub async fn delete_rule(&self, rule_id: RuleId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM lead_time_rules WHERE id = ?")
            .bind(rule_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

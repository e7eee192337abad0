use tracing::{debug, info};

use production_schedule::{
    date_codec,
    status_cycle::{find_anchor, next_status},
    ScheduleError,
};

use crate::application::dto::{ImportSummary, NextStatusDto, ProposedScheduleDto, SlotDateDto};
use crate::domain::config_model::ScheduleConfig;
use crate::domain::error::StoreError;
use crate::infrastructure::{
    holiday_repo::HolidayRepository,
    lead_time_repo::LeadTimeRuleRepository,
    status_repo::StatusRepository,
};
use crate::AppServices;

// --- Config ---

/// ストアの設定をコアの型で一括取得する
pub async fn load_config(services: &AppServices) -> Result<ScheduleConfig, StoreError> {
    Ok(ScheduleConfig {
        statuses: services.status.list_statuses().await?,
        rules: services.rule.list_rules().await?,
        holidays: services.holiday.list_holidays().await?,
    })
}

/// JSON などで用意した設定をストアに書き込む
///
/// ステータス -> ルール -> 祝日 の順. ルールはステータスのキーを参照するため.
/// id はストア側で振り直す. 1件でも失敗したら全体をロールバックする.
pub async fn import_config(services: &AppServices, config: &ScheduleConfig) -> Result<ImportSummary, StoreError> {
    let mut summary = ImportSummary::default();
    let mut tx = services.pool().begin().await?;

    for status in &config.statuses {
        StatusRepository::insert_status_with(&mut *tx, status).await?;
        summary.statuses += 1;
    }

    for rule in &config.rules {
        LeadTimeRuleRepository::insert_rule_with(&mut *tx, rule).await?;
        summary.rules += 1;
    }

    for holiday in &config.holidays {
        HolidayRepository::add_holiday_with(&mut *tx, *holiday, "").await?;
        summary.holidays += 1;
    }

    tx.commit().await?;
    info!(statuses = summary.statuses, rules = summary.rules, holidays = summary.holidays, "imported schedule config");
    Ok(summary)
}

// --- Schedule ---

/// 基準日から各工程の予定日を提案する
///
/// `anchor_status_key` を省略した場合は基準フラグの付いたステータスを使う.
pub async fn propose_schedule(
    services: &AppServices,
    anchor_date: &str,
    anchor_status_key: Option<&str>,
) -> Result<ProposedScheduleDto, StoreError> {
    let config = load_config(services).await?;
    propose_schedule_with(&config, anchor_date, anchor_status_key)
}

/// 設定を渡して計算する (ストアを使わない呼び出し元向け)
pub fn propose_schedule_with(
    config: &ScheduleConfig,
    anchor_date: &str,
    anchor_status_key: Option<&str>,
) -> Result<ProposedScheduleDto, StoreError> {
    let anchor_key = match anchor_status_key {
        Some(key) => key.to_string(),
        None => find_anchor(&config.statuses)
            .map(|status| status.key.clone())
            .ok_or_else(|| StoreError::NotFound("anchor status".to_string()))?,
    };

    let resolver = config.resolver();
    let result = resolver.resolve(anchor_date, &anchor_key, &config.statuses, &config.rules)?;

    // resolve が通った時点で書式は保証されている
    let anchor = date_codec::parse(anchor_date)
        .map_err(|_| ScheduleError::InvalidAnchorDate(anchor_date.to_string()))?;

    let slots = result
        .iter()
        .map(|(slot, text)| -> Result<SlotDateDto, ScheduleError> {
            let date = date_codec::parse(text)?;
            Ok(SlotDateDto {
                slot,
                date: text.to_string(),
                working_days_from_anchor: resolver.calendar().working_days_between(anchor, date),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(anchor = %anchor_key, slots = slots.len(), "proposed schedule");

    Ok(ProposedScheduleDto {
        anchor_status_key: anchor_key,
        anchor_date: anchor_date.to_string(),
        slots,
    })
}

// --- Status ---

/// 現在のステータスの次を返す. 保存は呼び出し元が行う
pub async fn advance_job_status(services: &AppServices, current_key: &str) -> Result<NextStatusDto, StoreError> {
    let statuses = services.status.list_statuses().await?;
    let next = next_status(current_key, &statuses)?;

    Ok(NextStatusDto {
        key: next.key.clone(),
        is_final: next.is_final,
    })
}

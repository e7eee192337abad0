use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use production_schedule::{
    DateValue,
    Direction,
    JobStatus,
    LeadTimeResolver,
    LeadTimeRule,
    Slot,
    WorkingCalendar,
};

use crate::domain::error::StoreError;

//
// DB読み込み用の行
//

// --- 1. Job Status ---
#[derive(Debug, FromRow)]
pub struct StatusRow {
    pub id: i64,
    pub status_key: String,
    pub sort_order: i64,
    pub is_anchor: bool,
    pub is_final: bool,
    pub slot: String, // nesting | machining | assembly | delivery
}

// --- 2. Lead Time Rule ---
#[derive(Debug, FromRow)]
pub struct LeadTimeRuleRow {
    pub id: i64,
    pub subject_status_key: String,
    pub anchor_status_key: String,
    pub offset_days: i64,
    pub direction: String, // before | after
    pub active: bool,
}

// --- 3. Holiday ---
#[derive(Debug, FromRow)]
pub struct HolidayRow {
    pub id: i64,
    pub holiday_date: NaiveDate,
    pub name: String,
}

impl StatusRow {
    pub fn into_domain(self) -> Result<JobStatus, StoreError> {
        let slot = Slot::from_name(&self.slot)
            .ok_or_else(|| StoreError::InvalidRecord(format!("unknown slot {:?} on status {}", self.slot, self.status_key)))?;

        Ok(JobStatus {
            id: self.id,
            key: self.status_key,
            order: self.sort_order,
            is_anchor: self.is_anchor,
            is_final: self.is_final,
            slot,
        })
    }
}

impl LeadTimeRuleRow {
    pub fn into_domain(self) -> Result<LeadTimeRule, StoreError> {
        let direction = Direction::from_name(&self.direction)
            .ok_or_else(|| StoreError::InvalidRecord(format!("unknown direction {:?} on rule {}", self.direction, self.id)))?;
        let offset_days = u32::try_from(self.offset_days)
            .map_err(|_| StoreError::InvalidRecord(format!("offset {} on rule {}", self.offset_days, self.id)))?;

        Ok(LeadTimeRule {
            id: self.id,
            subject_status_key: self.subject_status_key,
            anchor_status_key: self.anchor_status_key,
            offset_days,
            direction,
            active: self.active,
        })
    }
}

impl HolidayRow {
    pub fn into_domain(self) -> Result<DateValue, StoreError> {
        DateValue::from_naive_date(self.holiday_date)
            .ok_or_else(|| StoreError::InvalidRecord(format!("holiday {} out of range", self.holiday_date)))
    }
}

// --- 複合データ (コアに一括で渡す用) ---

/// テナントのスケジュール設定一式
///
/// ストアから読み込むほか、JSON (`{ statuses, rules, holidays }`) からも作れる.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    pub statuses: Vec<JobStatus>,
    #[serde(default)]
    pub rules: Vec<LeadTimeRule>,
    #[serde(default)]
    pub holidays: Vec<DateValue>,
}

impl ScheduleConfig {
    pub fn calendar(&self) -> WorkingCalendar {
        WorkingCalendar::with_holidays(self.holidays.iter().copied())
    }

    pub fn resolver(&self) -> LeadTimeResolver {
        LeadTimeResolver::new(self.calendar())
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::WorkingCalendar;
use crate::date_codec::{self, DateValue};
use crate::error::ScheduleError;
use crate::models::{JobStatus, LeadTimeRule, Slot};
use crate::status_cycle::ordered;

/// 1回の計算に必要な入力一式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub anchor_date: String,
    pub anchor_status_key: String,
    pub statuses: Vec<JobStatus>,
    pub rules: Vec<LeadTimeRule>,
}

/// スロット -> 日付 (DD/MM/YYYY)
///
/// 基準ステータスのスロットは必ず入る. それ以外はルールが見つかったものだけ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleResult {
    slots: BTreeMap<Slot, String>,
}

impl ScheduleResult {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(slot, text)| (*slot, text.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<Slot, String> {
        self.slots
    }
}

impl From<&BTreeMap<Slot, DateValue>> for ScheduleResult {
    fn from(dates: &BTreeMap<Slot, DateValue>) -> Self {
        Self {
            slots: dates
                .iter()
                .map(|(slot, date)| (*slot, date_codec::format(date)))
                .collect(),
        }
    }
}

/// 基準日とリードタイム設定から各工程の日付を導出する
///
/// 状態は持たない. 同じ入力には同じ結果を返す.
#[derive(Debug, Clone, Default)]
pub struct LeadTimeResolver {
    calendar: WorkingCalendar,
}

impl LeadTimeResolver {
    pub fn new(calendar: WorkingCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &WorkingCalendar {
        &self.calendar
    }

    /// 基準日の文字列から計算する
    pub fn resolve(
        &self,
        anchor_date_text: &str,
        anchor_status_key: &str,
        statuses: &[JobStatus],
        rules: &[LeadTimeRule],
    ) -> Result<ScheduleResult, ScheduleError> {
        let anchor_date = date_codec::parse(anchor_date_text)
            .map_err(|_| ScheduleError::InvalidAnchorDate(anchor_date_text.to_string()))?;

        let dates = self.resolve_dates(anchor_date, anchor_status_key, statuses, rules)?;
        Ok(ScheduleResult::from(&dates))
    }

    pub fn resolve_request(&self, request: &ScheduleRequest) -> Result<ScheduleResult, ScheduleError> {
        self.resolve(
            &request.anchor_date,
            &request.anchor_status_key,
            &request.statuses,
            &request.rules,
        )
    }

    /// 日付の値のまま計算する
    ///
    /// 1. 基準ステータスのスロットに基準日を入れる
    /// 2. 残りのステータスを order の昇順に見て、有効なルールがあれば
    ///    稼働日でずらした日付をそのスロットに書く
    /// 3. 同じスロットに複数のステータスがあれば後勝ち (order が大きい方)
    ///
    /// 基準ステータスのスロットだけは上書きしない.
    pub fn resolve_dates(
        &self,
        anchor_date: DateValue,
        anchor_status_key: &str,
        statuses: &[JobStatus],
        rules: &[LeadTimeRule],
    ) -> Result<BTreeMap<Slot, DateValue>, ScheduleError> {
        let anchor = statuses
            .iter()
            .find(|status| status.key == anchor_status_key)
            .ok_or_else(|| ScheduleError::UnknownAnchorStatus(anchor_status_key.to_string()))?;

        for rule in rules.iter().filter(|rule| rule.active && rule.is_self_referential()) {
            warn!(rule_id = rule.id, key = %rule.subject_status_key, "ignoring lead-time rule anchored on itself");
        }

        let mut slots = BTreeMap::new();
        slots.insert(anchor.slot, anchor_date);

        for status in ordered(statuses) {
            if status.key == anchor.key {
                continue;
            }
            if status.slot == anchor.slot {
                debug!(status = %status.key, slot = status.slot.as_str(), "slot is held by the anchor status");
                continue;
            }

            let Some(rule) = find_rule(rules, &status.key, &anchor.key) else {
                continue;
            };

            let date = self.calendar.add_working_days(anchor_date, rule.signed_offset());
            if let Some(previous) = slots.insert(status.slot, date) {
                debug!(
                    status = %status.key,
                    slot = status.slot.as_str(),
                    %previous,
                    %date,
                    "overwriting slot with later status"
                );
            } else {
                debug!(status = %status.key, slot = status.slot.as_str(), %date, rule_id = rule.id, "resolved slot");
            }
        }

        Ok(slots)
    }
}

/// `subject` を `anchor` から計算する有効なルール
///
/// 複数あればリストの先頭を採用する. 保存済みのルールは id の昇順で
/// 読み出されるので、その場合は id の小さいものが勝つ.
pub fn find_rule<'r>(rules: &'r [LeadTimeRule], subject: &str, anchor: &str) -> Option<&'r LeadTimeRule> {
    rules.iter().find(|rule| {
        rule.active
            && !rule.is_self_referential()
            && rule.subject_status_key == subject
            && rule.anchor_status_key == anchor
    })
}

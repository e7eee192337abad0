use serde::Serialize;

use production_schedule::Slot;

/// 1スロット分の提案日
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDateDto {
    pub slot: Slot,
    pub date: String,                  // DD/MM/YYYY
    pub working_days_from_anchor: i64, // 基準日より前なら負
}

/// コマンドの返り値 (ジョブ編集画面に渡す)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedScheduleDto {
    pub anchor_status_key: String,
    pub anchor_date: String,
    pub slots: Vec<SlotDateDto>,
}

impl ProposedScheduleDto {
    pub fn date_of(&self, slot: Slot) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.slot == slot)
            .map(|s| s.date.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStatusDto {
    pub key: String,
    pub is_final: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub statuses: usize,
    pub rules: usize,
    pub holidays: usize,
}

// =====================
// ドメインモデル定義
// =====================

use serde::{Deserialize, Serialize};

pub type StatusId = i64;
pub type RuleId = i64;

/// ステータスの日付を書き込む先
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Nesting,
    Machining,
    Assembly,
    Delivery,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Nesting, Slot::Machining, Slot::Assembly, Slot::Delivery];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Nesting => "nesting",
            Slot::Machining => "machining",
            Slot::Assembly => "assembly",
            Slot::Delivery => "delivery",
        }
    }

    /// DBの文字列表現から戻す
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == name)
    }
}

/// 基準日から見た向き
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Before,
    After,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Before => "before",
            Direction::After => "after",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "before" => Some(Direction::Before),
            "after" => Some(Direction::After),
            _ => None,
        }
    }

    /// 稼働日数に符号を付ける (Before は負)
    pub fn apply(&self, offset_days: u32) -> i64 {
        match self {
            Direction::Before => -i64::from(offset_days),
            Direction::After => i64::from(offset_days),
        }
    }
}

/// ワークフロー上の一段階
///
/// `is_final` は「完了」を示すラベルで、サイクルの挙動には影響しない.
/// 複数のステータスが同じ `slot` を指すのは正常.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub id: StatusId,
    pub key: String,
    pub order: i64,
    #[serde(default)]
    pub is_anchor: bool,
    #[serde(default)]
    pub is_final: bool,
    pub slot: Slot,
}

impl JobStatus {
    pub fn new(id: StatusId, key: &str, order: i64, slot: Slot) -> Self {
        Self {
            id,
            key: key.to_string(),
            order,
            is_anchor: false,
            is_final: false,
            slot,
        }
    }

    pub fn anchor(mut self) -> Self {
        self.is_anchor = true;
        self
    }

    pub fn final_status(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// リードタイム設定 (基準ステータスから稼働日で何日前/後か)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTimeRule {
    pub id: RuleId,
    pub subject_status_key: String,
    pub anchor_status_key: String,
    pub offset_days: u32,
    pub direction: Direction,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl LeadTimeRule {
    pub fn new(
        id: RuleId,
        subject_status_key: &str,
        anchor_status_key: &str,
        offset_days: u32,
        direction: Direction,
    ) -> Self {
        Self {
            id,
            subject_status_key: subject_status_key.to_string(),
            anchor_status_key: anchor_status_key.to_string(),
            offset_days,
            direction,
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// 自分自身を基準にしたルールは意味を持たない
    pub fn is_self_referential(&self) -> bool {
        self.subject_status_key == self.anchor_status_key
    }

    pub fn signed_offset(&self) -> i64 {
        self.direction.apply(self.offset_days)
    }
}

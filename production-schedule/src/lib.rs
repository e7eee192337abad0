//! 製造工程の日付計算
//!
//! 基準日 (通常は納品日) とリードタイム設定から、ネスティング・加工・組立の
//! 予定日を稼働日ベースで導出する. あわせてジョブステータスの巡回を扱う.
//!
//! どの関数も入力だけで結果が決まり、状態を持たない.

pub mod calendar;
pub mod date_codec;
pub mod error;
pub mod lead_time;
pub mod models;
pub mod status_cycle;

pub use calendar::{Step, WorkingCalendar};
pub use date_codec::DateValue;
pub use error::ScheduleError;
pub use lead_time::{LeadTimeResolver, ScheduleRequest, ScheduleResult};
pub use models::{Direction, JobStatus, LeadTimeRule, RuleId, Slot, StatusId};

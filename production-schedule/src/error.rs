use thiserror::Error;

/// スケジュール計算とステータス遷移で発生するエラー
///
/// どれも入力が同じなら必ず同じ結果になるため、リトライはしない.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// DD/MM/YYYY に沿っていない、または存在しない日付
    #[error("invalid date format: {0:?} (expected DD/MM/YYYY)")]
    InvalidDateFormat(String),
    /// 基準日として渡された文字列が日付として読めない
    #[error("invalid anchor date: {0:?}")]
    InvalidAnchorDate(String),
    /// 基準ステータスがステータス一覧に存在しない
    #[error("unknown anchor status: {0}")]
    UnknownAnchorStatus(String),
    /// 現在のステータスがステータス一覧に存在しない
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    /// ステータスが一件もない
    #[error("status set is empty")]
    EmptyStatusSet,
}

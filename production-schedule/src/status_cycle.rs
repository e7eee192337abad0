// --- ステータス遷移 (リング) ---

use crate::error::ScheduleError;
use crate::models::JobStatus;

/// `order` の昇順に並べ替えたビュー (同じ order は入力順を保つ)
pub fn ordered(statuses: &[JobStatus]) -> Vec<&JobStatus> {
    let mut sorted: Vec<&JobStatus> = statuses.iter().collect();
    sorted.sort_by_key(|status| status.order);
    sorted
}

/// order 順で最初の基準ステータス
pub fn find_anchor(statuses: &[JobStatus]) -> Option<&JobStatus> {
    ordered(statuses).into_iter().find(|status| status.is_anchor)
}

/// 次のステータス
///
/// 末尾の次は先頭に戻る. `is_final` のステータスでも止まらない.
///
/// ```text
///  order:  10      20       30(final)
///         [nest] -> [asm] -> [delivered]
///           ^                     |
///           +---------------------+
/// ```
pub fn next_status<'a>(
    current_key: &str,
    statuses: &'a [JobStatus],
) -> Result<&'a JobStatus, ScheduleError> {
    if statuses.is_empty() {
        return Err(ScheduleError::EmptyStatusSet);
    }

    let sorted = ordered(statuses);
    let index = sorted
        .iter()
        .position(|status| status.key == current_key)
        .ok_or_else(|| ScheduleError::UnknownStatus(current_key.to_string()))?;

    Ok(sorted[(index + 1) % sorted.len()])
}

/// 次のステータスのキー
pub fn advance<'a>(current_key: &str, statuses: &'a [JobStatus]) -> Result<&'a str, ScheduleError> {
    next_status(current_key, statuses).map(|status| status.key.as_str())
}

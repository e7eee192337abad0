use std::collections::BTreeSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::date_codec::DateValue;

/// 1日ずつ進める方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

/// 稼働日カレンダー
///
/// 土日は常に非稼働. それに加えて `holidays` に含まれる日も非稼働.
/// 祝日を渡さなければ土日だけを飛ばす.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingCalendar {
    holidays: BTreeSet<DateValue>,
}

pub fn is_weekend(date: DateValue) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 暦日で1日だけ進める (月末・年末・閏年は chrono に任せる)
pub fn step_one_day(date: DateValue, step: Step) -> DateValue {
    match step {
        Step::Forward => date.succ(),
        Step::Backward => date.pred(),
    }
}

impl WorkingCalendar {
    pub fn weekends_only() -> Self {
        Self::default()
    }

    pub fn with_holidays<I: IntoIterator<Item = DateValue>>(holidays: I) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn is_working_day(&self, date: DateValue) -> bool {
        !is_weekend(date) && !self.holidays.contains(&date)
    }

    /// `date` から稼働日で `offset` 日ずらした日付
    ///
    /// 起点の `date` 自体は数えない. 1日進めるたびに、着地した日が
    /// 稼働日のときだけ残りを減らす.
    ///
    /// ```text
    /// Mo Tu We Th Fr Sa Su
    ///  7  8  9 10 11 12 13
    /// 14                      <- date
    ///
    /// offset -2: 13(no) 12(no) 11(1) 10(2) -> 10
    /// ```
    pub fn add_working_days(&self, date: DateValue, offset: i64) -> DateValue {
        if offset == 0 {
            return date;
        }

        let step = if offset > 0 { Step::Forward } else { Step::Backward };
        let mut remaining = offset.unsigned_abs();
        let mut current = date;

        while remaining > 0 {
            let next = step_one_day(current, step);
            if next == current {
                // 0000/01/01 か 9999/12/31 に張り付いた
                break;
            }
            current = next;
            if self.is_working_day(current) {
                remaining -= 1;
            }
        }
        current
    }

    /// `start` の翌日から `end` までに含まれる稼働日数
    ///
    /// `end` が `start` より前なら負の値. `end` が稼働日のときは
    /// `add_working_days(start, n) == end` となる `n` を返す.
    pub fn working_days_between(&self, start: DateValue, end: DateValue) -> i64 {
        let (step, sign) = if end >= start {
            (Step::Forward, 1)
        } else {
            (Step::Backward, -1)
        };

        let mut count = 0;
        let mut current = start;
        while current != end {
            current = step_one_day(current, step);
            if self.is_working_day(current) {
                count += 1;
            }
        }
        sign * count
    }
}

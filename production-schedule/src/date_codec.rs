// =====================
// 日付の表現 (DD/MM/YYYY)
// =====================

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// 外部とやり取りする日付の書式
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// 時刻を持たない日付
///
/// 年は 0000 〜 9999 に限定する. 4桁の年でないと
/// `parse(format(d)) == d` が成り立たないため.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateValue(NaiveDate);

impl DateValue {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive_date(date: NaiveDate) -> Option<Self> {
        Self::from_ymd(date.year(), date.month(), date.day())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// 翌日. 9999/12/31 では自分自身を返す
    pub(crate) fn succ(self) -> Self {
        self.0.succ_opt().and_then(Self::from_naive_date).unwrap_or(self)
    }

    /// 前日. 0000/01/01 では自分自身を返す
    pub(crate) fn pred(self) -> Self {
        self.0.pred_opt().and_then(Self::from_naive_date).unwrap_or(self)
    }
}

/// `DD/MM/YYYY` を厳密に読み取る
///
/// 桁数の省略 (`1/7/2025`) や区切り文字違い (`01-07-2025`) はすべてエラー.
/// 4月31日のような存在しない日付もエラー.
pub fn parse(text: &str) -> Result<DateValue, ScheduleError> {
    let invalid = || ScheduleError::InvalidDateFormat(text.to_string());

    //  0 1 2 3 4 5 6 7 8 9
    //  D D / M M / Y Y Y Y
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(invalid());
    }
    let digits_only = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_only {
        return Err(invalid());
    }

    let day: u32 = text[0..2].parse().map_err(|_| invalid())?;
    let month: u32 = text[3..5].parse().map_err(|_| invalid())?;
    let year: i32 = text[6..10].parse().map_err(|_| invalid())?;

    DateValue::from_ymd(year, month, day).ok_or_else(invalid)
}

/// 常に `DD/MM/YYYY` (ゼロ埋め) で書き出す
pub fn format(date: &DateValue) -> String {
    date.0.format(DATE_FORMAT).to_string()
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}

impl FromStr for DateValue {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<String> for DateValue {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse(&value)
    }
}

impl From<DateValue> for String {
    fn from(value: DateValue) -> Self {
        format(&value)
    }
}

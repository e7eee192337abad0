// 稼働日計算と日付の書式の往復

#[cfg(test)]
mod calendar_test {
    use production_schedule::{
        calendar::{step_one_day, Step},
        date_codec::{format, parse},
        DateValue,
        WorkingCalendar,
    };

    #[test]
    fn text_round_trip_over_several_years() {
        let mut date = DateValue::from_ymd(2019, 1, 1).unwrap();
        let end = DateValue::from_ymd(2029, 1, 1).unwrap();
        while date < end {
            let text = format(&date);
            assert_eq!(parse(&text).unwrap(), date);
            assert_eq!(format(&parse(&text).unwrap()), text);
            date = step_one_day(date, Step::Forward);
        }
    }

    #[test]
    fn add_working_days_never_lands_on_weekend() {
        let calendar = WorkingCalendar::weekends_only();
        let start = parse("13/07/2025").unwrap(); // Sun
        for offset in (-30..=30).filter(|o| *o != 0) {
            let landed = calendar.add_working_days(start, offset);
            assert!(calendar.is_working_day(landed), "offset {offset} -> {landed}");
        }
    }

    #[test]
    fn step_count_stays_bounded() {
        // 週末で最大2日、それ以外は 7/5 倍を超えない
        let calendar = WorkingCalendar::weekends_only();
        let start = parse("01/01/2025").unwrap();
        for offset in [1_i64, 5, 37, 260, 500] {
            let landed = calendar.add_working_days(start, offset);
            let span = (landed.as_naive_date() - start.as_naive_date()).num_days();
            assert!(span <= (offset * 7 + 4) / 5 + 2, "offset {offset} took {span} days");
        }
    }

    #[test]
    fn date_value_serializes_as_text() {
        let date = parse("09/03/2026").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), r#""09/03/2026""#);

        let back: DateValue = serde_json::from_str(r#""09/03/2026""#).unwrap();
        assert_eq!(back, date);

        assert!(serde_json::from_str::<DateValue>(r#""2026-03-09""#).is_err());
    }

    #[test]
    fn display_uses_codec() {
        let date = DateValue::from_ymd(2025, 7, 4).unwrap();
        assert_eq!(date.to_string(), "04/07/2025");
        assert_eq!("04/07/2025".parse::<DateValue>().unwrap(), date);
    }
}

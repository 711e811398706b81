//! Tests for the window module

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_window_new_rejects_empty() {
    assert!(Window::new(date("2017-03-01"), date("2017-03-01")).is_err());
    assert!(Window::new(date("2017-03-02"), date("2017-03-01")).is_err());
    assert_eq!(
        Window::new(date("2017-03-01"), date("2017-03-08"))
            .unwrap()
            .days(),
        7
    );
}

#[test]
fn test_window_single_day_and_display() {
    let window = Window::single_day(date("2017-02-28"));
    assert_eq!(window.end_exclusive, date("2017-03-01"));
    assert_eq!(window.to_string(), "2017-02-28..2017-03-01");
}

#[test]
fn test_window_to_query() {
    let query = Window::single_day(date("2017-05-02"))
        .to_query("$AAPL", 100)
        .unwrap();
    assert_eq!(query.window_start, date("2017-05-02"));
    assert_eq!(query.window_end_exclusive, date("2017-05-03"));

    assert!(Window::single_day(date("2017-05-02"))
        .to_query("$AAPL", 0)
        .is_err());
}

#[test]
fn test_router_daily_windows() {
    let router = WindowRouter::new(date("2017-02-27"), date("2017-03-02"), Duration::days(1)).unwrap();
    let windows = router.windows();

    assert_eq!(
        windows,
        vec![
            Window::single_day(date("2017-02-27")),
            Window::single_day(date("2017-02-28")),
            Window::single_day(date("2017-03-01")),
        ]
    );
}

#[test]
fn test_router_last_window_shortened() {
    let router = WindowRouter::new(date("2017-03-01"), date("2017-03-11"), Duration::weeks(1)).unwrap();
    let windows = router.windows();

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].days(), 7);
    assert_eq!(windows[1].start, date("2017-03-08"));
    assert_eq!(windows[1].end_exclusive, date("2017-03-11"));
}

#[test]
fn test_router_trailing_days() {
    let router = WindowRouter::trailing(date("2017-05-03"), 5, Duration::days(1)).unwrap();
    let windows = router.windows();

    assert_eq!(windows.len(), 5);
    assert_eq!(windows[0].start, date("2017-04-28"));
    assert_eq!(windows[4], Window::single_day(date("2017-05-02")));

    assert!(WindowRouter::trailing(date("2017-05-03"), 0, Duration::days(1)).is_err());
}

#[test]
fn test_router_trailing_stepped() {
    let router = WindowRouter::trailing(date("2017-05-03"), 10, Duration::weeks(1)).unwrap();
    let windows = router.windows();

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start, date("2017-04-23"));
    assert_eq!(windows[1].end_exclusive, date("2017-05-03"));
}

#[test]
fn test_router_trailing_out_of_range_days() {
    let err = WindowRouter::trailing(date("2017-05-03"), 200_000_000, Duration::days(1)).unwrap_err();
    assert!(matches!(err, crate::error::Error::Config { .. }));
}

#[test]
fn test_router_step_past_last_date() {
    let end = NaiveDate::MAX;
    let start = end - Duration::days(3);
    let router = WindowRouter::new(start, end, Duration::weeks(1000)).unwrap();

    assert_eq!(
        router.windows(),
        vec![Window {
            start,
            end_exclusive: end
        }]
    );
}

#[test]
fn test_router_rejects_bad_step() {
    assert!(WindowRouter::new(date("2017-03-01"), date("2017-03-02"), Duration::hours(6)).is_err());
}

#[test]
fn test_router_from_strings() {
    let router = WindowRouter::from_strings("2017-03-01", "2017/03/03", "1d").unwrap();
    assert_eq!(router.windows().len(), 2);
}

#[test_case("2017-03-01", "2017-03-01" ; "iso")]
#[test_case("2017/03/01", "2017-03-01" ; "slashes")]
#[test_case(" 2017-03-01 ", "2017-03-01" ; "padded")]
#[test_case("2017-03-01T23:30:00-02:00", "2017-03-02" ; "rfc3339 normalized to utc")]
fn test_parse_date(input: &str, expected: &str) {
    assert_eq!(parse_date(input).unwrap(), date(expected));
}

#[test]
fn test_parse_date_invalid() {
    let err = parse_date("2017-13-01").unwrap_err();
    assert!(matches!(err, crate::error::Error::InvalidDate { .. }));
}

#[test_case("1d", 1 ; "one day")]
#[test_case("3", 3 ; "bare number")]
#[test_case("2w", 14 ; "weeks")]
fn test_parse_step(input: &str, days: i64) {
    assert_eq!(parse_step(input).unwrap(), Duration::days(days));
}

#[test_case("0d" ; "zero")]
#[test_case("-1d" ; "negative")]
#[test_case("1h" ; "hours")]
#[test_case("abc" ; "garbage")]
#[test_case("9223372036854775807w" ; "multiplication overflow")]
#[test_case("200000000000000d" ; "beyond duration range")]
fn test_parse_step_invalid(input: &str) {
    assert!(parse_step(input).is_err());
}

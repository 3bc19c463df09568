use super::*;
use time::macros::date;

#[test]
fn due_date_is_lmp_plus_280_days() {
    let r = calculate(date!(2024 - 01 - 01), date!(2024 - 01 - 01)).unwrap();
    assert_eq!(r.due_date, date!(2024 - 10 - 07));
}

#[test]
fn due_date_display_format() {
    assert_eq!(display_date(date!(2024 - 10 - 07)), "Mon Oct 07 2024");
}

#[test]
fn trimester_boundaries_inclusive_at_lower_edge() {
    assert_eq!(Trimester::for_week(0), Trimester::First);
    assert_eq!(Trimester::for_week(12), Trimester::First);
    assert_eq!(Trimester::for_week(13), Trimester::Second);
    assert_eq!(Trimester::for_week(26), Trimester::Second);
    assert_eq!(Trimester::for_week(27), Trimester::Third);
    assert_eq!(Trimester::for_week(12).label(), "First Trimester");
    assert_eq!(Trimester::for_week(13).label(), "Second Trimester");
    assert_eq!(Trimester::for_week(27).label(), "Third Trimester");
}

#[test]
fn weeks_are_floored() {
    // 90 days = 12 weeks 6 days.
    let r = calculate(date!(2024 - 01 - 01), date!(2024 - 03 - 31)).unwrap();
    assert_eq!(r.weeks_pregnant, 12);
    assert_eq!(r.trimester, Trimester::First);
    // 91 days = 13 weeks.
    let r = calculate(date!(2024 - 01 - 01), date!(2024 - 04 - 01)).unwrap();
    assert_eq!(r.weeks_pregnant, 13);
    assert_eq!(r.trimester, Trimester::Second);
}

#[test]
fn days_left_counts_down_and_floors_at_zero() {
    let r = calculate(date!(2024 - 01 - 01), date!(2024 - 10 - 01)).unwrap();
    assert_eq!(r.days_left, 6);
    let r = calculate(date!(2024 - 01 - 01), date!(2024 - 12 - 01)).unwrap();
    assert_eq!(r.days_left, 0);
}

#[test]
fn weeks_capped_at_42() {
    let r = calculate(date!(2023 - 01 - 01), date!(2024 - 06 - 01)).unwrap();
    assert_eq!(r.weeks_pregnant, MAX_DISPLAY_WEEKS);
    assert_eq!(r.trimester, Trimester::Third);
}

#[test]
fn future_lmp_uses_absolute_elapsed_time() {
    let r = calculate(date!(2024 - 02 - 01), date!(2024 - 01 - 18)).unwrap();
    assert_eq!(r.weeks_pregnant, 2);
}

#[test]
fn parse_date_accepts_iso() {
    assert_eq!(parse_date("2024-01-01").unwrap(), date!(2024 - 01 - 01));
}

#[test]
fn parse_date_rejects_garbage() {
    assert!(matches!(parse_date("01/01/2024"), Err(CalcError::InvalidDate(_))));
    assert!(matches!(parse_date("2024-02-30"), Err(CalcError::InvalidDate(_))));
}

#[test]
fn serializes_iso_due_date_and_trimester_label() {
    let r = calculate(date!(2024 - 01 - 01), date!(2024 - 04 - 01)).unwrap();
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["dueDate"], "2024-10-07");
    assert_eq!(v["trimester"], "Second Trimester");
    assert_eq!(v["weeksPregnant"], 13);
}

//! Tests for day arithmetic on extract dates

use ami_features::utils::date_utils::{INCOMPARABLE_DAYS, day_difference, try_day_difference};

const DATES: [&str; 6] = [
    "01/01/2019",
    "12/31/2018",
    "02/28/2020",
    "03/01/2020",
    "07/04/1960 08:15",
    "3/5/2019",
];

#[test]
fn test_day_difference_is_antisymmetric() {
    for a in DATES {
        for b in DATES {
            let forward = day_difference(a, b);
            let backward = day_difference(b, a);
            assert_eq!(forward, -backward, "{a} vs {b}");
        }
    }
}

#[test]
fn test_same_day_is_zero() {
    for a in DATES {
        assert_eq!(day_difference(a, a), 0);
    }
    // the time of day never matters
    assert_eq!(day_difference("01/01/2019 23:59", "01/01/2019 00:01"), 0);
}

#[test]
fn test_leap_day_is_counted() {
    assert_eq!(day_difference("03/01/2020", "02/28/2020"), 2);
    assert_eq!(day_difference("03/01/2019", "02/28/2019"), 1);
}

#[test]
fn test_unreadable_dates_are_incomparable() {
    assert_eq!(try_day_difference("", "01/01/2019"), None);
    assert_eq!(try_day_difference("02/30/2019", "01/01/2019"), None);
    assert_eq!(day_difference("unknown", "01/01/2019"), INCOMPARABLE_DAYS);
}

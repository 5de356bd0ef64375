use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How a batch request maps to candidate dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Recurrence {
    /// Exactly one candidate date.
    Single { date: NaiveDate },
    /// Every date in the given calendar month whose weekday is in the set.
    Weekly {
        year: i32,
        month: u32,
        weekdays: Vec<Weekday>,
    },
}

impl Recurrence {
    /// Expand to concrete candidate dates in chronological order.
    ///
    /// A `Weekly` recurrence with an out-of-range month expands to no dates;
    /// request validation rejects it before expansion.
    pub fn candidate_dates(&self) -> Vec<NaiveDate> {
        match self {
            Recurrence::Single { date } => vec![*date],
            Recurrence::Weekly {
                year,
                month,
                weekdays,
            } => {
                let mut dates = Vec::new();
                let Some(first) = NaiveDate::from_ymd_opt(*year, *month, 1) else {
                    return dates;
                };
                let mut current = first;
                while current.month() == *month {
                    if weekdays.contains(&current.weekday()) {
                        dates.push(current);
                    }
                    current = current + Duration::days(1);
                }
                dates
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_mode_yields_exactly_one_date() {
        let recurrence = Recurrence::Single { date: d(2026, 3, 2) };
        assert_eq!(recurrence.candidate_dates(), vec![d(2026, 3, 2)]);
    }

    #[test]
    fn march_2026_mondays() {
        let recurrence = Recurrence::Weekly {
            year: 2026,
            month: 3,
            weekdays: vec![Weekday::Mon],
        };
        assert_eq!(
            recurrence.candidate_dates(),
            vec![
                d(2026, 3, 2),
                d(2026, 3, 9),
                d(2026, 3, 16),
                d(2026, 3, 23),
                d(2026, 3, 30),
            ]
        );
    }

    #[test]
    fn multiple_weekdays_stay_chronological() {
        let recurrence = Recurrence::Weekly {
            year: 2026,
            month: 2,
            weekdays: vec![Weekday::Fri, Weekday::Mon],
        };
        let dates = recurrence.candidate_dates();
        assert_eq!(dates.len(), 8);
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(dates[0], d(2026, 2, 2));
        assert_eq!(dates[7], d(2026, 2, 27));
    }

    #[test]
    fn empty_weekday_set_expands_to_nothing() {
        let recurrence = Recurrence::Weekly {
            year: 2026,
            month: 3,
            weekdays: Vec::new(),
        };
        assert!(recurrence.candidate_dates().is_empty());
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::{Deref, Display, From};
use serde::Serialize;

use crate::{FieldError, Lookups, Name, RowError, TIMESTAMP_FORMAT, statistics};

#[derive(
    Deref, Debug, Default, Display, Clone, Copy, From, Hash, PartialEq, Eq, PartialOrd, Ord,
    Serialize,
)]
pub struct ClassID(u32);

/// One attended class as stored by the data-access layer.
///
/// Duplicate rows are legitimate and count as separate attendances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassAttendanceRow {
    pub class_id: ClassID,
    pub date_attended: NaiveDate,
    pub days_attended: u32,
}

impl ClassAttendanceRow {
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, FieldError> {
        let [class_id, date_attended, days_attended] = fields else {
            return Err(FieldError::Arity {
                expected: "3",
                found: fields.len(),
            });
        };

        Ok(Self {
            class_id: class_id
                .as_ref()
                .trim()
                .parse::<u32>()
                .map_err(|err| FieldError::invalid("class_id", err))?
                .into(),
            date_attended: parse_date(date_attended.as_ref().trim())
                .map_err(|err| FieldError::invalid("date_attended", err))?,
            days_attended: days_attended
                .as_ref()
                .trim()
                .parse::<u32>()
                .map_err(|err| FieldError::invalid("days_attended", err))?,
        })
    }
}

/// Accepts `YYYY-MM-DD`, or a timestamp whose time part is ignored.
fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").or_else(|err| {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(|timestamp| timestamp.date())
            .map_err(|_| err)
    })
}

/// Parse a batch of raw attendance rows, stopping at the first malformed row.
pub fn parse_class_rows<S: AsRef<str>>(
    rows: &[Vec<S>],
) -> Result<Vec<ClassAttendanceRow>, RowError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            ClassAttendanceRow::from_fields(row.as_slice())
                .map_err(|source| RowError { index, source })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    #[serde(flatten)]
    pub row: ClassAttendanceRow,
    pub class_name: Option<Name>,
}

impl ClassRecord {
    pub const COLUMNS: [&'static str; 4] =
        ["class_id", "date_attended", "days_attended", "class_name"];
}

/// Join each attendance row with its class name, preserving order.
#[must_use]
pub fn shape_class_rows(rows: &[ClassAttendanceRow], lookups: &Lookups) -> Vec<ClassRecord> {
    rows.iter()
        .map(|row| ClassRecord {
            class_name: lookups.classes.name(row.class_id).cloned(),
            row: row.clone(),
        })
        .collect()
}

/// Longest run of classes attended on consecutive calendar days.
#[must_use]
pub fn compute_streak(records: &[ClassRecord]) -> u32 {
    statistics::longest_daily_run(
        &records
            .iter()
            .map(|r| r.row.date_attended)
            .collect::<Vec<_>>(),
    )
}

/// Attended classes as a percentage of `total_possible_classes`, capped at 100.
#[must_use]
pub fn compute_attendance_rate(records: &[ClassRecord], total_possible_classes: u32) -> f64 {
    if total_possible_classes == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let attended = records.len() as f64;
    (attended / f64::from(total_possible_classes) * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::Lookup;

    #[rstest]
    #[case::date(
        &["3", "2024-05-01", "1"],
        Ok(row(3, (2024, 5, 1)))
    )]
    #[case::timestamp(
        &["3", "2024-05-01 18:30:00", "1"],
        Ok(row(3, (2024, 5, 1)))
    )]
    #[case::timestamp_with_fraction(
        &["3", "2024-05-01 18:30:00.250000", "1"],
        Ok(row(3, (2024, 5, 1)))
    )]
    #[case::padded(
        &[" 3 ", " 2024-05-01 ", " 1 "],
        Ok(row(3, (2024, 5, 1)))
    )]
    #[case::too_few_fields(
        &["3", "2024-05-01"],
        Err(FieldError::Arity { expected: "3", found: 2 })
    )]
    #[case::too_many_fields(
        &["3", "2024-05-01", "1", "x"],
        Err(FieldError::Arity { expected: "3", found: 4 })
    )]
    #[case::invalid_class_id(
        &["yoga", "2024-05-01", "1"],
        Err(FieldError::invalid("class_id", "invalid digit found in string"))
    )]
    #[case::invalid_days_attended(
        &["3", "2024-05-01", "-1"],
        Err(FieldError::invalid("days_attended", "invalid digit found in string"))
    )]
    fn test_class_attendance_row_from_fields(
        #[case] fields: &[&str],
        #[case] expected: Result<ClassAttendanceRow, FieldError>,
    ) {
        assert_eq!(ClassAttendanceRow::from_fields(fields), expected);
    }

    #[rstest]
    #[case::invalid_month("2024-13-01")]
    #[case::invalid_day("2023-02-29")]
    #[case::not_a_date("yesterday")]
    #[case::empty("")]
    fn test_class_attendance_row_from_fields_invalid_date(#[case] date: &str) {
        assert_eq!(
            ClassAttendanceRow::from_fields(&["3", date, "1"])
                .unwrap_err()
                .field(),
            Some("date_attended")
        );
    }

    #[test]
    fn test_parse_class_rows_reports_row_index() {
        let rows = vec![
            vec!["1", "2024-05-01", "1"],
            vec!["1", "2024-05-02", "2"],
            vec!["1", "05/03/2024", "3"],
        ];

        assert_eq!(parse_class_rows(&rows).unwrap_err().index, 2);
    }

    #[test]
    fn test_shape_class_rows() {
        let lookups = Lookups {
            classes: Lookup::from_rows([(ClassID::from(1), "Spin"), (ClassID::from(2), "Yoga")])
                .unwrap(),
            ..Lookups::default()
        };

        let records = shape_class_rows(
            &[row(2, (2024, 5, 2)), row(9, (2024, 5, 1)), row(2, (2024, 5, 2))],
            &lookups,
        );

        assert_eq!(
            records
                .iter()
                .map(|r| (r.row.class_id, r.class_name.clone()))
                .collect::<Vec<_>>(),
            vec![
                (ClassID::from(2), Some(Name::new("Yoga").unwrap())),
                (ClassID::from(9), None),
                (ClassID::from(2), Some(Name::new("Yoga").unwrap())),
            ]
        );
    }

    #[test]
    fn test_shape_class_rows_empty() {
        assert_eq!(shape_class_rows(&[], &Lookups::default()), vec![]);
    }

    #[test]
    fn test_class_record_serializes_all_columns() {
        let records = shape_class_rows(&[row(1, (2024, 5, 1))], &Lookups::default());

        let value = serde_json::to_value(&records[0]).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), ClassRecord::COLUMNS.len());
        for column in ClassRecord::COLUMNS {
            assert!(object.contains_key(column), "missing column {column}");
        }
        assert_eq!(object["date_attended"], "2024-05-01");
    }

    #[rstest]
    #[case::no_classes(&[], 0)]
    #[case::single_class(&[(2024, 5, 1)], 1)]
    #[case::three_consecutive_days(&[(2024, 5, 1), (2024, 5, 2), (2024, 5, 3)], 3)]
    #[case::gap_keeps_earlier_run(&[(2024, 5, 1), (2024, 5, 2), (2024, 5, 6)], 2)]
    #[case::unsorted(&[(2024, 5, 2), (2024, 5, 3), (2024, 5, 1)], 3)]
    #[case::same_day_twice(&[(2024, 5, 1), (2024, 5, 1)], 1)]
    #[case::year_boundary(&[(2023, 12, 31), (2024, 1, 1)], 2)]
    fn test_compute_streak(#[case] dates: &[(i32, u32, u32)], #[case] expected: u32) {
        let records = shape_class_rows(
            &dates.iter().map(|date| row(1, *date)).collect::<Vec<_>>(),
            &Lookups::default(),
        );
        assert_eq!(compute_streak(&records), expected);
    }

    #[rstest]
    #[case::no_classes(0, 7, 0.0)]
    #[case::three_of_seven(3, 7, 42.857_142_857)]
    #[case::five_of_ten(5, 10, 50.0)]
    #[case::all_classes(7, 7, 100.0)]
    #[case::more_than_possible(12, 10, 100.0)]
    #[case::no_possible_classes(3, 0, 0.0)]
    fn test_compute_attendance_rate(
        #[case] attended: usize,
        #[case] total_possible_classes: u32,
        #[case] expected: f64,
    ) {
        let records = shape_class_rows(
            &vec![row(1, (2024, 5, 1)); attended],
            &Lookups::default(),
        );
        assert_approx_eq!(
            compute_attendance_rate(&records, total_possible_classes),
            expected,
            1e-6
        );
    }

    fn row(class_id: u32, (y, m, d): (i32, u32, u32)) -> ClassAttendanceRow {
        ClassAttendanceRow {
            class_id: class_id.into(),
            date_attended: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            days_attended: 1,
        }
    }
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::{Deref, Display, From, Into};
use serde::Serialize;

use crate::{FieldError, Lookups, Name, RowError};

#[derive(
    Deref, Debug, Default, Display, Clone, Copy, From, Hash, PartialEq, Eq, PartialOrd, Ord,
    Serialize,
)]
pub struct MuscleGroupID(u32);

#[derive(
    Deref, Debug, Default, Display, Clone, Copy, From, Hash, PartialEq, Eq, PartialOrd, Ord,
    Serialize,
)]
pub struct EquipmentID(u32);

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd, Serialize)]
pub struct Weight(f64);

impl Weight {
    /// Rows below this weight are bodyweight exercises.
    pub const BODYWEIGHT_THRESHOLD: f64 = 1.0;

    pub fn new(value: f64) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::NotFinite);
        }

        if value < 0.0 {
            return Err(WeightError::Negative);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_bodyweight(self) -> bool {
        self.0 < Self::BODYWEIGHT_THRESHOLD
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f64>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    Negative,
    #[error("Weight must be a finite number")]
    NotFinite,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if value == 0 {
            return Err(SetsError::Zero);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be at least 1")]
    Zero,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value == 0 {
            return Err(RepsError::Zero);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be at least 1")]
    Zero,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Format of the moment a row was logged. Fractional seconds are optional.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse the moment a row was logged, accepting a bare date as midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).or_else(|err| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| err)
    })
}

/// One logged exercise as stored by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutLogRow {
    pub workout_name: String,
    pub muscle_id: MuscleGroupID,
    pub equipment_id: EquipmentID,
    pub weight_used: Weight,
    pub sets_chosen: Sets,
    pub reps_chosen: Reps,
    pub time_logged: Option<NaiveDateTime>,
    pub workout_score: Option<f64>,
}

impl WorkoutLogRow {
    /// Parse a row from its raw column values.
    ///
    /// Older schema revisions have no `time_logged` or `workout_score`
    /// column, so 6, 7 or 8 fields are accepted. An empty optional field
    /// is treated as absent.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, FieldError> {
        if !(6..=8).contains(&fields.len()) {
            return Err(FieldError::Arity {
                expected: "6 to 8",
                found: fields.len(),
            });
        }

        let field = |i: usize| fields.get(i).map(|f| f.as_ref().trim());
        let optional = |i: usize| field(i).filter(|f| !f.is_empty());

        Ok(Self {
            workout_name: field(0).unwrap_or_default().to_string(),
            muscle_id: parse_id(field(1), "muscle_id")?.into(),
            equipment_id: parse_id(field(2), "equipment_id")?.into(),
            weight_used: Weight::try_from(field(3).unwrap_or_default())
                .map_err(|err| FieldError::invalid("weight_used", err))?,
            sets_chosen: Sets::try_from(field(4).unwrap_or_default())
                .map_err(|err| FieldError::invalid("sets_chosen", err))?,
            reps_chosen: Reps::try_from(field(5).unwrap_or_default())
                .map_err(|err| FieldError::invalid("reps_chosen", err))?,
            time_logged: optional(6)
                .map(parse_timestamp)
                .transpose()
                .map_err(|err| FieldError::invalid("time_logged", err))?,
            workout_score: optional(7)
                .map(parse_score)
                .transpose()
                .map_err(|err| FieldError::invalid("workout_score", err))?,
        })
    }
}

fn parse_id(value: Option<&str>, field: &'static str) -> Result<u32, FieldError> {
    value
        .unwrap_or_default()
        .parse::<u32>()
        .map_err(|err| FieldError::invalid(field, err))
}

fn parse_score(value: &str) -> Result<f64, &'static str> {
    match value.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err("Score must be a finite decimal"),
    }
}

/// Parse a batch of raw workout rows, stopping at the first malformed row.
pub fn parse_workout_rows<S: AsRef<str>>(
    rows: &[Vec<S>],
) -> Result<Vec<WorkoutLogRow>, RowError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            WorkoutLogRow::from_fields(row.as_slice()).map_err(|source| RowError { index, source })
        })
        .collect()
}

/// A workout row joined with catalog names and, once strength metrics have
/// been computed, the derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutRecord {
    #[serde(flatten)]
    pub row: WorkoutLogRow,
    pub muscle_group: Option<Name>,
    pub equipment: Option<Name>,
    pub adjusted_weight: Option<f64>,
    pub strength_score: Option<f64>,
    pub training_volume: Option<f64>,
}

impl WorkoutRecord {
    pub const COLUMNS: [&'static str; 13] = [
        "workout_name",
        "muscle_id",
        "equipment_id",
        "weight_used",
        "sets_chosen",
        "reps_chosen",
        "time_logged",
        "workout_score",
        "muscle_group",
        "equipment",
        "adjusted_weight",
        "strength_score",
        "training_volume",
    ];

    #[must_use]
    pub fn workout_name(&self) -> &str {
        &self.row.workout_name
    }

    #[must_use]
    pub fn weight_used(&self) -> f64 {
        self.row.weight_used.into()
    }
}

/// Join each row with its muscle group and equipment names.
///
/// Order is preserved. Ids missing from the lookups leave the name empty.
#[must_use]
pub fn shape_workout_rows(rows: &[WorkoutLogRow], lookups: &Lookups) -> Vec<WorkoutRecord> {
    rows.iter()
        .map(|row| WorkoutRecord {
            muscle_group: lookups.muscle_groups.name(row.muscle_id).cloned(),
            equipment: lookups.equipment.name(row.equipment_id).cloned(),
            adjusted_weight: None,
            strength_score: None,
            training_volume: None,
            row: row.clone(),
        })
        .collect()
}

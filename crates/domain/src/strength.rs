use log::debug;
use serde::{Deserialize, Serialize};

use crate::{WorkoutRecord, statistics};

pub const STRENGTH_SCORE_DECIMALS: i32 = 3;

/// How rows with a weight below one unit (bodyweight exercises) take part in
/// the strength metrics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ZeroWeightPolicy {
    /// Leave such rows out of the scores and weight aggregates.
    #[default]
    Exclude,
    /// Score such rows with `fraction` of the user's body weight.
    Bodyweight {
        #[serde(default = "ZeroWeightPolicy::default_fraction")]
        fraction: f64,
    },
}

impl ZeroWeightPolicy {
    pub const DEFAULT_FRACTION: f64 = 0.97;

    fn default_fraction() -> f64 {
        Self::DEFAULT_FRACTION
    }

    #[must_use]
    pub fn bodyweight() -> Self {
        ZeroWeightPolicy::Bodyweight {
            fraction: Self::DEFAULT_FRACTION,
        }
    }

    #[must_use]
    pub fn includes(self, record: &WorkoutRecord) -> bool {
        match self {
            ZeroWeightPolicy::Exclude => !record.row.weight_used.is_bodyweight(),
            ZeroWeightPolicy::Bodyweight { .. } => true,
        }
    }

    fn adjusted_weight(self, record: &WorkoutRecord, body_weight: Option<f64>) -> Option<f64> {
        if !record.row.weight_used.is_bodyweight() {
            return Some(record.weight_used());
        }
        match self {
            ZeroWeightPolicy::Exclude => None,
            ZeroWeightPolicy::Bodyweight { fraction } => body_weight.map(|bw| bw * fraction),
        }
    }
}

/// Aggregates over the workout rows included by the zero-weight policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthMetrics {
    pub total_workouts: usize,
    pub total_weight_lifted: f64,
    pub average_weight: f64,
    pub max_strength_score: f64,
    /// Whether a usable body weight was available, i.e. whether scores were
    /// computed at all.
    pub scored: bool,
}

/// Body weights that are missing, zero, negative or not finite cannot
/// normalize a score.
#[must_use]
pub fn usable_body_weight(body_weight: Option<f64>) -> Option<f64> {
    body_weight.filter(|bw| bw.is_finite() && *bw > 0.0)
}

/// Strength score of a single row: `weight × reps × sets / body weight`,
/// rounded to three decimals.
#[must_use]
pub fn strength_score(adjusted_weight: f64, reps: u32, sets: u32, body_weight: f64) -> f64 {
    statistics::round_to(
        adjusted_weight * f64::from(reps) * f64::from(sets) / body_weight,
        STRENGTH_SCORE_DECIMALS,
    )
}

/// Fill the derived columns of the shaped workout records and aggregate them.
///
/// Records excluded by `policy` keep empty derived columns and do not count
/// towards any aggregate. Without a usable body weight no strength score is
/// computed and `max_strength_score` is 0.0.
#[must_use]
pub fn compute_strength_metrics(
    records: &[WorkoutRecord],
    body_weight: Option<f64>,
    policy: ZeroWeightPolicy,
) -> (StrengthMetrics, Vec<WorkoutRecord>) {
    let body_weight = usable_body_weight(body_weight);

    if body_weight.is_none() {
        debug!("no usable body weight, skipping strength scores");
    }

    let enriched = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if policy.includes(&record) {
                record.adjusted_weight = policy.adjusted_weight(&record, body_weight);
                record.training_volume = record.adjusted_weight.map(|weight| {
                    weight
                        * f64::from(u32::from(record.row.sets_chosen))
                        * f64::from(u32::from(record.row.reps_chosen))
                });
                record.strength_score = body_weight.and_then(|bw| {
                    let precomputed = record
                        .row
                        .workout_score
                        .filter(|score| *score > 0.0)
                        .map(|score| statistics::round_to(score, STRENGTH_SCORE_DECIMALS));
                    precomputed.or_else(|| {
                        record.adjusted_weight.map(|weight| {
                            strength_score(
                                weight,
                                record.row.reps_chosen.into(),
                                record.row.sets_chosen.into(),
                                bw,
                            )
                        })
                    })
                });
            } else {
                record.adjusted_weight = None;
                record.strength_score = None;
                record.training_volume = None;
            }
            record
        })
        .collect::<Vec<_>>();

    let included = enriched
        .iter()
        .filter(|record| policy.includes(record))
        .collect::<Vec<_>>();
    let weights = included
        .iter()
        .map(|record| record.weight_used())
        .collect::<Vec<_>>();

    let metrics = StrengthMetrics {
        total_workouts: included.len(),
        total_weight_lifted: weights.iter().sum(),
        average_weight: statistics::mean(&weights).unwrap_or(0.0),
        max_strength_score: included
            .iter()
            .filter_map(|record| record.strength_score)
            .fold(0.0, f64::max),
        scored: body_weight.is_some(),
    };

    debug!(
        "computed strength metrics for {} of {} workouts ({policy:?})",
        metrics.total_workouts,
        records.len()
    );

    (metrics, enriched)
}

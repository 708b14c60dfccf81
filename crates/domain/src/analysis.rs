//! Per-exercise tables shown next to the summary.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use crate::{Name, WorkoutRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseAnalysis {
    pub workout_name: String,
    pub max_strength_score: f64,
    pub max_weight_lifted: f64,
}

/// Best strength score and heaviest weight per exercise, strongest first.
///
/// Only records with a positive strength score take part.
#[must_use]
pub fn exercise_analysis(records: &[WorkoutRecord]) -> Vec<ExerciseAnalysis> {
    let mut maxima: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for record in records {
        let Some(score) = record.strength_score.filter(|score| *score > 0.0) else {
            continue;
        };
        let weight = record.weight_used();
        maxima
            .entry(record.workout_name())
            .and_modify(|(max_score, max_weight)| {
                *max_score = max_score.max(score);
                *max_weight = max_weight.max(weight);
            })
            .or_insert((score, weight));
    }

    let mut result = maxima
        .into_iter()
        .map(
            |(workout_name, (max_strength_score, max_weight_lifted))| ExerciseAnalysis {
                workout_name: workout_name.to_string(),
                max_strength_score,
                max_weight_lifted,
            },
        )
        .collect::<Vec<_>>();
    result.sort_by(|a, b| descending(a.max_strength_score, b.max_strength_score));
    result
}

/// Number of logged workouts per muscle group, most frequent first.
///
/// Records without a resolved muscle group name are not counted.
#[must_use]
pub fn workouts_by_muscle_group(records: &[WorkoutRecord]) -> Vec<(Name, usize)> {
    let mut counts: BTreeMap<&Name, usize> = BTreeMap::new();

    for name in records.iter().filter_map(|r| r.muscle_group.as_ref()) {
        *counts.entry(name).or_default() += 1;
    }

    let mut result = counts
        .into_iter()
        .map(|(name, count)| (name.clone(), count))
        .collect::<Vec<_>>();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// Heaviest raw weight per exercise over all records, heaviest first.
#[must_use]
pub fn max_weight_by_exercise(records: &[WorkoutRecord]) -> Vec<(String, f64)> {
    let mut maxima: BTreeMap<&str, f64> = BTreeMap::new();

    for record in records {
        let weight = record.weight_used();
        maxima
            .entry(record.workout_name())
            .and_modify(|max| *max = max.max(weight))
            .or_insert(weight);
    }

    let mut result = maxima
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect::<Vec<_>>();
    result.sort_by(|a, b| descending(a.1, b.1));
    result
}

// Stable sorts keep the name order of the BTreeMap for ties.
fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

use log::debug;
use serde::Serialize;

use crate::{
    ClassAttendanceRow, ClassRecord, Lookups, MetricsConfig, WorkoutLogRow, WorkoutRecord,
    compute_attendance_rate, compute_streak, compute_strength_metrics, shape_class_rows,
    shape_workout_rows,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub total_workouts: usize,
    pub total_weight_lifted: f64,
    pub average_weight: f64,
    pub max_strength_score: f64,
    /// False if no usable body weight was known, in which case
    /// `max_strength_score` is 0.0 because nothing was scored.
    pub strength_scored: bool,
    pub total_classes: usize,
    pub attendance_rate: f64,
    /// Longest run of classes on consecutive days.
    pub current_streak: u32,
}

/// Everything the dashboard of one user shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserMetrics {
    pub summary: MetricsSummary,
    pub workouts: Vec<WorkoutRecord>,
    pub classes: Vec<ClassRecord>,
}

/// Derives user metrics from freshly fetched rows.
///
/// The engine only holds its configuration, so one instance can serve any
/// number of requests.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    config: MetricsConfig,
}

impl MetricsEngine {
    #[must_use]
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    #[must_use]
    pub fn calculate_user_metrics(
        &self,
        workout_rows: &[WorkoutLogRow],
        class_rows: &[ClassAttendanceRow],
        body_weight: Option<f64>,
        lookups: &Lookups,
    ) -> UserMetrics {
        let (strength, workouts) = compute_strength_metrics(
            &shape_workout_rows(workout_rows, lookups),
            body_weight,
            self.config.zero_weight_policy,
        );
        let classes = shape_class_rows(class_rows, lookups);

        let summary = MetricsSummary {
            total_workouts: strength.total_workouts,
            total_weight_lifted: strength.total_weight_lifted,
            average_weight: strength.average_weight,
            max_strength_score: strength.max_strength_score,
            strength_scored: strength.scored,
            total_classes: classes.len(),
            attendance_rate: compute_attendance_rate(
                &classes,
                self.config.expected_classes_per_period,
            ),
            current_streak: compute_streak(&classes),
        };

        debug!(
            "calculated metrics from {} workout rows and {} class rows",
            workouts.len(),
            classes.len()
        );

        UserMetrics {
            summary,
            workouts,
            classes,
        }
    }
}

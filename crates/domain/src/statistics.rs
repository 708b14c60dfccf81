use chrono::NaiveDate;

/// Round `value` to `decimals` decimal places, halves away from zero.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Arithmetic mean, or `None` for an empty series.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    Some(values.iter().sum::<f64>() / len)
}

/// Length of the longest run of dates that are exactly one calendar day apart.
///
/// The dates are sorted first. Two entries on the same day do not extend a
/// run, they start a new one. An empty series has a run length of 0.
#[must_use]
pub fn longest_daily_run(dates: &[NaiveDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut sorted = dates.to_vec();
    sorted.sort_unstable();

    let mut run = 1;
    let mut longest = 1;

    for pair in sorted.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }

    longest
}

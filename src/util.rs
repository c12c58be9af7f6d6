//! Small utility helpers used across modules.

/// `numerator / denominator * 100`, or 0 when the denominator is 0.
pub fn percent(numerator: u32, denominator: u32) -> f64 {
  if denominator == 0 {
    return 0.0;
  }
  f64::from(numerator) / f64::from(denominator) * 100.0
}

/// Whole-number percentage, rounded half away from zero.
pub fn percent_rounded(numerator: u32, denominator: u32) -> u32 {
  percent(numerator, denominator).round() as u32
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
  chrono::Utc::now().timestamp_millis()
}

/// Fresh unique id for a history entry.
pub fn new_entry_id() -> String {
  uuid::Uuid::new_v4().to_string()
}

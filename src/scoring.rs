//! Points, streaks and multiplier labels.

use crate::domain::Answer;

pub const BASE_POINTS: u32 = 100;
pub const STREAK_STEP: u32 = 10;
pub const MAX_STREAK_BONUS: u32 = 200;

/// Points for one answer. The bonus uses the streak held *before* this answer.
pub fn score(is_correct: bool, prior_streak: u32) -> u32 {
  if !is_correct {
    return 0;
  }
  BASE_POINTS + prior_streak.saturating_mul(STREAK_STEP).min(MAX_STREAK_BONUS)
}

/// Streak after applying an answer.
pub fn next_streak(is_correct: bool, prior_streak: u32) -> u32 {
  if is_correct { prior_streak.saturating_add(1) } else { 0 }
}

/// Damage multiplier shown next to an answer.
pub fn multiplier_label(answer: Answer) -> &'static str {
  match answer {
    Answer::DoubleWeakness => "2.56×",
    Answer::SuperEffective => "1.6×",
    Answer::Normal => "1×",
    Answer::NotVeryEffective => "0.625×",
    Answer::DoubleResist => "0.39×",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wrong_answers_score_nothing() {
    for streak in [0, 1, 5, 25, u32::MAX] {
      assert_eq!(score(false, streak), 0);
    }
  }

  #[test]
  fn streak_bonus_is_capped() {
    assert_eq!(score(true, 0), 100);
    assert_eq!(score(true, 5), 150);
    assert_eq!(score(true, 20), 300);
    assert_eq!(score(true, 25), 300);
    assert_eq!(score(true, u32::MAX), 300);
  }

  #[test]
  fn streak_advances_or_resets() {
    assert_eq!(next_streak(true, 3), 4);
    assert_eq!(next_streak(false, 3), 0);
    assert_eq!(next_streak(true, u32::MAX), u32::MAX);
  }

  #[test]
  fn labels_cover_every_answer() {
    assert_eq!(multiplier_label(Answer::DoubleWeakness), "2.56×");
    assert_eq!(multiplier_label(Answer::SuperEffective), "1.6×");
    assert_eq!(multiplier_label(Answer::Normal), "1×");
    assert_eq!(multiplier_label(Answer::NotVeryEffective), "0.625×");
    assert_eq!(multiplier_label(Answer::DoubleResist), "0.39×");
  }
}

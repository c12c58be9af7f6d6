//! Folding answers into stats and history.
//!
//! Everything here takes the previous values and returns new ones; callers decide
//! whether to keep, persist or discard the result.

use serde::Serialize;

use crate::domain::{Answer, GameStats, HistoryEntry, Question};
use crate::scoring::{next_streak, score};
use crate::util::{new_entry_id, now_millis};

/// Result of applying one answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
  pub is_correct: bool,
  pub points: u32,
  pub new_stats: GameStats,
  pub entry: HistoryEntry,
}

/// Apply `user_answer` to `stats`, stamping the entry with a fresh id and the current time.
pub fn apply_answer(stats: &GameStats, question: &Question, user_answer: Answer) -> AnswerOutcome {
  apply_answer_at(stats, question, user_answer, new_entry_id(), now_millis())
}

/// Same as [`apply_answer`] with caller-provided id and timestamp.
pub fn apply_answer_at(
  stats: &GameStats,
  question: &Question,
  user_answer: Answer,
  id: String,
  timestamp: i64,
) -> AnswerOutcome {
  let is_correct = user_answer == question.correct_answer;
  let points = score(is_correct, stats.streak);
  let streak = next_streak(is_correct, stats.streak);

  let new_stats = GameStats {
    score: stats.score.saturating_add(u64::from(points)),
    streak,
    best_streak: stats.best_streak.max(streak),
    total_questions: stats.total_questions.saturating_add(1),
    correct_answers: stats.correct_answers.saturating_add(u32::from(is_correct)),
  };

  let entry = HistoryEntry {
    id,
    attacker: question.attacker,
    defender1: question.defender1,
    defender2: question.defender2,
    user_answer,
    correct_answer: question.correct_answer,
    is_correct,
    points,
    timestamp,
  };

  AnswerOutcome { is_correct, points, new_stats, entry }
}

/// Newest-first history prepend.
pub fn record(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
  history.insert(0, entry);
}

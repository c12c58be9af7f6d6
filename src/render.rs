//! Plain-text rendering of replies for the terminal.

use crate::countdown::{Phase, CHALLENGE_SECONDS};
use crate::domain::HistoryEntry;
use crate::protocol::{QuestionOut, Reply};
use crate::summary::Summary;

pub fn render_text(reply: &Reply) -> String {
  match reply {
    Reply::Question { question } => render_question(question),
    Reply::AnswerResult { correct, points, user_answer, correct_answer, multiplier, streak, awaiting_continue } => {
      let mut out = if *correct {
        format!("Correct! +{} points (streak {})", points, streak)
      } else {
        format!(
          "Wrong: you said {}, it is {} ({})",
          user_answer.label(),
          correct_answer.label(),
          multiplier
        )
      };
      if *awaiting_continue {
        out.push_str("\nPress continue for the next question.");
      }
      out
    }
    Reply::Stats { stats, accuracy_percent } => format!(
      "Score {} | streak {} (best {}) | {}/{} correct ({}%)",
      stats.score, stats.streak, stats.best_streak, stats.correct_answers, stats.total_questions, accuracy_percent
    ),
    Reply::History { entries } => render_history(entries),
    Reply::Summary { summary } => render_summary(summary),
    Reply::Modes { dual_mode, show_feedback } => format!(
      "Dual mode {} | feedback {}",
      on_off(*dual_mode),
      on_off(*show_feedback)
    ),
    Reply::Countdown { phase, mode, time_left, stats, accuracy_percent, history } => match phase {
      Phase::Idle => "Challenge closed.".to_string(),
      Phase::Ready => format!("Challenge ready: {} seconds. Type `start single|dual|both`.", CHALLENGE_SECONDS),
      Phase::Active => format!("Challenge running ({:?}): {}s left", mode, time_left),
      Phase::Expired => {
        let head = format!(
          "Time is up! Answered {} | correct {} | wrong {} | best streak {} | accuracy {}%",
          stats.answered,
          stats.correct,
          stats.wrong(),
          stats.best_streak,
          accuracy_percent
        );
        if history.is_empty() {
          head
        } else {
          format!("{}\n{}", head, render_history(history))
        }
      }
    },
    Reply::Shortcuts { shortcuts } => format!(
      "super-effective={} normal={} not-very-effective={} double-weakness={} double-resist={} reset={} continue={}",
      shortcuts.super_effective,
      shortcuts.normal,
      shortcuts.not_very_effective,
      shortcuts.double_weakness,
      shortcuts.double_resist,
      shortcuts.reset,
      shortcuts.continue_
    ),
    Reply::Reset => "Progress reset.".to_string(),
    Reply::Help { text } => text.clone(),
    Reply::Ignored { reason } => format!("({})", reason),
    Reply::Error { message } => format!("Error: {}", message),
  }
}

fn on_off(b: bool) -> &'static str {
  if b { "on" } else { "off" }
}

fn defenders(d1: impl std::fmt::Display, d2: Option<impl std::fmt::Display>) -> String {
  match d2 {
    Some(d2) => format!("{} / {}", d1, d2),
    None => d1.to_string(),
  }
}

fn render_question(q: &QuestionOut) -> String {
  format!(
    "What happens when {} attacks {}?",
    q.attacker.name().to_uppercase(),
    defenders(q.defender1.name().to_uppercase(), q.defender2.map(|d| d.name().to_uppercase()))
  )
}

fn render_history(entries: &[HistoryEntry]) -> String {
  if entries.is_empty() {
    return "No answers yet. Start playing!".to_string();
  }
  entries
    .iter()
    .map(|e| {
      let mut line = format!(
        "{} -> {}: {}",
        e.attacker,
        defenders(e.defender1, e.defender2),
        e.user_answer.label()
      );
      if e.is_correct {
        line.push_str(&format!(" (+{})", e.points));
      } else {
        line.push_str(&format!(" (correct: {})", e.correct_answer.label()));
      }
      line
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn render_summary(s: &Summary) -> String {
  if s.total == 0 {
    return "No history yet. Start playing to see your performance summary!".to_string();
  }
  let mut out = vec![format!("{}/{} correct ({:.1}% accuracy)", s.correct, s.total, s.accuracy_percent)];
  if !s.top_mistakes.is_empty() {
    out.push("Most common mistakes:".to_string());
    for m in &s.top_mistakes {
      out.push(format!(
        "  {}x {} -> {}: you said {}, correct {}",
        m.count,
        m.attacker,
        defenders(m.defender1, m.defender2),
        m.last_user_answer.label(),
        m.correct_answer.label()
      ));
    }
  }
  if !s.weakest_attackers.is_empty() {
    out.push("Weakest attacking categories (minimum 3 questions):".to_string());
    for w in &s.weakest_attackers {
      out.push(format!(
        "  {}: {:.0}% accuracy ({} questions)",
        w.category.name().to_uppercase(),
        w.accuracy_percent,
        w.sample_count
      ));
    }
  }
  out.join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::countdown::{ChronoStats, ChronoTypeMode};
  use crate::domain::{Answer, Category};

  #[test]
  fn question_lists_both_defenders() {
    let text = render_text(&Reply::Question {
      question: QuestionOut {
        attacker: Category::Fire,
        defender1: Category::Grass,
        defender2: Some(Category::Ice),
      },
    });
    assert_eq!(text, "What happens when FIRE attacks GRASS / ICE?");
  }

  #[test]
  fn summary_accuracy_has_one_decimal() {
    let entry = |is_correct: bool| HistoryEntry {
      id: String::new(),
      attacker: Category::Fire,
      defender1: Category::Grass,
      defender2: None,
      user_answer: Answer::SuperEffective,
      correct_answer: if is_correct { Answer::SuperEffective } else { Answer::Normal },
      is_correct,
      points: 0,
      timestamp: 0,
    };
    let summary = crate::summary::summarize(&[entry(true), entry(false), entry(false)]);
    let text = render_text(&Reply::Summary { summary });
    assert!(text.starts_with("1/3 correct (33.3% accuracy)"), "{text}");
  }

  #[test]
  fn results_list_challenge_answers() {
    let entry = HistoryEntry {
      id: String::new(),
      attacker: Category::Water,
      defender1: Category::Fire,
      defender2: Some(Category::Rock),
      user_answer: Answer::SuperEffective,
      correct_answer: Answer::DoubleWeakness,
      is_correct: false,
      points: 0,
      timestamp: 0,
    };
    let text = render_text(&Reply::Countdown {
      phase: Phase::Expired,
      mode: ChronoTypeMode::Dual,
      time_left: 0,
      stats: ChronoStats { answered: 1, correct: 0, current_streak: 0, best_streak: 0 },
      accuracy_percent: 0,
      history: vec![entry],
    });
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].contains("wrong 1"), "{text}");
    assert_eq!(lines[1], "water -> fire / rock: super effective (correct: double weakness)");
  }

  #[test]
  fn empty_summary_message() {
    let text = render_text(&Reply::Summary { summary: crate::summary::summarize(&[]) });
    assert!(text.starts_with("No history yet"));
  }
}

//! Derived analytics over a history list: accuracy, repeated mistakes, weakest attackers.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Answer, Category, HistoryEntry};
use crate::util::percent;

pub const TOP_MISTAKES_LIMIT: usize = 10;
pub const WEAKEST_ATTACKERS_LIMIT: usize = 5;
/// Attackers answered fewer times than this are left out of the weakest list.
pub const MIN_ATTACKER_SAMPLES: u32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  pub total: u32,
  pub correct: u32,
  pub accuracy_percent: f64,
  pub top_mistakes: Vec<MistakeStats>,
  pub weakest_attackers: Vec<AttackerAccuracy>,
}

/// A matchup answered wrongly at least once. Keyed by the exact defender order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeStats {
  pub attacker: Category,
  pub defender1: Category,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub defender2: Option<Category>,
  pub count: u32,
  /// Answer from the first miss encountered; with newest-first history that is the latest one.
  pub last_user_answer: Answer,
  pub correct_answer: Answer,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackerAccuracy {
  pub category: Category,
  pub accuracy_percent: f64,
  pub sample_count: u32,
}

type MatchupKey = (Category, Category, Option<Category>);

pub fn summarize(history: &[HistoryEntry]) -> Summary {
  let total = history.len() as u32;
  let correct = history.iter().filter(|h| h.is_correct).count() as u32;

  Summary {
    total,
    correct,
    accuracy_percent: percent(correct, total),
    top_mistakes: top_mistakes(history),
    weakest_attackers: weakest_attackers(history),
  }
}

fn top_mistakes(history: &[HistoryEntry]) -> Vec<MistakeStats> {
  let mut index: HashMap<MatchupKey, usize> = HashMap::new();
  let mut groups: Vec<MistakeStats> = Vec::new();

  for miss in history.iter().filter(|h| !h.is_correct) {
    let key = (miss.attacker, miss.defender1, miss.defender2);
    match index.get(&key) {
      Some(&i) => groups[i].count += 1,
      None => {
        index.insert(key, groups.len());
        groups.push(MistakeStats {
          attacker: miss.attacker,
          defender1: miss.defender1,
          defender2: miss.defender2,
          count: 1,
          last_user_answer: miss.user_answer,
          correct_answer: miss.correct_answer,
        });
      }
    }
  }

  // stable: equal counts keep first-seen order
  groups.sort_by(|a, b| b.count.cmp(&a.count));
  groups.truncate(TOP_MISTAKES_LIMIT);
  groups
}

fn weakest_attackers(history: &[HistoryEntry]) -> Vec<AttackerAccuracy> {
  let mut order: Vec<Category> = Vec::new();
  let mut tally: HashMap<Category, (u32, u32)> = HashMap::new();

  for entry in history {
    let t = tally.entry(entry.attacker).or_insert_with(|| {
      order.push(entry.attacker);
      (0, 0)
    });
    t.1 += 1;
    if entry.is_correct {
      t.0 += 1;
    }
  }

  let mut out: Vec<AttackerAccuracy> = order
    .into_iter()
    .filter_map(|category| {
      let (correct, total) = tally.get(&category).copied()?;
      (total >= MIN_ATTACKER_SAMPLES).then(|| AttackerAccuracy {
        category,
        accuracy_percent: percent(correct, total),
        sample_count: total,
      })
    })
    .collect();

  out.sort_by(|a, b| a.accuracy_percent.total_cmp(&b.accuracy_percent));
  out.truncate(WEAKEST_ATTACKERS_LIMIT);
  out
}

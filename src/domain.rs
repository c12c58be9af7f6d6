//! Domain models used by the game: categories, answers, questions, stats and history.

use serde::{Deserialize, Serialize};

/// One of the 18 fixed matchup categories. Used as both attacker and defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
  Normal,
  Fire,
  Water,
  Electric,
  Grass,
  Ice,
  Fighting,
  Poison,
  Ground,
  Flying,
  Psychic,
  Bug,
  Rock,
  Ghost,
  Dragon,
  Dark,
  Steel,
  Fairy,
}

impl Category {
  /// Canonical order; sampling draws uniformly from this slice.
  pub const ALL: [Category; 18] = [
    Category::Normal, Category::Fire, Category::Water, Category::Electric,
    Category::Grass, Category::Ice, Category::Fighting, Category::Poison,
    Category::Ground, Category::Flying, Category::Psychic, Category::Bug,
    Category::Rock, Category::Ghost, Category::Dragon, Category::Dark,
    Category::Steel, Category::Fairy,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Category::Normal => "normal",
      Category::Fire => "fire",
      Category::Water => "water",
      Category::Electric => "electric",
      Category::Grass => "grass",
      Category::Ice => "ice",
      Category::Fighting => "fighting",
      Category::Poison => "poison",
      Category::Ground => "ground",
      Category::Flying => "flying",
      Category::Psychic => "psychic",
      Category::Bug => "bug",
      Category::Rock => "rock",
      Category::Ghost => "ghost",
      Category::Dragon => "dragon",
      Category::Dark => "dark",
      Category::Steel => "steel",
      Category::Fairy => "fairy",
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

/// Effectiveness classification chosen by the player or computed for a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Answer {
  SuperEffective,
  Normal,
  NotVeryEffective,
  /// Only reachable with two defenders.
  DoubleWeakness,
  /// Only reachable with two defenders.
  DoubleResist,
}

impl Answer {
  pub const ALL: [Answer; 5] = [
    Answer::SuperEffective,
    Answer::Normal,
    Answer::NotVeryEffective,
    Answer::DoubleWeakness,
    Answer::DoubleResist,
  ];

  /// Human label ("super effective", "double resist", ...).
  pub fn label(self) -> &'static str {
    match self {
      Answer::SuperEffective => "super effective",
      Answer::Normal => "normal",
      Answer::NotVeryEffective => "not very effective",
      Answer::DoubleWeakness => "double weakness",
      Answer::DoubleResist => "double resist",
    }
  }
}

/// A single round. Produced by the generator, answered once, then dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub attacker: Category,
  pub defender1: Category,
  /// Present only in dual mode; never equal to `defender1`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub defender2: Option<Category>,
  pub correct_answer: Answer,
}

/// Running totals for a play session. Persisted between runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
  pub score: u64,
  pub streak: u32,
  pub best_streak: u32,
  pub total_questions: u32,
  pub correct_answers: u32,
}

/// One answered question. Newest entries go to the front of a history list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
  pub id: String,
  pub attacker: Category,
  pub defender1: Category,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub defender2: Option<Category>,
  pub user_answer: Answer,
  pub correct_answer: Answer,
  pub is_correct: bool,
  pub points: u32,
  /// Milliseconds since the Unix epoch.
  pub timestamp: i64,
}

//! Timed challenge: a 60-second countdown with its own isolated stats and history.
//!
//! Phases:
//!   Idle --open--> Ready --start--> Active --tick to zero / cancel--> Expired
//!   Expired --start--> Active (restart), any --close--> Idle
//!
//! Cancelling is the same as running out of time.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::HistoryEntry;
use crate::session::record;
use crate::util::percent_rounded;

pub const CHALLENGE_SECONDS: u32 = 60;

/// Which question shapes the challenge serves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronoTypeMode {
  #[default]
  Single,
  Dual,
  /// Coin flip per question.
  Both,
}

impl ChronoTypeMode {
  pub fn pick_dual<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
    match self {
      ChronoTypeMode::Single => false,
      ChronoTypeMode::Dual => true,
      ChronoTypeMode::Both => rng.gen_bool(0.5),
    }
  }
}

impl std::str::FromStr for ChronoTypeMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "single" => Ok(ChronoTypeMode::Single),
      "dual" => Ok(ChronoTypeMode::Dual),
      "both" => Ok(ChronoTypeMode::Both),
      other => Err(format!("Unknown challenge mode: {}", other)),
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  #[default]
  Idle,
  Ready,
  Active,
  Expired,
}

/// Counters kept only for the running challenge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronoStats {
  pub answered: u32,
  pub correct: u32,
  pub current_streak: u32,
  pub best_streak: u32,
}

impl ChronoStats {
  pub fn accuracy_percent(&self) -> u32 {
    percent_rounded(self.correct, self.answered)
  }

  pub fn wrong(&self) -> u32 {
    self.answered.saturating_sub(self.correct)
  }
}

#[derive(Clone, Debug, Default)]
pub struct Countdown {
  phase: Phase,
  mode: ChronoTypeMode,
  time_left: u32,
  stats: ChronoStats,
  history: Vec<HistoryEntry>,
}

impl Countdown {
  pub fn phase(&self) -> Phase { self.phase }
  pub fn mode(&self) -> ChronoTypeMode { self.mode }
  pub fn time_left(&self) -> u32 { self.time_left }
  pub fn stats(&self) -> &ChronoStats { &self.stats }
  pub fn history(&self) -> &[HistoryEntry] { &self.history }

  pub fn is_active(&self) -> bool {
    self.phase == Phase::Active
  }

  /// Answers count only while the clock is running.
  pub fn accepts_answers(&self) -> bool {
    self.phase == Phase::Active && self.time_left > 0
  }

  /// Show the challenge's ready screen. Only from Idle.
  pub fn open(&mut self) -> bool {
    if self.phase != Phase::Idle {
      return false;
    }
    self.phase = Phase::Ready;
    true
  }

  /// Begin (or restart) the clock with a fresh isolated session.
  pub fn start(&mut self, mode: ChronoTypeMode) -> bool {
    if !matches!(self.phase, Phase::Ready | Phase::Expired) {
      return false;
    }
    self.phase = Phase::Active;
    self.mode = mode;
    self.time_left = CHALLENGE_SECONDS;
    self.stats = ChronoStats::default();
    self.history.clear();
    true
  }

  /// One-second tick. Returns true when this tick ended the challenge.
  pub fn tick(&mut self) -> bool {
    if self.phase != Phase::Active {
      return false;
    }
    self.time_left = self.time_left.saturating_sub(1);
    if self.time_left == 0 {
      self.phase = Phase::Expired;
      return true;
    }
    false
  }

  /// Stop early; results are shown exactly as on expiry.
  pub fn cancel(&mut self) -> bool {
    if self.phase != Phase::Active {
      return false;
    }
    self.time_left = 0;
    self.phase = Phase::Expired;
    true
  }

  /// Leave the challenge and drop its session.
  pub fn close(&mut self) {
    *self = Countdown::default();
  }

  /// Fold an answered entry into the challenge session. Ignored unless accepting answers.
  pub fn record(&mut self, entry: &HistoryEntry) -> bool {
    if !self.accepts_answers() {
      return false;
    }
    self.stats.answered = self.stats.answered.saturating_add(1);
    if entry.is_correct {
      self.stats.correct = self.stats.correct.saturating_add(1);
      self.stats.current_streak = self.stats.current_streak.saturating_add(1);
      self.stats.best_streak = self.stats.best_streak.max(self.stats.current_streak);
    } else {
      self.stats.current_streak = 0;
    }
    record(&mut self.history, entry.clone());
    true
  }
}

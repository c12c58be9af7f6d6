//! Driver protocol: commands read from the terminal and replies sent back (serde ready).
//! Replies are plain values so they can be printed as text or as JSON lines.

use serde::Serialize;

use crate::countdown::{ChronoStats, ChronoTypeMode, Phase};
use crate::domain::{Answer, Category, GameStats, HistoryEntry, Question};
use crate::keymap::{Binding, Shortcuts};
use crate::summary::Summary;

/// One line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
  /// A raw shortcut symbol, resolved through the keymap.
  Key(String),
  ToggleDual,
  ToggleFeedback,
  Stats,
  History,
  Summary,
  OpenChrono,
  StartChrono(ChronoTypeMode),
  CancelChrono,
  CloseChrono,
  Bind { slot: Binding, symbol: String },
  Shortcuts,
  Help,
  Quit,
}

/// Words `parse_command` reads as commands; none of them can reach the keymap.
pub const COMMAND_WORDS: &[&str] = &[
  "dual", "feedback", "stats", "history", "summary", "chrono", "start", "cancel", "close", "bind", "shortcuts",
  "help", "quit", "exit",
];

pub fn is_command_word(symbol: &str) -> bool {
  COMMAND_WORDS.iter().any(|w| w.eq_ignore_ascii_case(symbol.trim()))
}

/// Parse an input line. Anything that is not a known word is treated as a key symbol.
pub fn parse_command(line: &str) -> Result<Command, String> {
  if line == " " {
    return Ok(Command::Key(line.to_string()));
  }
  let mut words = line.split_whitespace();
  let Some(head) = words.next() else {
    return Ok(Command::Key(String::new()));
  };
  let rest: Vec<&str> = words.collect();

  let cmd = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
    ("dual", []) => Command::ToggleDual,
    ("feedback", []) => Command::ToggleFeedback,
    ("stats", []) => Command::Stats,
    ("history", []) => Command::History,
    ("summary", []) => Command::Summary,
    ("chrono", []) => Command::OpenChrono,
    ("start", []) => Command::StartChrono(ChronoTypeMode::default()),
    ("start", [mode]) => Command::StartChrono(mode.parse()?),
    ("cancel", []) => Command::CancelChrono,
    ("close", []) => Command::CloseChrono,
    ("bind", [slot, symbol]) => Command::Bind { slot: slot.parse()?, symbol: symbol.to_string() },
    ("bind", _) => return Err("Usage: bind <action> <key>".into()),
    ("shortcuts", []) => Command::Shortcuts,
    ("help", []) => Command::Help,
    ("quit", []) | ("exit", []) => Command::Quit,
    (_, []) => Command::Key(head.to_string()),
    _ => return Err(format!("Unknown command: {}", line.trim())),
  };
  Ok(cmd)
}

/// Question as shown to the player (no answer attached).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
  pub attacker: Category,
  pub defender1: Category,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub defender2: Option<Category>,
}

pub fn to_out(q: &Question) -> QuestionOut {
  QuestionOut {
    attacker: q.attacker,
    defender1: q.defender1,
    defender2: q.defender2,
  }
}

/// Messages the game sends back to the terminal.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
  Question {
    question: QuestionOut,
  },
  AnswerResult {
    correct: bool,
    points: u32,
    #[serde(rename = "userAnswer")]
    user_answer: Answer,
    #[serde(rename = "correctAnswer")]
    correct_answer: Answer,
    multiplier: &'static str,
    streak: u32,
    /// Feedback is on screen; the next question waits for `continue`.
    #[serde(rename = "awaitingContinue")]
    awaiting_continue: bool,
  },
  Stats {
    stats: GameStats,
    #[serde(rename = "accuracyPercent")]
    accuracy_percent: u32,
  },
  History {
    entries: Vec<HistoryEntry>,
  },
  Summary {
    summary: Summary,
  },
  Modes {
    #[serde(rename = "dualMode")]
    dual_mode: bool,
    #[serde(rename = "showFeedback")]
    show_feedback: bool,
  },
  Countdown {
    phase: Phase,
    mode: ChronoTypeMode,
    #[serde(rename = "timeLeft")]
    time_left: u32,
    stats: ChronoStats,
    #[serde(rename = "accuracyPercent")]
    accuracy_percent: u32,
    /// Challenge answers, newest first. Filled only on the results screen.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    history: Vec<HistoryEntry>,
  },
  Shortcuts {
    shortcuts: Shortcuts,
  },
  Reset,
  Help {
    text: String,
  },
  Ignored {
    reason: String,
  },
  Error {
    message: String,
  },
}

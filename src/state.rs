//! Game state owned by the driver: stats, history, the current question, preferences
//! and the timed challenge.
//!
//! This module owns:
//!   - the main session (stats + newest-first history)
//!   - the question on screen and the feedback latch
//!   - the dual-mode flag, the feedback preference and the shortcut table
//!   - the countdown state machine and its isolated session
//!
//! The pure core (generator, scorer, aggregator) is called from here; persistence is
//! left to the caller through `persisted()`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::countdown::{ChronoTypeMode, Countdown, Phase};
use crate::domain::{Answer, GameStats, HistoryEntry, Question};
use crate::keymap::{Action, Binding, InputContext, Shortcuts};
use crate::protocol::{to_out, Command, Reply};
use crate::question::generate_with;
use crate::scoring::multiplier_label;
use crate::session::{apply_answer, record};
use crate::store::Persisted;
use crate::summary::summarize;
use crate::util::percent_rounded;

pub struct GameState {
  pub stats: GameStats,
  pub history: Vec<HistoryEntry>,
  pub question: Question,
  pub dual_mode: bool,
  pub show_feedback: bool,
  pub shortcuts: Shortcuts,
  pub countdown: Countdown,
  awaiting_continue: bool,
  rng: StdRng,
}

impl GameState {
  /// Build from reloaded snapshots with an entropy-seeded RNG.
  pub fn new(persisted: Persisted, dual_mode: bool) -> Self {
    Self::with_rng(persisted, dual_mode, StdRng::from_entropy())
  }

  pub fn with_rng(persisted: Persisted, dual_mode: bool, mut rng: StdRng) -> Self {
    let question = generate_with(&mut rng, dual_mode);
    Self {
      stats: persisted.stats,
      history: Vec::new(),
      question,
      dual_mode,
      show_feedback: persisted.show_feedback,
      shortcuts: persisted.shortcuts,
      countdown: Countdown::default(),
      awaiting_continue: false,
      rng,
    }
  }

  /// Values the caller writes back to storage after every change.
  pub fn persisted(&self) -> Persisted {
    Persisted {
      stats: self.stats,
      show_feedback: self.show_feedback,
      shortcuts: self.shortcuts.clone(),
    }
  }

  pub fn awaiting_continue(&self) -> bool {
    self.awaiting_continue
  }

  fn input_context(&self) -> InputContext {
    InputContext {
      feedback_showing: self.awaiting_continue,
      dual_mode: self.question.defender2.is_some(),
    }
  }

  /// Dispatch one command. `Quit` is handled by the caller and ignored here.
  #[instrument(level = "debug", skip(self))]
  pub fn handle(&mut self, cmd: Command) -> Vec<Reply> {
    match cmd {
      Command::Key(symbol) => match self.shortcuts.resolve(&symbol, self.input_context()) {
        Some(Action::Answer(a)) => self.answer(a),
        Some(Action::Continue) => self.continue_(),
        Some(Action::Reset) => self.reset(),
        None => vec![Reply::Ignored { reason: format!("No action bound to '{}' right now", symbol.trim()) }],
      },
      Command::ToggleDual => self.toggle_dual_mode(),
      Command::ToggleFeedback => self.toggle_feedback(),
      Command::Stats => vec![self.stats_reply()],
      Command::History => vec![Reply::History { entries: self.history.clone() }],
      Command::Summary => vec![Reply::Summary { summary: summarize(&self.history) }],
      Command::OpenChrono => self.open_countdown(),
      Command::StartChrono(mode) => self.start_countdown(mode),
      Command::CancelChrono => self.cancel_countdown(),
      Command::CloseChrono => self.close_countdown(),
      Command::Bind { slot, symbol } => self.bind(slot, &symbol),
      Command::Shortcuts => vec![Reply::Shortcuts { shortcuts: self.shortcuts.clone() }],
      Command::Help => vec![Reply::Help { text: help_text(&self.shortcuts) }],
      Command::Quit => vec![],
    }
  }

  /// Submit an answer for the question on screen.
  pub fn answer(&mut self, user_answer: Answer) -> Vec<Reply> {
    if self.awaiting_continue {
      return vec![ignored("Waiting for continue")];
    }
    match self.countdown.phase() {
      Phase::Ready => return vec![ignored("Challenge is ready: start or close it first")],
      Phase::Expired => return vec![ignored("Time is up: restart or close the challenge")],
      Phase::Idle | Phase::Active => {}
    }

    let outcome = apply_answer(&self.stats, &self.question, user_answer);
    info!(
      target: "quiz",
      attacker = %self.question.attacker,
      defender1 = %self.question.defender1,
      defender2 = ?self.question.defender2,
      correct = outcome.is_correct,
      points = outcome.points,
      "Answer evaluated"
    );

    let in_challenge = self.countdown.is_active();
    if in_challenge {
      self.countdown.record(&outcome.entry);
    }
    record(&mut self.history, outcome.entry);
    self.stats = outcome.new_stats;

    self.awaiting_continue = self.show_feedback && !in_challenge;
    let mut replies = vec![Reply::AnswerResult {
      correct: outcome.is_correct,
      points: outcome.points,
      user_answer,
      correct_answer: self.question.correct_answer,
      multiplier: multiplier_label(self.question.correct_answer),
      streak: self.stats.streak,
      awaiting_continue: self.awaiting_continue,
    }];
    if !self.awaiting_continue {
      replies.push(self.next_question());
    }
    replies
  }

  /// Dismiss feedback and move on.
  pub fn continue_(&mut self) -> Vec<Reply> {
    self.awaiting_continue = false;
    vec![self.next_question()]
  }

  pub fn toggle_dual_mode(&mut self) -> Vec<Reply> {
    if self.countdown.is_active() {
      return vec![ignored("Modes are locked during a challenge")];
    }
    self.dual_mode = !self.dual_mode;
    self.awaiting_continue = false;
    vec![self.modes_reply(), self.next_question()]
  }

  pub fn toggle_feedback(&mut self) -> Vec<Reply> {
    if self.countdown.is_active() {
      return vec![ignored("Modes are locked during a challenge")];
    }
    self.show_feedback = !self.show_feedback;
    vec![self.modes_reply()]
  }

  /// Wipe progress. A fresh single-category question follows.
  pub fn reset(&mut self) -> Vec<Reply> {
    self.stats = GameStats::default();
    self.history.clear();
    self.awaiting_continue = false;
    self.question = generate_with(&mut self.rng, false);
    info!(target: "quiz", "Progress reset");
    vec![Reply::Reset, Reply::Question { question: to_out(&self.question) }]
  }

  pub fn open_countdown(&mut self) -> Vec<Reply> {
    if !self.countdown.open() {
      return vec![ignored("A challenge is already open")];
    }
    info!(target: "quiz", "Challenge opened");
    vec![self.countdown_reply()]
  }

  pub fn start_countdown(&mut self, mode: ChronoTypeMode) -> Vec<Reply> {
    if !self.countdown.start(mode) {
      return vec![ignored("Open the challenge first")];
    }
    info!(target: "quiz", ?mode, "Challenge started");
    self.awaiting_continue = false;
    vec![self.countdown_reply(), self.next_question()]
  }

  pub fn cancel_countdown(&mut self) -> Vec<Reply> {
    if !self.countdown.cancel() {
      return vec![ignored("No challenge is running")];
    }
    info!(target: "quiz", answered = self.countdown.stats().answered, "Challenge cancelled");
    vec![self.countdown_reply()]
  }

  pub fn close_countdown(&mut self) -> Vec<Reply> {
    if self.countdown.phase() == Phase::Idle {
      return vec![ignored("No challenge is open")];
    }
    self.countdown.close();
    info!(target: "quiz", "Challenge closed");
    vec![self.countdown_reply(), self.next_question()]
  }

  /// One-second timer tick. Replies only when the challenge just ran out.
  pub fn tick(&mut self) -> Option<Reply> {
    if !self.countdown.tick() {
      return None;
    }
    info!(
      target: "quiz",
      answered = self.countdown.stats().answered,
      correct = self.countdown.stats().correct,
      "Challenge time is up"
    );
    Some(self.countdown_reply())
  }

  pub fn bind(&mut self, slot: Binding, symbol: &str) -> Vec<Reply> {
    if !self.shortcuts.rebind(slot, symbol) {
      return vec![Reply::Error { message: format!("'{}' cannot be bound", symbol) }];
    }
    debug!(target: "quiz", ?slot, symbol, "Shortcut rebound");
    vec![Reply::Shortcuts { shortcuts: self.shortcuts.clone() }]
  }

  /// Draw the next question: challenge mode while it runs, otherwise the dual-mode flag.
  fn next_question(&mut self) -> Reply {
    let dual = if self.countdown.is_active() {
      self.countdown.mode().pick_dual(&mut self.rng)
    } else {
      self.dual_mode
    };
    self.question = generate_with(&mut self.rng, dual);
    debug!(target: "quiz", attacker = %self.question.attacker, dual, "Question served");
    Reply::Question { question: to_out(&self.question) }
  }

  fn stats_reply(&self) -> Reply {
    Reply::Stats {
      stats: self.stats,
      accuracy_percent: percent_rounded(self.stats.correct_answers, self.stats.total_questions),
    }
  }

  fn modes_reply(&self) -> Reply {
    Reply::Modes { dual_mode: self.dual_mode, show_feedback: self.show_feedback }
  }

  fn countdown_reply(&self) -> Reply {
    let stats = self.countdown.stats().clone();
    let phase = self.countdown.phase();
    let history = if phase == Phase::Expired { self.countdown.history().to_vec() } else { Vec::new() };
    Reply::Countdown {
      phase,
      mode: self.countdown.mode(),
      time_left: self.countdown.time_left(),
      accuracy_percent: stats.accuracy_percent(),
      stats,
      history,
    }
  }
}

fn ignored(reason: &str) -> Reply {
  Reply::Ignored { reason: reason.to_string() }
}

pub fn help_text(s: &Shortcuts) -> String {
  format!(
    "Answers: {} super effective, {} normal, {} not very effective, {} double weakness, {} double resist (dual only)\n\
     Keys: {} reset, {} continue\n\
     Commands: dual, feedback, stats, history, summary, shortcuts, chrono, start [single|dual|both], cancel, close, bind <action> <key>, help, quit",
    s.super_effective, s.normal, s.not_very_effective, s.double_weakness, s.double_resist, s.reset, s.continue_,
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::countdown::CHALLENGE_SECONDS;
  use crate::question::build;
  use crate::domain::Category::*;

  fn game(show_feedback: bool) -> GameState {
    let persisted = Persisted { stats: GameStats::default(), show_feedback, shortcuts: Shortcuts::default() };
    GameState::with_rng(persisted, false, StdRng::seed_from_u64(11))
  }

  fn key(g: &mut GameState, k: &str) -> Vec<Reply> {
    g.handle(Command::Key(k.into()))
  }

  #[test]
  fn correct_key_scores_and_advances() {
    let mut g = game(false);
    g.question = build(Fire, Grass, None);
    let replies = key(&mut g, "f");
    assert!(matches!(replies[0], Reply::AnswerResult { correct: true, points: 100, .. }));
    assert!(matches!(replies[1], Reply::Question { .. }));
    assert_eq!(g.stats.score, 100);
    assert_eq!(g.history.len(), 1);
    assert!(!g.awaiting_continue());
  }

  #[test]
  fn feedback_waits_for_continue() {
    let mut g = game(true);
    g.question = build(Fire, Water, None);
    let replies = key(&mut g, "f");
    assert_eq!(replies.len(), 1);
    assert!(matches!(replies[0], Reply::AnswerResult { correct: false, awaiting_continue: true, .. }));
    assert!(matches!(key(&mut g, "g")[0], Reply::Ignored { .. }));
    assert!(matches!(key(&mut g, "enter")[0], Reply::Question { .. }));
    assert!(!g.awaiting_continue());
    assert_eq!(g.history.len(), 1);
  }

  #[test]
  fn reset_clears_progress() {
    let mut g = game(false);
    g.question = build(Fire, Grass, None);
    key(&mut g, "f");
    let replies = key(&mut g, "r");
    assert_eq!(replies[0], Reply::Reset);
    assert_eq!(g.stats, GameStats::default());
    assert!(g.history.is_empty());
    assert!(g.question.defender2.is_none());
  }

  #[test]
  fn dual_toggle_changes_question_shape() {
    let mut g = game(false);
    g.handle(Command::ToggleDual);
    assert!(g.dual_mode);
    assert!(g.question.defender2.is_some());
    g.handle(Command::ToggleDual);
    assert!(g.question.defender2.is_none());
  }

  #[test]
  fn double_keys_only_for_dual_questions() {
    let mut g = game(false);
    g.question = build(Fire, Grass, None);
    assert!(matches!(key(&mut g, "d")[0], Reply::Ignored { .. }));
    g.question = build(Fire, Grass, Some(Ice));
    assert!(matches!(key(&mut g, "d")[0], Reply::AnswerResult { correct: true, .. }));
  }

  #[test]
  fn challenge_keeps_its_own_session() {
    let mut g = game(true);
    g.handle(Command::OpenChrono);
    g.handle(Command::StartChrono(ChronoTypeMode::Single));
    assert!(matches!(g.handle(Command::ToggleDual)[0], Reply::Ignored { .. }));

    g.question = build(Fire, Grass, None);
    let replies = key(&mut g, "f");
    // no feedback pause during a challenge
    assert!(matches!(replies[0], Reply::AnswerResult { awaiting_continue: false, .. }));
    assert_eq!(g.countdown.stats().answered, 1);
    assert_eq!(g.countdown.history().len(), 1);
    assert_eq!(g.history.len(), 1);

    for _ in 0..CHALLENGE_SECONDS - 1 {
      assert!(g.tick().is_none());
    }
    match g.tick() {
      Some(Reply::Countdown { phase: Phase::Expired, stats, history, .. }) => {
        assert_eq!(stats.answered, 1);
        assert_eq!(history.len(), 1);
        assert_eq!((history[0].attacker, history[0].defender1), (Fire, Grass));
        assert!(history[0].is_correct);
      }
      other => panic!("unexpected reply {other:?}"),
    }
    assert!(matches!(key(&mut g, "f")[0], Reply::Ignored { .. }));

    g.handle(Command::CloseChrono);
    assert_eq!(g.countdown.phase(), Phase::Idle);
    assert!(g.countdown.history().is_empty());
    assert_eq!(g.history.len(), 1, "main history survives the challenge");
    assert_eq!(g.stats.total_questions, 1);
  }

  #[test]
  fn cancel_shows_results_and_blocks_answers() {
    let mut g = game(false);
    g.handle(Command::OpenChrono);
    assert!(matches!(key(&mut g, "f")[0], Reply::Ignored { .. }), "ready screen blocks answers");
    g.handle(Command::StartChrono(ChronoTypeMode::Dual));
    assert!(g.question.defender2.is_some());
    g.question = build(Fire, Grass, Some(Water));
    key(&mut g, "d");
    let replies = g.handle(Command::CancelChrono);
    match &replies[0] {
      Reply::Countdown { phase: Phase::Expired, time_left: 0, stats, history, .. } => {
        assert_eq!(stats.wrong(), 1);
        assert_eq!(history[0].user_answer, Answer::DoubleWeakness);
        assert_eq!(history[0].correct_answer, Answer::Normal);
      }
      other => panic!("unexpected reply {other:?}"),
    }
    assert!(matches!(key(&mut g, "g")[0], Reply::Ignored { .. }));
  }

  #[test]
  fn countdown_history_only_on_results() {
    let mut g = game(false);
    g.handle(Command::OpenChrono);
    g.handle(Command::StartChrono(ChronoTypeMode::Single));
    g.question = build(Fire, Grass, None);
    key(&mut g, "f");
    // still running: no history attached
    let running = Reply::Countdown {
      phase: Phase::Active,
      mode: ChronoTypeMode::Single,
      time_left: CHALLENGE_SECONDS,
      stats: g.countdown.stats().clone(),
      accuracy_percent: 100,
      history: Vec::new(),
    };
    assert_eq!(g.countdown_reply(), running);
    let closed = g.handle(Command::CloseChrono);
    assert!(matches!(&closed[0], Reply::Countdown { phase: Phase::Idle, history, .. } if history.is_empty()));
  }

  #[test]
  fn rebinding_changes_resolution_and_persists() {
    let mut g = game(false);
    g.handle(Command::Bind { slot: Binding::Normal, symbol: "n".into() });
    assert_eq!(g.persisted().shortcuts.normal, "N");
    assert!(matches!(g.handle(Command::Bind { slot: Binding::Normal, symbol: "escape".into() })[0], Reply::Error { .. }));
    assert_eq!(g.shortcuts.normal, "N");
    assert!(matches!(g.handle(Command::Bind { slot: Binding::Normal, symbol: "dual".into() })[0], Reply::Error { .. }));
    assert_eq!(g.shortcuts.normal, "N");
  }

  #[test]
  fn summary_reflects_history() {
    let mut g = game(false);
    g.question = build(Fire, Water, None);
    key(&mut g, "f");
    match &g.handle(Command::Summary)[0] {
      Reply::Summary { summary } => {
        assert_eq!(summary.total, 1);
        assert_eq!(summary.top_mistakes.len(), 1);
      }
      other => panic!("unexpected reply {other:?}"),
    }
  }
}

//! Symbol-to-action table for keyboard input, with user rebinding.

use serde::{Deserialize, Serialize};

use crate::domain::Answer;
use crate::protocol::is_command_word;

/// Symbol that can never be bound (it closes the rebinding prompt).
pub const UNBINDABLE: &str = "ESCAPE";

/// Configurable bindings. Symbols are kept uppercase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcuts {
  pub super_effective: String,
  pub normal: String,
  pub not_very_effective: String,
  pub double_resist: String,
  pub double_weakness: String,
  pub reset: String,
  #[serde(rename = "continue")]
  pub continue_: String,
}

impl Default for Shortcuts {
  fn default() -> Self {
    Self {
      super_effective: "F".into(),
      normal: "G".into(),
      not_very_effective: "H".into(),
      double_resist: "J".into(),
      double_weakness: "D".into(),
      reset: "R".into(),
      continue_: "ENTER".into(),
    }
  }
}

/// Bindable slot, named the way the rebinding command spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
  SuperEffective,
  Normal,
  NotVeryEffective,
  DoubleResist,
  DoubleWeakness,
  Reset,
  Continue,
}

impl std::str::FromStr for Binding {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
      "super-effective" => Ok(Binding::SuperEffective),
      "normal" => Ok(Binding::Normal),
      "not-very-effective" => Ok(Binding::NotVeryEffective),
      "double-resist" => Ok(Binding::DoubleResist),
      "double-weakness" => Ok(Binding::DoubleWeakness),
      "reset" => Ok(Binding::Reset),
      "continue" => Ok(Binding::Continue),
      other => Err(format!("Unknown binding: {}", other)),
    }
  }
}

/// What a resolved symbol asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
  Answer(Answer),
  Reset,
  Continue,
}

/// Game situation that decides which bindings are live.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputContext {
  pub feedback_showing: bool,
  pub dual_mode: bool,
}

impl Shortcuts {
  /// Map a raw symbol to an action, if any binding is live for it.
  pub fn resolve(&self, symbol: &str, ctx: InputContext) -> Option<Action> {
    let key = normalize_symbol(symbol);

    if ctx.feedback_showing {
      return (key == self.continue_ || key == " ").then_some(Action::Continue);
    }

    if key == self.super_effective {
      Some(Action::Answer(Answer::SuperEffective))
    } else if key == self.normal {
      Some(Action::Answer(Answer::Normal))
    } else if key == self.not_very_effective {
      Some(Action::Answer(Answer::NotVeryEffective))
    } else if key == self.double_weakness && ctx.dual_mode {
      Some(Action::Answer(Answer::DoubleWeakness))
    } else if key == self.double_resist && ctx.dual_mode {
      Some(Action::Answer(Answer::DoubleResist))
    } else if key == self.reset {
      Some(Action::Reset)
    } else {
      None
    }
  }

  /// Bind `symbol` to `slot`. Returns false (and leaves the table alone) for ESCAPE
  /// and for words the command parser claims first.
  pub fn rebind(&mut self, slot: Binding, symbol: &str) -> bool {
    let key = normalize_symbol(symbol);
    if key == UNBINDABLE || key.trim().is_empty() || is_command_word(&key) {
      return false;
    }
    *self.slot_mut(slot) = key;
    true
  }

  pub fn get(&self, slot: Binding) -> &str {
    match slot {
      Binding::SuperEffective => &self.super_effective,
      Binding::Normal => &self.normal,
      Binding::NotVeryEffective => &self.not_very_effective,
      Binding::DoubleResist => &self.double_resist,
      Binding::DoubleWeakness => &self.double_weakness,
      Binding::Reset => &self.reset,
      Binding::Continue => &self.continue_,
    }
  }

  fn slot_mut(&mut self, slot: Binding) -> &mut String {
    match slot {
      Binding::SuperEffective => &mut self.super_effective,
      Binding::Normal => &mut self.normal,
      Binding::NotVeryEffective => &mut self.not_very_effective,
      Binding::DoubleResist => &mut self.double_resist,
      Binding::DoubleWeakness => &mut self.double_weakness,
      Binding::Reset => &mut self.reset,
      Binding::Continue => &mut self.continue_,
    }
  }
}

/// Uppercase a symbol; a lone space is kept as-is, an empty line reads as ENTER.
pub fn normalize_symbol(symbol: &str) -> String {
  if symbol == " " {
    return symbol.to_string();
  }
  let trimmed = symbol.trim();
  if trimmed.is_empty() { "ENTER".into() } else { trimmed.to_uppercase() }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn playing(dual_mode: bool) -> InputContext {
    InputContext { feedback_showing: false, dual_mode }
  }

  #[test]
  fn default_bindings_resolve_case_insensitively() {
    let s = Shortcuts::default();
    assert_eq!(s.resolve("f", playing(false)), Some(Action::Answer(Answer::SuperEffective)));
    assert_eq!(s.resolve("G", playing(false)), Some(Action::Answer(Answer::Normal)));
    assert_eq!(s.resolve("h", playing(false)), Some(Action::Answer(Answer::NotVeryEffective)));
    assert_eq!(s.resolve("r", playing(false)), Some(Action::Reset));
    assert_eq!(s.resolve("x", playing(false)), None);
  }

  #[test]
  fn double_answers_need_dual_mode() {
    let s = Shortcuts::default();
    assert_eq!(s.resolve("d", playing(false)), None);
    assert_eq!(s.resolve("j", playing(false)), None);
    assert_eq!(s.resolve("d", playing(true)), Some(Action::Answer(Answer::DoubleWeakness)));
    assert_eq!(s.resolve("j", playing(true)), Some(Action::Answer(Answer::DoubleResist)));
  }

  #[test]
  fn feedback_only_accepts_continue() {
    let s = Shortcuts::default();
    let ctx = InputContext { feedback_showing: true, dual_mode: true };
    assert_eq!(s.resolve("f", ctx), None);
    assert_eq!(s.resolve("d", ctx), None);
    assert_eq!(s.resolve("r", ctx), None);
    assert_eq!(s.resolve("enter", ctx), Some(Action::Continue));
    assert_eq!(s.resolve("", ctx), Some(Action::Continue));
    assert_eq!(s.resolve(" ", ctx), Some(Action::Continue));
  }

  #[test]
  fn rebind_uppercases_and_refuses_escape() {
    let mut s = Shortcuts::default();
    assert!(s.rebind(Binding::SuperEffective, "q"));
    assert_eq!(s.get(Binding::SuperEffective), "Q");
    assert_eq!(s.resolve("q", playing(false)), Some(Action::Answer(Answer::SuperEffective)));
    assert_eq!(s.resolve("f", playing(false)), None);

    assert!(!s.rebind(Binding::Reset, "Escape"));
    assert_eq!(s.get(Binding::Reset), "R");
  }

  #[test]
  fn rebind_refuses_command_words() {
    let mut s = Shortcuts::default();
    for word in ["dual", "Stats", "QUIT", "bind", "start"] {
      assert!(!s.rebind(Binding::Normal, word), "{word}");
    }
    assert_eq!(s.get(Binding::Normal), "G");
    assert!(s.rebind(Binding::Normal, "duo"));
    assert_eq!(s.get(Binding::Normal), "DUO");
  }

  #[test]
  fn binding_names_parse() {
    assert_eq!("not-very-effective".parse::<Binding>(), Ok(Binding::NotVeryEffective));
    assert_eq!("Double_Resist".parse::<Binding>(), Ok(Binding::DoubleResist));
    assert!("sideways".parse::<Binding>().is_err());
  }

  #[test]
  fn snapshot_uses_original_field_names() {
    let json = serde_json::to_value(Shortcuts::default()).expect("serialize");
    assert_eq!(json["superEffective"], "F");
    assert_eq!(json["continue"], "ENTER");
  }
}

//! Static effectiveness table (attacking category -> defending categories).
//!
//! There are no immunities: every pairing not listed is neutral.

use crate::domain::Category::{self, *};

/// What an attacking category is strong and weak against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Matchup {
  pub strong_against: &'static [Category],
  pub weak_against: &'static [Category],
}

impl Matchup {
  pub fn is_strong_against(&self, defender: Category) -> bool {
    self.strong_against.contains(&defender)
  }

  pub fn is_weak_against(&self, defender: Category) -> bool {
    self.weak_against.contains(&defender)
  }
}

macro_rules! matchup {
  ([$($s:ident),* $(,)?], [$($w:ident),* $(,)?]) => {
    Matchup { strong_against: &[$($s),*], weak_against: &[$($w),*] }
  };
}

/// Table entry for `attacker`. Total over all categories.
pub fn lookup(attacker: Category) -> Matchup {
  match attacker {
    Normal => matchup!([], [Rock, Steel]),
    Fire => matchup!([Grass, Ice, Bug, Steel], [Fire, Water, Rock, Dragon]),
    Water => matchup!([Fire, Ground, Rock], [Water, Grass, Dragon]),
    Electric => matchup!([Water, Flying], [Electric, Grass, Dragon, Ground]),
    Grass => matchup!([Water, Ground, Rock], [Fire, Grass, Poison, Flying, Bug, Dragon, Steel]),
    Ice => matchup!([Grass, Ground, Flying, Dragon], [Fire, Water, Ice, Steel]),
    Fighting => matchup!([Normal, Ice, Rock, Dark, Steel], [Poison, Flying, Psychic, Bug, Fairy, Ghost]),
    Poison => matchup!([Grass, Fairy], [Poison, Ground, Rock, Ghost, Steel]),
    Ground => matchup!([Fire, Electric, Poison, Rock, Steel], [Grass, Bug, Flying]),
    Flying => matchup!([Grass, Fighting, Bug], [Electric, Rock, Steel]),
    Psychic => matchup!([Fighting, Poison], [Psychic, Steel, Dark]),
    Bug => matchup!([Grass, Psychic, Dark], [Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy]),
    Rock => matchup!([Fire, Ice, Flying, Bug], [Fighting, Ground, Steel]),
    Ghost => matchup!([Psychic, Ghost], [Dark, Normal]),
    Dragon => matchup!([Dragon], [Steel, Fairy]),
    Dark => matchup!([Psychic, Ghost], [Fighting, Dark, Fairy]),
    Steel => matchup!([Ice, Rock, Fairy], [Fire, Water, Electric, Steel]),
    Fairy => matchup!([Fighting, Dragon, Dark], [Fire, Poison, Steel]),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_category_is_both_strong_and_weak() {
    for attacker in Category::ALL {
      let m = lookup(attacker);
      for d in m.strong_against {
        assert!(!m.weak_against.contains(d), "{attacker} lists {d} as both strong and weak");
      }
    }
  }

  #[test]
  fn lists_have_no_duplicates() {
    for attacker in Category::ALL {
      let m = lookup(attacker);
      for list in [m.strong_against, m.weak_against] {
        for (i, d) in list.iter().enumerate() {
          assert!(!list[i + 1..].contains(d), "{attacker} repeats {d}");
        }
      }
    }
  }

  #[test]
  fn fire_row_matches_known_entries() {
    let fire = lookup(Fire);
    for d in [Grass, Ice, Bug, Steel] {
      assert!(fire.is_strong_against(d));
    }
    for d in [Fire, Water, Rock, Dragon] {
      assert!(fire.is_weak_against(d));
    }
    assert!(!fire.is_strong_against(Normal) && !fire.is_weak_against(Normal));
  }
}

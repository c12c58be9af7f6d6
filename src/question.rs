//! Question generation and classification.
//!
//! Flow:
//! 1) Draw attacker and first defender uniformly (with replacement).
//! 2) In dual mode draw a second defender; on a collision with the first one the
//!    whole tuple is redrawn, not only the second defender.
//! 3) Classify the matchup against the effectiveness table.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::chart::lookup;
use crate::domain::{Answer, Category, Question};

/// Generate a question using the thread-local RNG.
pub fn generate(dual_mode: bool) -> Question {
  generate_with(&mut rand::thread_rng(), dual_mode)
}

/// Generate a question from the given RNG. Deterministic for a seeded RNG.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, dual_mode: bool) -> Question {
  loop {
    let attacker = random_category(rng);
    let defender1 = random_category(rng);
    if !dual_mode {
      return build(attacker, defender1, None);
    }
    let defender2 = random_category(rng);
    if defender2 != defender1 {
      return build(attacker, defender1, Some(defender2));
    }
  }
}

/// Assemble a question with its computed answer.
pub fn build(attacker: Category, defender1: Category, defender2: Option<Category>) -> Question {
  let correct_answer = match defender2 {
    Some(d2) => classify_dual(attacker, defender1, d2),
    None => classify_single(attacker, defender1),
  };
  Question { attacker, defender1, defender2, correct_answer }
}

pub fn classify_single(attacker: Category, defender: Category) -> Answer {
  let m = lookup(attacker);
  if m.is_strong_against(defender) {
    Answer::SuperEffective
  } else if m.is_weak_against(defender) {
    Answer::NotVeryEffective
  } else {
    Answer::Normal
  }
}

/// Combine both per-defender outcomes. Order of the checks matters.
pub fn classify_dual(attacker: Category, defender1: Category, defender2: Category) -> Answer {
  let m = lookup(attacker);
  let (strong1, strong2) = (m.is_strong_against(defender1), m.is_strong_against(defender2));
  let (weak1, weak2) = (m.is_weak_against(defender1), m.is_weak_against(defender2));

  if strong1 && strong2 {
    Answer::DoubleWeakness
  } else if weak1 && weak2 {
    Answer::DoubleResist
  } else if (strong1 && weak2) || (strong2 && weak1) {
    // effects cancel out
    Answer::Normal
  } else if strong1 || strong2 {
    Answer::SuperEffective
  } else if weak1 || weak2 {
    Answer::NotVeryEffective
  } else {
    Answer::Normal
  }
}

fn random_category<R: Rng + ?Sized>(rng: &mut R) -> Category {
  // ALL is a non-empty const array
  *Category::ALL.choose(rng).unwrap_or(&Category::Normal)
}

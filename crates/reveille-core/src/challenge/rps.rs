//! Single-round rock-paper-scissors.
//!
//! There is no stored target answer: success is the immediate result of
//! the round. Only a win dismisses the alarm; a draw counts as a loss for
//! dismissal purposes, so the user just plays again.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsChoice {
    Rock,
    Paper,
    Scissors,
}

impl RpsChoice {
    pub const ALL: [RpsChoice; 3] = [RpsChoice::Rock, RpsChoice::Paper, RpsChoice::Scissors];

    /// The choice this one defeats.
    pub fn beats(self) -> Self {
        match self {
            RpsChoice::Rock => RpsChoice::Scissors,
            RpsChoice::Paper => RpsChoice::Rock,
            RpsChoice::Scissors => RpsChoice::Paper,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RpsChoice::Rock => "Rock",
            RpsChoice::Paper => "Paper",
            RpsChoice::Scissors => "Scissors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsOutcome {
    Win,
    Draw,
    Lose,
}

/// Resolve one round.
pub fn resolve(you: RpsChoice, computer: RpsChoice) -> RpsOutcome {
    if you == computer {
        RpsOutcome::Draw
    } else if you.beats() == computer {
        RpsOutcome::Win
    } else {
        RpsOutcome::Lose
    }
}

/// Stateless round resolver used as the challenge payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct RpsRound;

impl RpsRound {
    pub fn new() -> Self {
        Self
    }

    /// Play against a uniformly random computer choice.
    pub fn play<R: Rng>(&self, you: RpsChoice, rng: &mut R) -> (RpsChoice, RpsOutcome) {
        let computer = RpsChoice::ALL[rng.gen_range(0..3)];
        (computer, resolve(you, computer))
    }
}

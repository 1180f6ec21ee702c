//! Wake Verification Method challenges.
//!
//! Each method carries its own generation and verification capability.
//! Dispatch is a closed enum selected from the alarm's stored
//! [`WakeMethod`]; nothing here matches on display names.

mod factor;
mod math;
mod rps;
mod shake;

pub use factor::FactorProblem;
pub use math::MathProblem;
pub use rps::{resolve, RpsChoice, RpsOutcome, RpsRound};
pub use shake::{ShakeDetector, SAMPLE_INTERVAL, SHAKE_THRESHOLD};

use rand::Rng;

use crate::alarm::WakeMethod;

/// A live challenge gating dismissal of a firing alarm.
#[derive(Debug)]
pub enum Challenge {
    Math(MathProblem),
    Factor(FactorProblem),
    RockPaperScissors(RpsRound),
    Shake(ShakeDetector),
}

impl Challenge {
    /// Display prompt for puzzle-based challenges; `None` for the
    /// interactive ones (RPS, shake).
    pub fn prompt(&self) -> Option<String> {
        match self {
            Challenge::Math(p) => Some(format!("Solve: {}", p.display())),
            Challenge::Factor(p) => Some(format!("Solve: {}", p.display())),
            Challenge::RockPaperScissors(_) | Challenge::Shake(_) => None,
        }
    }
}

/// Outcome of challenge selection: the challenge itself plus a one-time
/// notice when the requested method had to be substituted.
#[derive(Debug)]
pub struct Selection {
    pub challenge: Challenge,
    pub fallback_notice: Option<String>,
}

impl Selection {
    fn plain(challenge: Challenge) -> Self {
        Self { challenge, fallback_notice: None }
    }
}

/// Build the challenge for a wake method. When shake is requested but no
/// motion hardware is present, substitutes the factoring challenge and
/// surfaces a notice for the caller to show once.
pub fn select<R: Rng>(method: WakeMethod, motion_available: bool, rng: &mut R) -> Selection {
    match method {
        WakeMethod::MathEasy => Selection::plain(Challenge::Math(MathProblem::generate(1, rng))),
        WakeMethod::MathMedium => Selection::plain(Challenge::Math(MathProblem::generate(2, rng))),
        WakeMethod::MathHard => Selection::plain(Challenge::Math(MathProblem::generate(3, rng))),
        WakeMethod::Factor => Selection::plain(Challenge::Factor(FactorProblem::generate(rng))),
        WakeMethod::RockPaperScissors => {
            Selection::plain(Challenge::RockPaperScissors(RpsRound::new()))
        }
        WakeMethod::Shake if motion_available => {
            Selection::plain(Challenge::Shake(ShakeDetector::new()))
        }
        WakeMethod::Shake => {
            log::warn!("motion hardware unavailable, substituting the factoring challenge");
            Selection {
                challenge: Challenge::Factor(FactorProblem::generate(rng)),
                fallback_notice: Some(
                    "Accelerometer is not available on your device, so shaking it wouldn't work."
                        .to_string(),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn shake_falls_back_to_factor_without_motion() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        let selection = select(WakeMethod::Shake, false, &mut rng);
        assert!(matches!(selection.challenge, Challenge::Factor(_)));
        assert!(selection.fallback_notice.is_some());
    }

    #[test]
    fn shake_stays_shake_with_motion() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        let selection = select(WakeMethod::Shake, true, &mut rng);
        assert!(matches!(selection.challenge, Challenge::Shake(_)));
        assert!(selection.fallback_notice.is_none());
    }

    #[test]
    fn math_methods_map_to_their_difficulty() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        for (method, operands) in [
            (WakeMethod::MathEasy, 2),
            (WakeMethod::MathMedium, 3),
            (WakeMethod::MathHard, 4),
        ] {
            let selection = select(method, false, &mut rng);
            match selection.challenge {
                Challenge::Math(p) => assert_eq!(p.operand_count(), operands),
                other => panic!("expected math challenge, got {other:?}"),
            }
        }
    }

    #[test]
    fn puzzle_challenges_have_prompts() {
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        assert!(select(WakeMethod::Factor, false, &mut rng)
            .challenge
            .prompt()
            .unwrap()
            .starts_with("Solve: "));
        assert!(select(WakeMethod::RockPaperScissors, false, &mut rng)
            .challenge
            .prompt()
            .is_none());
    }
}

//! Monic-quadratic factoring problems.

use rand::Rng;

/// A quadratic with distinct integer roots. The answer is the root *set*:
/// verification accepts either root.
#[derive(Debug, Clone)]
pub struct FactorProblem {
    display: String,
    roots: [i64; 2],
}

impl FactorProblem {
    /// Generate a quadratic with two distinct roots in 1..=9.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let r1 = rng.gen_range(1..=9);
        let mut r2 = rng.gen_range(1..=9);
        while r2 == r1 {
            r2 = rng.gen_range(1..=9);
        }
        Self::from_roots(r1, r2)
    }

    /// Expanded form of `(x - r1)(x - r2) = 0`.
    pub fn from_roots(r1: i64, r2: i64) -> Self {
        let b = -(r1 + r2);
        let c = r1 * r2;

        let mut display = String::from("x^2");
        append_term(&mut display, b, "x");
        append_term(&mut display, c, "");
        display.push_str(" = 0");

        Self { display, roots: [r1, r2] }
    }

    /// Canonical human form, `^` for exponent, e.g. `x^2 - 5x + 6 = 0`.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn answers(&self) -> &[i64] {
        &self.roots
    }

    /// Either root is accepted.
    pub fn verify(&self, candidate: i64) -> bool {
        self.roots.contains(&candidate)
    }
}

fn append_term(display: &mut String, coefficient: i64, suffix: &str) {
    if coefficient == 0 {
        return;
    }
    let sign = if coefficient < 0 { "-" } else { "+" };
    let magnitude = coefficient.abs();
    if magnitude == 1 && !suffix.is_empty() {
        display.push_str(&format!(" {sign} {suffix}"));
    } else {
        display.push_str(&format!(" {sign} {magnitude}{suffix}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn roots_two_and_three() {
        let p = FactorProblem::from_roots(2, 3);
        assert_eq!(p.display(), "x^2 - 5x + 6 = 0");
        assert!(p.verify(2));
        assert!(p.verify(3));
        assert!(!p.verify(5));
    }

    #[test]
    fn unit_coefficient_drops_the_one() {
        // (x - 1)(x) would need a zero root; use roots 1 and 2:
        // x^2 - 3x + 2. Coefficient -1 case: roots summing to 1.
        let p = FactorProblem::from_roots(2, -1);
        assert_eq!(p.display(), "x^2 - x - 2 = 0");
        assert!(p.verify(-1));
    }

    #[test]
    fn generated_roots_satisfy_their_quadratic() {
        for seed in 0..50 {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            let p = FactorProblem::generate(&mut rng);
            let [r1, r2] = [p.answers()[0], p.answers()[1]];
            assert_ne!(r1, r2);
            assert!((1..=9).contains(&r1) && (1..=9).contains(&r2));
            // x^2 + bx + c with b = -(r1+r2), c = r1*r2 vanishes at both.
            for r in [r1, r2] {
                assert_eq!(r * r - (r1 + r2) * r + r1 * r2, 0);
            }
        }
    }
}

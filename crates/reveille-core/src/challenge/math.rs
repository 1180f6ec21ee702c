//! Arithmetic-expression problems for the Math 1-3 wake methods.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Pow,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Pow => "^",
        }
    }
}

/// A generated arithmetic expression with its integer answer.
/// Verification is exact integer equality.
#[derive(Debug, Clone)]
pub struct MathProblem {
    display: String,
    answer: i64,
    operand_count: usize,
}

impl MathProblem {
    /// Generate a problem whose operand count scales with `difficulty`
    /// (clamped to 1..=3): difficulty 1 is addition/subtraction of two
    /// operands, 2 adds multiplication and a third operand, 3 adds a
    /// small exponent. Exponents display as `^`.
    pub fn generate<R: Rng>(difficulty: u8, rng: &mut R) -> Self {
        let difficulty = difficulty.clamp(1, 3);
        let operand_count = difficulty as usize + 1;

        let mut values: Vec<i64> = vec![rng.gen_range(2..=12)];
        let mut ops: Vec<Op> = Vec::with_capacity(operand_count - 1);
        for _ in 1..operand_count {
            let op = match difficulty {
                1 => [Op::Add, Op::Sub][rng.gen_range(0..2)],
                2 => [Op::Add, Op::Sub, Op::Mul][rng.gen_range(0..3)],
                _ => [Op::Add, Op::Sub, Op::Mul, Op::Pow][rng.gen_range(0..4)],
            };
            // Exponents stay small so answers remain head-computable.
            let operand = if op == Op::Pow {
                *values.last_mut().unwrap() = rng.gen_range(2..=5);
                rng.gen_range(2..=3)
            } else {
                rng.gen_range(2..=12)
            };
            ops.push(op);
            values.push(operand);
        }

        let display = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i == 0 {
                    v.to_string()
                } else {
                    format!(" {} {}", ops[i - 1].symbol(), v)
                }
            })
            .collect();
        let answer = eval(&values, &ops);

        Self { display, answer, operand_count }
    }

    /// The literal display string, `^` for exponent.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn answer(&self) -> i64 {
        self.answer
    }

    pub fn operand_count(&self) -> usize {
        self.operand_count
    }

    pub fn verify(&self, candidate: i64) -> bool {
        candidate == self.answer
    }
}

/// Evaluate with standard precedence: `^` binds tightest, then `*`,
/// then left-to-right `+`/`-`.
fn eval(values: &[i64], ops: &[Op]) -> i64 {
    let mut values = values.to_vec();
    let mut ops = ops.to_vec();

    for target in [Op::Pow, Op::Mul] {
        let mut i = 0;
        while i < ops.len() {
            if ops[i] == target {
                values[i] = match target {
                    Op::Pow => values[i].saturating_pow(values[i + 1] as u32),
                    _ => values[i] * values[i + 1],
                };
                values.remove(i + 1);
                ops.remove(i);
            } else {
                i += 1;
            }
        }
    }

    let mut acc = values[0];
    for (i, op) in ops.iter().enumerate() {
        match op {
            Op::Add => acc += values[i + 1],
            Op::Sub => acc -= values[i + 1],
            _ => unreachable!("folded in the precedence pass"),
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn eval_respects_precedence() {
        // 2 + 3 * 4 = 14
        assert_eq!(eval(&[2, 3, 4], &[Op::Add, Op::Mul]), 14);
        // 2 ^ 3 * 2 = 16
        assert_eq!(eval(&[2, 3, 2], &[Op::Pow, Op::Mul]), 16);
        // 10 - 2 - 3 = 5 (left to right)
        assert_eq!(eval(&[10, 2, 3], &[Op::Sub, Op::Sub]), 5);
        // 3 * 4 - 2 ^ 2 = 8
        assert_eq!(eval(&[3, 4, 2, 2], &[Op::Mul, Op::Sub, Op::Pow]), 8);
    }

    #[test]
    fn operand_count_scales_with_difficulty() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        for difficulty in 1..=3u8 {
            let p = MathProblem::generate(difficulty, &mut rng);
            assert_eq!(p.operand_count(), difficulty as usize + 1);
            // display tokens: operands interleaved with operators
            assert_eq!(p.display().split(' ').count(), 2 * p.operand_count() - 1);
        }
    }

    #[test]
    fn difficulty_is_clamped() {
        let mut rng = Mcg128Xsl64::seed_from_u64(2);
        assert_eq!(MathProblem::generate(0, &mut rng).operand_count(), 2);
        assert_eq!(MathProblem::generate(9, &mut rng).operand_count(), 4);
    }

    #[test]
    fn verification_is_exact_equality() {
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        let p = MathProblem::generate(2, &mut rng);
        assert!(p.verify(p.answer()));
        assert!(!p.verify(p.answer() + 1));
    }

    #[test]
    fn generated_display_matches_answer() {
        // Re-evaluate the display string for a spread of seeds.
        for seed in 0..50 {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            let p = MathProblem::generate(3, &mut rng);
            let tokens: Vec<&str> = p.display().split(' ').collect();
            let values: Vec<i64> = tokens.iter().step_by(2).map(|t| t.parse().unwrap()).collect();
            let ops: Vec<Op> = tokens
                .iter()
                .skip(1)
                .step_by(2)
                .map(|t| match *t {
                    "+" => Op::Add,
                    "-" => Op::Sub,
                    "*" => Op::Mul,
                    "^" => Op::Pow,
                    other => panic!("unexpected operator {other}"),
                })
                .collect();
            assert_eq!(eval(&values, &ops), p.answer(), "seed {seed}: {}", p.display());
        }
    }
}

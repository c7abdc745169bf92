//! Question generation
//!
//! Pure functions of settings + RNG. Every problem is generated so that the
//! running total never dips below zero at any prefix, which is what lets the
//! answer (and everything shown on screen) stay an unsigned integer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::{DigitSize, OperationMode, Settings};

/// Operator between two adjacent operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
        }
    }

    /// Apply to a running total. Caller guarantees `Sub` never underflows.
    pub fn apply(&self, running: u32, operand: u32) -> u32 {
        match self {
            Operator::Add => running + operand,
            Operator::Sub => running - operand,
        }
    }
}

/// One complete arithmetic expression plus its precomputed answer.
/// Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// N operands, shown left to right
    pub operands: Vec<u32>,
    /// N-1 operators; `operators[i]` sits between `operands[i]` and
    /// `operands[i + 1]`
    pub operators: Vec<Operator>,
    /// Final value of the expression
    pub answer: u32,
}

impl Problem {
    /// Number of operands; always >= 2 for a generated problem
    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    /// Render the expression, e.g. `7 + 12 - 4`
    pub fn expression(&self) -> String {
        let mut out = self.operands[0].to_string();
        for (op, operand) in self.operators.iter().zip(&self.operands[1..]) {
            out.push(' ');
            out.push(op.symbol());
            out.push(' ');
            out.push_str(&operand.to_string());
        }
        out
    }
}

/// Draw one operand: uniform pick among the enabled digit-size buckets,
/// then uniform within the bucket's range. An empty bucket set silently
/// substitutes 1-digit.
pub fn generate_number<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> u32 {
    let sizes = settings.enabled_digit_sizes();
    let size = if sizes.is_empty() {
        DigitSize::One
    } else {
        sizes[rng.random_range(0..sizes.len())]
    };
    let (lo, hi) = size.range();
    rng.random_range(lo..=hi)
}

/// Build one problem with a non-negative running total at every prefix.
///
/// Subtraction is only eligible when the running total strictly exceeds the
/// candidate (50/50 against addition); otherwise the step is forced to
/// addition. If a subtraction would still underflow, the candidate is
/// redrawn from `[1, running - 1]`, or the operator downgraded to addition
/// when the running total is too small to subtract anything from.
pub fn generate_problem<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Problem {
    let count = settings.operands_per_problem.max(2) as usize;

    let mut running = generate_number(settings, rng);
    let mut operands = Vec::with_capacity(count);
    let mut operators = Vec::with_capacity(count - 1);
    operands.push(running);

    for _ in 1..count {
        let mut candidate = generate_number(settings, rng);

        let mut op = match settings.operation_mode {
            OperationMode::AdditionOnly => Operator::Add,
            OperationMode::AdditionAndSubtraction => {
                if running > candidate && rng.random_bool(0.5) {
                    Operator::Sub
                } else {
                    Operator::Add
                }
            }
        };

        // Underflow guard: redraw below the running total, or fall back to
        // addition when there is nothing left to subtract from
        if op == Operator::Sub && candidate > running {
            if running > 1 {
                candidate = rng.random_range(1..=running - 1);
            } else {
                op = Operator::Add;
            }
        }

        running = op.apply(running, candidate);
        operators.push(op);
        operands.push(candidate);
    }

    Problem {
        operands,
        operators,
        answer: running,
    }
}

/// Generate the full batch for one drill: `problem_count` independent
/// problems, each starting its running total fresh.
pub fn generate_batch<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Vec<Problem> {
    (0..settings.problem_count)
        .map(|_| generate_problem(settings, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn settings(
        sizes: (bool, bool, bool),
        mode: OperationMode,
        problems: u32,
        operands: u32,
    ) -> Settings {
        Settings {
            one_digit: sizes.0,
            two_digit: sizes.1,
            three_digit: sizes.2,
            operation_mode: mode,
            problem_count: problems,
            operands_per_problem: operands,
            ..Default::default()
        }
    }

    /// Walk the expression left to right, asserting every prefix stays >= 0
    /// (i.e. no subtraction underflows), and return the final value.
    fn evaluate_prefixes(problem: &Problem) -> u32 {
        let mut running = problem.operands[0];
        for (op, &operand) in problem.operators.iter().zip(&problem.operands[1..]) {
            if *op == Operator::Sub {
                assert!(
                    running >= operand,
                    "prefix went negative: {} - {} in {}",
                    running,
                    operand,
                    problem.expression()
                );
            }
            running = op.apply(running, operand);
        }
        running
    }

    #[test]
    fn test_single_digit_addition_only() {
        // Concrete scenario: 1 problem, 3 one-digit operands, addition only
        let settings = settings((true, false, false), OperationMode::AdditionOnly, 1, 3);
        let mut rng = Pcg32::seed_from_u64(42);

        let batch = generate_batch(&settings, &mut rng);
        assert_eq!(batch.len(), 1);

        let problem = &batch[0];
        assert_eq!(problem.operands.len(), 3);
        assert_eq!(problem.operators.len(), 2);
        assert!(problem.operands.iter().all(|&n| (1..=9).contains(&n)));
        assert!(problem.operators.iter().all(|&op| op == Operator::Add));
        assert_eq!(
            problem.answer,
            problem.operands[0] + problem.operands[1] + problem.operands[2]
        );
    }

    #[test]
    fn test_empty_digit_sizes_default_to_one_digit() {
        let settings = settings((false, false, false), OperationMode::AdditionOnly, 5, 4);
        let mut rng = Pcg32::seed_from_u64(7);

        for problem in generate_batch(&settings, &mut rng) {
            assert!(problem.operands.iter().all(|&n| (1..=9).contains(&n)));
        }
    }

    #[test]
    fn test_subtraction_never_underflows() {
        let settings = settings(
            (true, true, true),
            OperationMode::AdditionAndSubtraction,
            50,
            20,
        );
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            for problem in generate_batch(&settings, &mut rng) {
                assert_eq!(evaluate_prefixes(&problem), problem.answer);
            }
        }
    }

    #[test]
    fn test_batch_shape() {
        let settings = settings((false, true, false), OperationMode::AdditionOnly, 17, 6);
        let mut rng = Pcg32::seed_from_u64(3);

        let batch = generate_batch(&settings, &mut rng);
        assert_eq!(batch.len(), 17);
        for problem in &batch {
            assert_eq!(problem.operands.len(), 6);
            assert_eq!(problem.operators.len(), 5);
        }
    }

    #[test]
    fn test_expression_formatting() {
        let problem = Problem {
            operands: vec![15, 20, 3],
            operators: vec![Operator::Add, Operator::Sub],
            answer: 32,
        };
        assert_eq!(problem.expression(), "15 + 20 - 3");
    }

    proptest! {
        #[test]
        fn prop_prefixes_non_negative(
            seed in any::<u64>(),
            one in any::<bool>(),
            two in any::<bool>(),
            three in any::<bool>(),
            operands in 2u32..=20,
        ) {
            let settings = settings(
                (one, two, three),
                OperationMode::AdditionAndSubtraction,
                3,
                operands,
            );
            let mut rng = Pcg32::seed_from_u64(seed);
            for problem in generate_batch(&settings, &mut rng) {
                prop_assert_eq!(evaluate_prefixes(&problem), problem.answer);
            }
        }

        #[test]
        fn prop_operands_match_enabled_sizes(
            seed in any::<u64>(),
            one in any::<bool>(),
            two in any::<bool>(),
            three in any::<bool>(),
        ) {
            let settings = settings(
                (one, two, three),
                OperationMode::AdditionAndSubtraction,
                5,
                8,
            );
            let mut enabled = settings.enabled_digit_sizes();
            if enabled.is_empty() {
                enabled.push(DigitSize::One);
            }

            let mut rng = Pcg32::seed_from_u64(seed);
            for problem in generate_batch(&settings, &mut rng) {
                // First operand and any added operand came straight from a
                // bucket; redrawn subtraction candidates may fall below it
                let mut running = problem.operands[0];
                prop_assert!(enabled.iter().any(|s| s.contains(running)));
                for (op, &operand) in problem.operators.iter().zip(&problem.operands[1..]) {
                    if *op == Operator::Add {
                        prop_assert!(
                            enabled.iter().any(|s| s.contains(operand)),
                            "operand {} outside enabled buckets", operand
                        );
                    } else {
                        prop_assert!(operand >= 1 && operand <= running);
                    }
                    running = op.apply(running, operand);
                }
            }
        }

        #[test]
        fn prop_addition_only_has_no_subtraction(seed in any::<u64>()) {
            let settings = settings((true, true, false), OperationMode::AdditionOnly, 10, 5);
            let mut rng = Pcg32::seed_from_u64(seed);
            for problem in generate_batch(&settings, &mut rng) {
                prop_assert!(problem.operators.iter().all(|&op| op == Operator::Add));
            }
        }

        #[test]
        fn prop_same_seed_same_batch(seed in any::<u64>()) {
            let settings = settings(
                (true, true, true),
                OperationMode::AdditionAndSubtraction,
                5,
                6,
            );
            let mut a = Pcg32::seed_from_u64(seed);
            let mut b = Pcg32::seed_from_u64(seed);
            prop_assert_eq!(generate_batch(&settings, &mut a), generate_batch(&settings, &mut b));
        }
    }
}

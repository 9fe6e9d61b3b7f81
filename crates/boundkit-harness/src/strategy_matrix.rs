//! Bit-ceiling strategy equivalence matrix.
//!
//! Executes every compiled strategy against a swept input corpus and emits
//! a machine-readable matrix with per-strategy aggregation. Expected values
//! come from an independent reference model (repeated doubling), so the
//! production paths are held to a shared truth rather than to each other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use boundkit_core::bits;

/// One execution row: a single strategy applied to a single input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyCaseRow {
    pub strategy: String,
    pub input: usize,
    pub expected: usize,
    pub actual: usize,
    pub passed: bool,
}

/// Strategy-level aggregate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMatrixRow {
    pub strategy: String,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub pass_rate_percent: f64,
}

/// Matrix summary counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMatrixSummary {
    pub total_cases: u64,
    pub passed: u64,
    pub failed: u64,
    pub pass_rate_percent: f64,
}

/// Top-level matrix report payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMatrixReport {
    pub schema_version: String,
    /// Strategy `bit_ceil` dispatches to in this build.
    pub selected_strategy: String,
    pub corpus_size: usize,
    pub summary: StrategyMatrixSummary,
    pub strategy_matrix: Vec<StrategyMatrixRow>,
    pub cases: Vec<StrategyCaseRow>,
}

impl StrategyMatrixReport {
    /// Returns true when no case diverged from the reference model.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }
}

/// Canonical input corpus: 0, 1, every power of two with its neighbors,
/// the overflow boundary, and the maximum representable value.
#[must_use]
pub fn sweep_corpus() -> Vec<usize> {
    let mut corpus = vec![0usize, 1, usize::MAX - 1, usize::MAX];
    for bit in 0..usize::BITS {
        let p = 1usize << bit;
        corpus.push(p);
        corpus.push(p.wrapping_sub(1));
        corpus.push(p.saturating_add(1));
    }
    corpus.push(bits::MAX_POWER + 1);
    corpus.sort_unstable();
    corpus.dedup();
    corpus
}

/// Reference model: repeated doubling, independent of the production paths.
#[must_use]
pub fn model_bit_ceil(n: usize) -> usize {
    if n > bits::MAX_POWER {
        return 0;
    }
    let mut p = 1usize;
    while p < n {
        p <<= 1;
    }
    p
}

/// Builds a deterministic equivalence matrix over every compiled strategy.
#[must_use]
pub fn build_strategy_matrix() -> StrategyMatrixReport {
    let corpus = sweep_corpus();

    let mut rows = Vec::with_capacity(bits::STRATEGIES.len() * corpus.len());
    for &(name, f) in bits::STRATEGIES {
        for &input in &corpus {
            let expected = model_bit_ceil(input);
            let actual = f(input);
            rows.push(StrategyCaseRow {
                strategy: name.to_string(),
                input,
                expected,
                actual,
                passed: actual == expected,
            });
        }
    }

    rows.sort_by(|a, b| a.strategy.cmp(&b.strategy).then_with(|| a.input.cmp(&b.input)));

    let total_cases = u64::try_from(rows.len()).unwrap_or(u64::MAX);
    let passed = u64::try_from(rows.iter().filter(|row| row.passed).count()).unwrap_or(0);
    let failed = total_cases.saturating_sub(passed);

    let mut buckets: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for row in &rows {
        let bucket = buckets.entry(row.strategy.clone()).or_insert((0, 0));
        bucket.0 = bucket.0.saturating_add(1);
        if row.passed {
            bucket.1 = bucket.1.saturating_add(1);
        }
    }

    let strategy_matrix = buckets
        .into_iter()
        .map(|(strategy, (total, passed))| StrategyMatrixRow {
            strategy,
            total,
            passed,
            failed: total.saturating_sub(passed),
            pass_rate_percent: ratio_percent(passed, total),
        })
        .collect();

    StrategyMatrixReport {
        schema_version: "v1".to_string(),
        selected_strategy: bits::selected_name().to_string(),
        corpus_size: corpus.len(),
        summary: StrategyMatrixSummary {
            total_cases,
            passed,
            failed,
            pass_rate_percent: ratio_percent(passed, total_cases),
        },
        strategy_matrix,
        cases: rows,
    }
}

fn ratio_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_corpus_covers_required_inputs() {
        let corpus = sweep_corpus();
        for required in [0usize, 1, 2, 1024, bits::MAX_POWER, bits::MAX_POWER + 1, usize::MAX] {
            assert!(corpus.contains(&required), "corpus misses {required}");
        }
        // Sorted and deduplicated.
        assert!(corpus.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn model_matches_known_ceilings() {
        assert_eq!(model_bit_ceil(0), 1);
        assert_eq!(model_bit_ceil(1), 1);
        assert_eq!(model_bit_ceil(5), 8);
        assert_eq!(model_bit_ceil(1024), 1024);
        assert_eq!(model_bit_ceil(bits::MAX_POWER), bits::MAX_POWER);
        assert_eq!(model_bit_ceil(bits::MAX_POWER + 1), 0);
        assert_eq!(model_bit_ceil(usize::MAX), 0);
    }

    #[test]
    fn matrix_reports_all_strategies_passing() {
        let report = build_strategy_matrix();
        assert!(report.all_passed(), "diverging cases: {:?}", report
            .cases
            .iter()
            .filter(|c| !c.passed)
            .collect::<Vec<_>>());
        assert_eq!(report.strategy_matrix.len(), bits::STRATEGIES.len());
        assert_eq!(
            report.summary.total_cases,
            (bits::STRATEGIES.len() * report.corpus_size) as u64
        );
    }

    #[test]
    fn matrix_is_deterministic() {
        let a = serde_json::to_string(&build_strategy_matrix()).unwrap();
        let b = serde_json::to_string(&build_strategy_matrix()).unwrap();
        assert_eq!(a, b);
    }
}

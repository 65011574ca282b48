// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Running accuracy over a batch of samples.
//!
//! Failed samples (tool failure, bad label, empty output) count towards the
//! total but never as correct, so a batch where half the samples fail
//! cannot score above 50%.

/// Mutable running counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccuracyCounter {
    total: usize,
    correct: usize,
    failed: usize,
}

/// Final accuracy for a batch.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccuracyReport {
    /// Samples attempted, including failed ones.
    pub total: usize,
    pub correct: usize,
    pub failed: usize,
    /// `correct / total`, or 0.0 when `total` is zero.
    pub accuracy: f64,
}

impl AccuracyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scored sample.
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Records a sample that could not be scored.
    pub fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn report(&self) -> AccuracyReport {
        let accuracy = if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        };
        AccuracyReport {
            total: self.total,
            correct: self.correct,
            failed: self.failed,
            accuracy,
        }
    }
}

impl AccuracyReport {
    /// Accuracy in percent.
    pub fn accuracy_pct(&self) -> f64 {
        self.accuracy * 100.0
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "Accuracy: {}/{} = {:.2}%",
            self.correct,
            self.total,
            self.accuracy_pct()
        );
        if self.failed > 0 {
            s.push_str(&format!(" ({} failed)", self.failed));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_counter() {
        let r = AccuracyCounter::new().report();
        assert_eq!(r.total, 0);
        assert_eq!(r.accuracy, 0.0);
        assert_eq!(r.summary(), "Accuracy: 0/0 = 0.00%");
    }

    #[test]
    fn test_record_and_report() {
        let mut c = AccuracyCounter::new();
        c.record(true);
        c.record(true);
        c.record(false);
        c.record_failure();

        let r = c.report();
        assert_eq!((r.total, r.correct, r.failed), (4, 2, 1));
        assert!((r.accuracy - 0.5).abs() < 1e-12);
        assert_eq!(r.summary(), "Accuracy: 2/4 = 50.00% (1 failed)");
    }

    #[test]
    fn test_report_serializes() {
        let mut c = AccuracyCounter::new();
        c.record(true);
        let json = serde_json::to_value(c.report()).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["accuracy"], 1.0);
    }
}

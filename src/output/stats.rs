//! Statistics for a finished batch

use crate::crawler::JobResult;
use std::collections::BTreeMap;

/// Batch statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStatistics {
    /// Number of URLs in the batch
    pub total: usize,

    /// URLs whose title was extracted
    pub succeeded: usize,

    /// URLs that failed for any reason
    pub failed: usize,

    /// Failure counts keyed by error kind
    pub errors_by_kind: BTreeMap<&'static str, usize>,
}

impl BatchStatistics {
    /// Tallies a set of results
    pub fn from_results(results: &[JobResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.error() {
                None => stats.succeeded += 1,
                Some(error) => {
                    stats.failed += 1;
                    *stats.errors_by_kind.entry(error.kind()).or_default() += 1;
                }
            }
        }

        stats
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.total as f64) * 100.0
    }
}

/// Logs the statistics at info level
///
/// Goes through `tracing` (stderr) so it never mixes with a report written
/// to stdout.
pub fn log_statistics(stats: &BatchStatistics) {
    tracing::info!(
        "Success Rate: {:.1}% ({} / {} URLs returned a title)",
        stats.success_rate(),
        stats.succeeded,
        stats.total
    );

    // Sort kinds by count (descending)
    let mut error_counts: Vec<_> = stats.errors_by_kind.iter().collect();
    error_counts.sort_by(|a, b| b.1.cmp(a.1));

    for (kind, count) in error_counts {
        tracing::info!("  {}: {}", kind, count);
    }
}

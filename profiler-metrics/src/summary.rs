use crate::series::ResultSeries;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("cannot summarize a run with no requests")]
    EmptySeries,
}

/// Aggregate statistics of one profiling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileReport {
    pub requests: usize,
    pub fastest_ms: u64,
    pub slowest_ms: u64,
    pub mean_ms: u64,
    pub median_ms: u64,
    pub success_percent: u64,
    /// Non-200 status codes in the order they were received
    pub error_codes: Vec<u16>,
    pub smallest_body_bytes: usize,
    pub largest_body_bytes: usize,
}

impl ProfileReport {
    pub fn from_series(series: &ResultSeries) -> Result<ProfileReport, ReportError> {
        let requests = series.len();
        if requests == 0 {
            return Err(ReportError::EmptySeries);
        }

        let mut latencies = series.latencies().to_vec();
        latencies.sort_unstable();
        let mut lengths = series.body_lengths().to_vec();
        lengths.sort_unstable();

        let error_codes: Vec<u16> = series
            .status_codes()
            .iter()
            .copied()
            .filter(|&code| code != 200)
            .collect();

        // u128 so that a long run of slow requests can't overflow the sum
        let total: u128 = latencies.iter().map(|&l| u128::from(l)).sum();
        let mean_ms = (total / requests as u128) as u64;
        let successes = (requests - error_codes.len()) as u64;
        let success_percent = successes * 100 / requests as u64;

        Ok(ProfileReport {
            requests,
            fastest_ms: latencies[0],
            slowest_ms: latencies[requests - 1],
            mean_ms,
            // upper middle element for even counts, never averaged
            median_ms: latencies[requests / 2],
            success_percent,
            error_codes,
            smallest_body_bytes: lengths[0],
            largest_body_bytes: lengths[requests - 1],
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn latencies_only(latencies: &[u64]) -> ResultSeries {
        latencies.iter().map(|&l| (l, 100, 200)).collect()
    }

    #[test]
    fn median_odd_count() {
        let report = ProfileReport::from_series(&latencies_only(&[50, 10, 40, 20, 30])).unwrap();
        assert_eq!(report.median_ms, 30);
    }

    #[test]
    fn median_even_count_takes_upper_middle() {
        let report = ProfileReport::from_series(&latencies_only(&[40, 30, 20, 10])).unwrap();
        assert_eq!(report.median_ms, 30);
    }

    #[test]
    fn extremes_and_truncated_mean() {
        let report = ProfileReport::from_series(&latencies_only(&[7, 3, 4])).unwrap();
        assert_eq!(report.fastest_ms, 3);
        assert_eq!(report.slowest_ms, 7);
        assert_eq!(report.mean_ms, 4);
        assert!(report.fastest_ms <= report.mean_ms && report.mean_ms <= report.slowest_ms);
        assert!(report.fastest_ms <= report.median_ms && report.median_ms <= report.slowest_ms);
    }

    #[test]
    fn success_percent_truncates() {
        let series: ResultSeries = vec![(1, 10, 200), (1, 10, 503), (1, 10, 200)]
            .into_iter()
            .collect();
        let report = ProfileReport::from_series(&series).unwrap();
        assert_eq!(report.success_percent, 66);
    }

    #[test]
    fn error_codes_keep_request_order() {
        let series: ResultSeries = vec![(1, 10, 200), (1, 10, 404), (1, 10, 200), (1, 10, 500)]
            .into_iter()
            .collect();
        let report = ProfileReport::from_series(&series).unwrap();
        assert_eq!(report.error_codes, vec![404, 500]);
        assert_eq!(report.success_percent, 50);
    }

    #[test]
    fn all_failures() {
        let series: ResultSeries = vec![(5, 10, 301), (6, 10, 301)].into_iter().collect();
        let report = ProfileReport::from_series(&series).unwrap();
        assert_eq!(report.success_percent, 0);
        assert_eq!(report.error_codes, vec![301, 301]);
    }

    #[test]
    fn body_sizes_sorted_independently_of_latency() {
        let series: ResultSeries = vec![(10, 900, 200), (30, 120, 200), (20, 4_096, 200)]
            .into_iter()
            .collect();
        let report = ProfileReport::from_series(&series).unwrap();
        assert_eq!(report.smallest_body_bytes, 120);
        assert_eq!(report.largest_body_bytes, 4_096);
        assert_eq!(report.fastest_ms, 10);
        assert_eq!(report.requests, 3);
    }

    #[test]
    fn single_request() {
        let report = ProfileReport::from_series(&latencies_only(&[42])).unwrap();
        assert_eq!(report.fastest_ms, 42);
        assert_eq!(report.slowest_ms, 42);
        assert_eq!(report.mean_ms, 42);
        assert_eq!(report.median_ms, 42);
        assert_eq!(report.success_percent, 100);
        assert!(report.error_codes.is_empty());
    }

    #[test]
    fn empty_series_is_rejected() {
        assert_eq!(
            ProfileReport::from_series(&ResultSeries::new()),
            Err(ReportError::EmptySeries)
        );
    }
}

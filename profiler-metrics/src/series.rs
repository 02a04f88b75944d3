/// Per-request measurements of one profiling run, index-aligned by request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSeries {
    latencies: Vec<u64>,
    body_lengths: Vec<usize>,
    status_codes: Vec<u16>,
}

impl ResultSeries {
    pub fn new() -> ResultSeries {
        ResultSeries::default()
    }

    pub fn with_capacity(capacity: usize) -> ResultSeries {
        ResultSeries {
            latencies: Vec::with_capacity(capacity),
            body_lengths: Vec::with_capacity(capacity),
            status_codes: Vec::with_capacity(capacity),
        }
    }

    /// Append the measurements of one request.
    pub fn record(&mut self, latency_ms: u64, body_len: usize, status: u16) {
        self.latencies.push(latency_ms);
        self.body_lengths.push(body_len);
        self.status_codes.push(status);
    }

    pub fn len(&self) -> usize {
        self.latencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latencies.is_empty()
    }

    pub fn latencies(&self) -> &[u64] {
        &self.latencies
    }

    pub fn body_lengths(&self) -> &[usize] {
        &self.body_lengths
    }

    pub fn status_codes(&self) -> &[u16] {
        &self.status_codes
    }
}

impl FromIterator<(u64, usize, u16)> for ResultSeries {
    fn from_iter<I: IntoIterator<Item = (u64, usize, u16)>>(it: I) -> ResultSeries {
        let mut series = ResultSeries::new();
        for (latency, len, status) in it {
            series.record(latency, len, status);
        }
        series
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_keeps_request_order() {
        let mut s = ResultSeries::with_capacity(3);
        s.record(30, 100, 200);
        s.record(10, 300, 404);
        s.record(20, 200, 200);
        assert_eq!(s.len(), 3);
        assert_eq!(s.latencies(), &[30, 10, 20]);
        assert_eq!(s.body_lengths(), &[100, 300, 200]);
        assert_eq!(s.status_codes(), &[200, 404, 200]);
    }

    #[test]
    fn new_series_is_empty() {
        let s = ResultSeries::new();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }
}

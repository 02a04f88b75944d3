use profiler_client::client::Metric;
use profiler_client::Target;
use profiler_metrics::data::{ProfileReport, Snapshot};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

const RULE: &str = "-----------------------------------------------";

/// A finished profiling run, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    target: Target,
    report: ProfileReport,
}

impl ProfileSummary {
    pub fn new(target: Target, report: ProfileReport) -> ProfileSummary {
        ProfileSummary { target, report }
    }

    pub fn report(&self) -> &ProfileReport {
        &self.report
    }
}

fn fmt_duration(d: &Duration) -> String {
    if d.as_secs() >= 5 {
        let s: f64 = d.as_secs() as f64 + (d.subsec_millis() as f64 / 1000.0);
        format!("{:.3}s", s)
    } else {
        format!("{}ms", d.as_millis())
    }
}

fn fmt_size(s: u64) -> String {
    let magnitudes = &["B", "KB", "MB", "GB"];
    let max_magnitude = magnitudes.len() - 1;
    let mut total = s as f64;
    let mut cur_magnitude = 0;
    while total > 1024.0 && cur_magnitude < max_magnitude {
        total /= 1024.0;
        cur_magnitude += 1;
    }
    if cur_magnitude == 0 {
        format!("{:.0}{}", total, magnitudes[cur_magnitude])
    } else {
        format!("{:.1}{}", total, magnitudes[cur_magnitude])
    }
}

fn abbrev_metric(m: &Metric) -> &'static str {
    use profiler_client::client::Metric::*;
    match m {
        Dns => "DNS",
        Connection => "Conn",
        Tls => "TLS",
        FullResponse => "Resp",
        ResponseLen => "Len",
    }
}

fn format_snapshot(s: &Snapshot<Metric>) -> Option<String> {
    let display = if s.key().is_latency() {
        fmt_duration(&s.gauge_as_duration()?)
    } else {
        fmt_size(s.gauge()?)
    };
    Some(format!("{}: {}", abbrev_metric(&s.key()), display))
}

/// One-line rendering of the latest per-phase measurements, skipping phases
/// that were never recorded (such as DNS for IP literals).
pub fn format_phases(snapshots: &[Snapshot<Metric>]) -> String {
    snapshots
        .iter()
        .filter(|s| s.count().unwrap_or(0) > 0)
        .filter_map(format_snapshot)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Display for ProfileSummary {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let r = &self.report;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "[*] Profiling {}", self.target)?;
        writeln!(f, "[*] Requests sent: {}", r.requests)?;
        writeln!(f, "[*] Fastest response time: {}ms", r.fastest_ms)?;
        writeln!(f, "[*] Slowest response time: {}ms", r.slowest_ms)?;
        writeln!(f, "[*] Mean response time: {}ms", r.mean_ms)?;
        writeln!(f, "[*] Median response time: {}ms", r.median_ms)?;
        writeln!(f, "[*] Successful requests: {}%", r.success_percent)?;
        writeln!(f, "[*] Error codes received: {:?}", r.error_codes)?;
        writeln!(f, "[*] Smallest response size: {}B", r.smallest_body_bytes)?;
        writeln!(f, "[*] Largest response size: {}B", r.largest_body_bytes)?;
        write!(f, "{}", RULE)
    }
}

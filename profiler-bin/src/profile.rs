use crate::config::{Mode, RunConfig};
use crate::error::ProfilerError;
use crate::reporting::{format_phases, ProfileSummary};
use profiler_client::client::Metric;
use profiler_client::{RequestResult, Target, Transport};
use profiler_metrics::data::{ProfileReport, ResultSeries};
use profiler_metrics::Collector;
use slog::{o, Logger};

/// Upper bound on the series capacity reserved before the first request.
const MAX_PREALLOCATED: usize = 1024;

#[derive(Debug)]
pub enum Output {
    /// Raw response of a single request
    Body(Vec<u8>),
    Report(ProfileSummary),
}

/// Drives a run: one request, or `repeat` requests one after another folded into a report.
pub struct Profiler<T> {
    transport: T,
    collector: Collector<Metric>,
    logger: Logger,
}

impl<T: Transport> Profiler<T> {
    /// `collector` should be the one the transport reports its phase samples to.
    pub fn new(transport: T, collector: Collector<Metric>, logger: &Logger) -> Profiler<T> {
        Profiler {
            transport,
            collector,
            logger: logger.new(o!("component" => "profiler")),
        }
    }

    pub async fn run(&mut self, config: &RunConfig) -> Result<Output, ProfilerError> {
        match config.mode() {
            Mode::Single => {
                let result = self.request(config.target(), 1).await?;
                Ok(Output::Body(result.body))
            }
            Mode::Profile => {
                slog::info!(self.logger, "profiling";
                    "target" => %config.target(), "requests" => config.repeat());
                let series = self.collect_series(config).await?;
                let report = ProfileReport::from_series(&series)?;
                let summary = ProfileSummary::new(config.target().clone(), report);
                slog::info!(self.logger, "profiling finished";
                    "mean_ms" => summary.report().mean_ms,
                    "errors" => summary.report().error_codes.len());
                Ok(Output::Report(summary))
            }
        }
    }

    /// Any failed request aborts the whole run.
    async fn collect_series(&mut self, config: &RunConfig) -> Result<ResultSeries, ProfilerError> {
        let mut series = ResultSeries::with_capacity(config.repeat().min(MAX_PREALLOCATED));
        for n in 1..=config.repeat() {
            let result = self.request(config.target(), n).await?;
            series.record(
                result.latency_millis(),
                result.body_len(),
                result.status.as_u16(),
            );
        }
        Ok(series)
    }

    async fn request(&mut self, target: &Target, n: usize) -> Result<RequestResult, ProfilerError> {
        let result = match self.transport.send_request(target).await {
            Ok(result) => result,
            Err(e) => {
                slog::error!(self.logger, "request failed, aborting run"; "n" => n, "error" => %e);
                return Err(e.into());
            }
        };
        self.collector.process_outstanding();
        slog::debug!(self.logger, "request complete";
            "n" => n,
            "status" => %result.status,
            "latency_ms" => result.latency_millis(),
            "bytes" => result.body_len(),
            "phases" => format_phases(&Metric::all_metrics(&self.collector)));
        Ok(result)
    }
}

mod config;
mod error;
mod profile;
mod reporting;

use crate::config::{FileConfig, RunConfig};
use crate::error::ProfilerError;
use crate::profile::{Output, Profiler};
use clap::{crate_version, value_t, App, Arg, ArgMatches, ErrorKind};
use profiler_client::{Client, ClientOptions, Target};
use slog::{o, Drain, Level};
use std::io::{self, Write};

const EXAMPLES: &str = "EXAMPLES:
    Print the raw response:  profiler --url www.example.com
    Profile 10 requests:     profiler --url www.example.com --profile 10

Only HTTPS endpoints are supported.";

fn root_logger(level: Level) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let async_drain = slog_async::Async::new(drain).build().fuse();
    let level_filter = slog::LevelFilter(async_drain, level).fuse();
    slog::Logger::root(level_filter, o!())
}

fn app() -> App<'static, 'static> {
    App::new("profiler")
        .version(crate_version!())
        .about("Send raw HTTPS requests and measure response times")
        .after_help(EXAMPLES)
        .arg(
            Arg::with_name("url")
                .long("url")
                .value_name("URL")
                .help("Host or url to request, e.g. www.example.com/path")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("profile")
                .long("profile")
                .value_name("N")
                .help("Send N requests one after another and print statistics")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Path to config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets verbosity level"),
        )
}

fn log_level(occurrences: u64) -> Level {
    match occurrences {
        0 => Level::Warning,
        1 => Level::Info,
        2 => Level::Debug,
        3 => Level::Trace,
        _ => {
            eprintln!("WARNING: more than -vvv is ignored");
            Level::Trace
        }
    }
}

fn run_config(matches: &ArgMatches) -> Result<RunConfig, ProfilerError> {
    let url = matches
        .value_of("url")
        .ok_or_else(|| ProfilerError::Usage("--url is required".into()))?;
    let target = Target::parse(url)?;
    if matches.is_present("profile") {
        let count = value_t!(matches, "profile", usize)
            .map_err(|e| ProfilerError::Usage(e.message))?;
        Ok(RunConfig::profile(target, count)?)
    } else {
        Ok(RunConfig::single(target))
    }
}

fn client_options(matches: &ArgMatches) -> Result<ClientOptions, ProfilerError> {
    let file_config = match matches.value_of("config") {
        Some(path) => FileConfig::load(path).map_err(ProfilerError::Config)?,
        None => FileConfig::default(),
    };
    Ok(file_config.client_options()?)
}

fn execute(
    logger: &slog::Logger,
    options: ClientOptions,
    config: &RunConfig,
) -> Result<Output, ProfilerError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (client, collector) = Client::new_client_and_collector(options, logger)?;
    let mut profiler = Profiler::new(client, collector, logger);
    rt.block_on(profiler.run(config))
}

fn write_output(output: Output) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output {
        Output::Body(body) => {
            out.write_all(&body)?;
            writeln!(out)?;
        }
        Output::Report(summary) => writeln!(out, "{}", summary)?,
    }
    out.flush()
}

fn run(matches: &ArgMatches, logger: &slog::Logger) -> Result<(), ProfilerError> {
    let config = run_config(matches)?;
    let options = client_options(matches)?;
    slog::debug!(logger, "starting"; "target" => %config.target(), "requests" => config.repeat());
    let output = execute(logger, options, &config)?;
    write_output(output)?;
    Ok(())
}

fn real_main() -> i32 {
    let matches = match app().get_matches_safe() {
        Ok(m) => m,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                println!("{}", e.message);
                return 0;
            }
            _ => {
                eprintln!("Invalid input provided, please read the help below for details\n");
                eprintln!("{}", e.message);
                return 2;
            }
        },
    };
    let logger = root_logger(log_level(matches.occurrences_of("v")));
    match run(&matches, &logger) {
        Ok(()) => 0,
        Err(e) => {
            slog::debug!(logger, "run failed"; "error" => ?e);
            eprintln!("{}", e);
            if e.shows_usage() {
                eprintln!("\n{}\n\n{}", matches.usage(), EXAMPLES);
            }
            e.exit_code()
        }
    }
}

fn main() {
    let code = real_main();
    std::process::exit(code);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Mode;

    fn parse(args: &[&str]) -> Result<ArgMatches<'static>, clap::Error> {
        app().get_matches_from_safe(std::iter::once("profiler").chain(args.iter().copied()))
    }

    #[test]
    fn url_only_is_single_mode() {
        let matches = parse(&["--url", "https://www.example.com/a"]).unwrap();
        let config = run_config(&matches).unwrap();
        assert_eq!(config.mode(), Mode::Single);
        assert_eq!(config.repeat(), 1);
        assert_eq!(config.target().host(), "www.example.com");
        assert_eq!(config.target().path(), "/a");
    }

    #[test]
    fn profile_count() {
        let matches = parse(&["--url", "example.com", "--profile", "10"]).unwrap();
        let config = run_config(&matches).unwrap();
        assert_eq!(config.mode(), Mode::Profile);
        assert_eq!(config.repeat(), 10);
    }

    #[test]
    fn non_numeric_profile_count() {
        let matches = parse(&["--url", "example.com", "--profile", "ten"]).unwrap();
        let err = run_config(&matches).unwrap_err();
        assert!(matches!(err, ProfilerError::Usage(_)), "{:?}", err);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_profile_count() {
        let matches = parse(&["--url", "example.com", "--profile", "0"]).unwrap();
        let err = run_config(&matches).unwrap_err();
        assert!(matches!(err, ProfilerError::Usage(_)), "{:?}", err);
    }

    #[test]
    fn invalid_url() {
        let matches = parse(&["--url", "x"]).unwrap();
        let err = run_config(&matches).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.shows_usage());
    }

    #[test]
    fn help_prints_usage() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::HelpDisplayed);
        assert!(err.message.contains("--profile"));
    }

    #[test]
    fn other_shapes_are_rejected() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["www.example.com"]).is_err());
        assert!(parse(&["--url"]).is_err());
        assert!(parse(&["--url", "example.com", "--count", "3"]).is_err());
    }

    #[test]
    fn verbosity() {
        assert_eq!(log_level(0), Level::Warning);
        assert_eq!(log_level(2), Level::Debug);
        let matches = parse(&["-vv", "--url", "example.com"]).unwrap();
        assert_eq!(log_level(matches.occurrences_of("v")), Level::Debug);
    }

    #[test]
    fn default_client_options() {
        let matches = parse(&["--url", "example.com"]).unwrap();
        assert_eq!(client_options(&matches).unwrap(), ClientOptions::default());
    }
}

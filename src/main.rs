use std::{error::Error, io, path::PathBuf, sync::Arc, time::Duration};

use clap::{value_parser, Arg, ArgMatches, Command};
use tracing::info;

use live_feed::telemetry::{self, LogTarget};
use live_feed::{fixture, stream, ui, FeedConfig, Producer, RollingSink, UniformSource};

fn feed_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("capacity")
            .long("capacity")
            .value_parser(value_parser!(usize))
            .help("Number of samples kept in the rolling window [default: 200]"),
    )
    .arg(
        Arg::new("period-ms")
            .long("period-ms")
            .value_parser(value_parser!(u64))
            .help("Milliseconds between generated samples [default: 1000]"),
    )
    .arg(
        Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .help("Seed for reproducible values"),
    )
}

fn cli() -> Command {
    Command::new("live-feed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live-updating chart fed by a background sample producer")
        .subcommand(
            feed_args(Command::new("plot").about("Draw the rolling window as a live chart"))
                .arg(
                    Arg::new("redraw-ms")
                        .long("redraw-ms")
                        .value_parser(value_parser!(u64))
                        .help("Milliseconds between chart redraws [default: 100]"),
                )
                .arg(
                    Arg::new("log-file")
                        .long("log-file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write logs to this file while the chart owns the terminal"),
                ),
        )
        .subcommand(
            feed_args(Command::new("stream").about("Print samples to stdout as JSON lines")).arg(
                Arg::new("ticks")
                    .long("ticks")
                    .value_parser(value_parser!(u64))
                    .help("Stop after this many samples (default: until Ctrl-C)"),
            ),
        )
        .subcommand(Command::new("fixture").about("Run the lint/format example functions once"))
}

fn feed_config(matches: &ArgMatches) -> FeedConfig {
    let mut config = FeedConfig::default();
    if let Some(capacity) = matches.get_one::<usize>("capacity") {
        config.capacity = *capacity;
    }
    if let Some(period) = matches.get_one::<u64>("period-ms") {
        config.period = Duration::from_millis(*period);
    }
    if let Ok(Some(redraw)) = matches.try_get_one::<u64>("redraw-ms") {
        config.redraw = Duration::from_millis(*redraw);
    }
    config.seed = matches.get_one::<u64>("seed").copied();
    config
}

fn run_plot(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let target = match matches.get_one::<PathBuf>("log-file") {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Disabled,
    };
    telemetry::init(target)?;

    let config = feed_config(matches);
    config.validate()?;

    let sink = Arc::new(RollingSink::new(config.capacity)?);
    let producer = Producer::new(Arc::clone(&sink), UniformSource::new(config.seed))
        .spawn(config.period)?;

    let res = ui::run(sink, config.redraw);
    let ticks = ui::settle(res, producer.join())?;
    info!(ticks, "plot closed");
    Ok(())
}

fn run_stream(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    telemetry::init(LogTarget::Stderr)?;
    let config = feed_config(matches);

    let stop = stream::interrupt_signal()?;

    let limit = matches.get_one::<u64>("ticks").copied();
    stream::run(&config, limit, stop, io::stdout().lock())?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("plot", sub)) => run_plot(sub),
        Some(("stream", sub)) => run_stream(sub),
        Some(("fixture", _)) => {
            fixture::run()?;
            Ok(())
        }
        _ => {
            // No subcommand: plot with defaults
            let defaults = cli().get_matches_from(["live-feed", "plot"]);
            match defaults.subcommand() {
                Some((_, sub)) => run_plot(sub),
                None => Ok(()),
            }
        }
    }
}

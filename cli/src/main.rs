mod args;
mod cli;

use args::Args;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

fn main() {
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}", e);
    }
    if let Err(e) = cli::run(args) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

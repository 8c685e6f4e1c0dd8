use log::{error, LevelFilter};
use sentinel_rbtree::console::Console;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io;
use std::str::FromStr;

/// Environment variable selecting the log level
const LOG_LEVEL_VAR: &str = "RBTREE_LOG";

fn log_level() -> LevelFilter {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|level| LevelFilter::from_str(&level).ok())
        .unwrap_or(LevelFilter::Warn)
}

fn initialize_logging() {
    if let Err(err) = TermLogger::init(
        log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("could not initialize logging: {}", err);
    }
}

fn main() {
    initialize_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdout.lock());
    if let Err(err) = console.run(stdin.lock()) {
        error!("console stopped: {}", err);
        std::process::exit(1);
    }
}

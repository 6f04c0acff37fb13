//! Centipede entry point
//!
//! Sets up logging and settings, then runs the game loop in the terminal.

use std::io::{BufWriter, stdout};
use std::process::ExitCode;

use centipede::platform::Terminal;
use centipede::{App, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Centipede starting...");

    let settings = Settings::load();
    let mut app = App::new(&settings);

    // The terminal is restored when `term` drops, before any error is logged
    let result = Terminal::open(BufWriter::new(stdout())).and_then(|mut term| app.run(&mut term));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("centipede: {}", e);
            ExitCode::FAILURE
        }
    }
}

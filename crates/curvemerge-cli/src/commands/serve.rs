//! Serve command - run the HTTP merge service.

use std::path::PathBuf;

use colored::Colorize;

use super::load_merger;
use crate::server::{app, state::AppState};

pub fn run(port: u16, rules: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let merger = load_merger(rules.as_ref())?;
    let state = AppState::new(merger);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting merge service at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  POST {}/api/merge", url);
    println!("  POST {}/api/merge/report", url);
    println!("  POST {}/api/classify", url);
    println!("  GET  {}/api/rules", url);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))
}

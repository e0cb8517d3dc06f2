use anyhow::Context;
use forms_cli::{cli, run, LOG_ENV};
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = cli().get_matches();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if matches.get_flag("log-json") {
        builder.json().init();
    } else {
        builder.init();
    }

    let mut stdout = std::io::stdout().lock();
    let result = run(&matches, &mut stdout).and_then(|code| {
        stdout.flush().context("flushing stdout")?;
        Ok(code)
    });
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

//! pickaxe-report: find the commits that introduced a string
//!
//! Runs `git log -S` over a repository, keeps the commits whose diffs add a
//! line containing the string, and writes an HTML or JSON report.

use clap::Parser;
use pickaxe_report::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries the report path
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    let summary = pickaxe_report::run(&config)?;
    println!("{}", summary.report_path.display());
    Ok(())
}

//! Hello World demo entry point: compose configuration, build a greeting,
//! print it.

use std::io::{self, IsTerminal, Write};

use clap::Parser;
use configue_cli::{ConfigArgs, Injector};

use hello_world::config::GreetingConfig;
use hello_world::error::HelloWorldError;
use hello_world::message::{build_plan, write_plan};

/// Friendly greeting demo driven by layered configuration.
#[derive(Debug, Parser)]
#[command(name = "hello-world", bin_name = "hello-world", version)]
struct HelloWorldCli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<(), HelloWorldError> {
    let cli = HelloWorldCli::parse();
    let stdout = io::stdout();
    let colour = stdout.is_terminal();
    let mut out = stdout.lock();
    let plan = Injector::new()
        .logging_key("logging")
        .colour(colour)
        .run(&cli.config, &mut out, |config: GreetingConfig| build_plan(&config))?;
    if let Some(plan) = plan.transpose()? {
        tracing::debug!(greeting = plan.message(), "greeting planned");
        write_plan(&mut out, &plan)?;
        out.flush()?;
    }
    Ok(())
}

use clap::Parser;
use color_eyre::Result;
use meet_ui_config::{
    version,
    Args,
    Config,
};
use meet_ui_runner::{
    init_errors,
    init_logging,
    run,
    Scenario,
};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
struct Cli {
    #[command(flatten)]
    args: Args,

    #[command(subcommand)]
    scenario: Scenario,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    init_logging()?;

    let Cli { args, scenario } = Cli::parse();
    let config = Config::new(args)?;
    run(scenario, &config).await
}

use clap::Parser;
use horizon::adapter::inbound::cli::{self, command::Cli, diagnostic::WalletError, output};
use horizon::error::{ChainError, Error};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::apply_color(&cli.color);
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = cli::execute(cli).await {
        if matches!(e, Error::Chain(ChainError::WalletNotConfigured)) && !output::is_json() {
            eprintln!("{:?}", miette::Report::new(WalletError));
        } else {
            output::error(&e.to_string());
        }
        std::process::exit(1);
    }
}

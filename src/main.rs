use clap::Parser;
use ztouch::cli::commands::Cli;
use ztouch::cli::handlers;
use ztouch::io::config_io;
use ztouch::logging;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.clone().unwrap_or_else(config_io::config_path);
    let config = config_io::read_config_from(&config_path)?;
    let data_dir = config_io::resolve_data_dir(&config, cli.data_dir.as_deref());
    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log.level.clone())
        .unwrap_or_else(|| logging::DEFAULT_LEVEL.to_string());

    if cli.command.is_none() {
        // No subcommand: the TUI owns the terminal, so logs go to a file
        logging::init_to_file(&ztouch::tui::app::log_file(&data_dir), &level)?;
        tracing::info!(data_dir = %data_dir.display(), "starting ui");
        ztouch::tui::run(&config, &data_dir)
    } else {
        logging::init_stderr(&level)?;
        handlers::dispatch(cli, &config, &data_dir)
    }
}

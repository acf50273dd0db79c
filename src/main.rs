use termdeck::{
    AppResult,
    cli::{Cli, Commands},
    config::Config,
    init_logging,
    ui::{self, UIManager},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    let cli = Cli::parse_args();

    // Configuration first: it decides where logs go
    let config = Config::load_or_default(&cli.config_file);

    let _log_guard = init_logging(
        &cli.effective_log_level(&config.log_level),
        &config.log.file_path,
    )?;

    tracing::info!("termdeck starting...");
    tracing::debug!("CLI arguments: {:?}", cli);

    match cli.command() {
        Commands::Config { action } => {
            Config::handle_command(&action, &cli.config_file)?;
        }
        Commands::Interactive { simple } => {
            if cli.is_dry_run_mode() {
                ui::display_welcome_page(&config)?;
                ui::display_configuration(&cli, &config)?;
            } else if simple {
                ui::cli::run_stdio(&config)?;
            } else {
                UIManager::new(config).run().await?;
            }
        }
    }

    tracing::info!("termdeck stopped");
    Ok(())
}

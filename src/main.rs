use std::process::ExitCode;
use user_directory::api;
use user_directory::logger::*;
use user_directory::server::*;
use user_directory::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    debug!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let server = Server::try_new(&project_settings).await?;

    let response = api::execute(&server, cli.command).await;

    server.shutdown().await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

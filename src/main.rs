// ABOUTME: CLI entrypoint for quipex command
// ABOUTME: Handles error exit codes and command dispatch

use clap::Parser;
use quipex::{
    api::ApiClient,
    auth::resolve_token,
    cli::{Cli, Commands},
    config::Config,
    export::ExportOptions,
    manifest::Manifest,
    session::Session,
    traverse::Traverser,
    Error, Result,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("quipex: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?.merged_with(&cli);

    let token = resolve_token(cli.token.clone(), config.api_token.as_deref())?;
    let api = ApiClient::new(token, Some(config.api_base.clone()))?;

    match cli.command() {
        Commands::Whoami => {
            let user = api.current_user()?;
            println!("private folder: {}", user.private_folder_id);
        }
        Commands::Export => {
            println!("Getting user info from the Quip API...");
            let user = api.current_user()?;

            let root_folder = if config.testing {
                config.example_folder_id.clone().ok_or_else(|| {
                    Error::Config("testing mode requires example_folder_id".into())
                })?
            } else {
                config
                    .root_folder_id
                    .clone()
                    .unwrap_or(user.private_folder_id)
            };

            let mut manifest = Manifest::open(config.manifest_path())?;

            let session = Session::launch(&config)?;
            session.login(&config)?;

            let options = ExportOptions {
                domain: config.domain.clone(),
                dupe_check: config.dupe_check,
            };
            let traverser = Traverser::new(&api, session.page(), &mut manifest, options);
            let stats = traverser.run(&root_folder, &config.export_root())?;

            println!(
                "Done: {} exported, {} skipped as duplicates, {} without export controls ({} folders)",
                stats.exported, stats.skipped_duplicate, stats.skipped_no_control, stats.folders
            );
        }
    }

    Ok(())
}

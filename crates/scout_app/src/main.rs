mod cli;
mod config;
mod effects;
mod logging;
mod render;
mod shell;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use scout_core::{AppState, Msg};
use scout_engine::{FileKeyValueStore, Html2MdConverter, SavedJobsStore};
use scout_logging::scout_info;

use crate::cli::{Cli, Commands, SearchArgs};
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render::{render_details, render_results, render_saved};
use crate::shell::Shell;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    config.apply_env(|name| std::env::var(name).ok());
    config.apply_cli(&cli);

    logging::initialize(config.log_destination, config.level_filter()?);
    scout_info!("scout starting");
    config.log_summary();

    let mut store = SavedJobsStore::initialize(FileKeyValueStore::new(&config.data_dir));

    match cli.command {
        Commands::Search(args) => run_search(&config, &args, &store),
        Commands::Saved { sort } => {
            print!("{}", render_saved(&store.sorted(sort)));
            Ok(())
        }
        Commands::SaveId { id } => {
            let runner = EffectRunner::new(&config)?;
            let state = AppState::with_defaults(config.search_defaults());
            let state = runner.run_details(state, id.clone())?;
            let Some(listing) = state.details().cloned() else {
                let reason = state
                    .details_error()
                    .map(|err| err.to_string())
                    .unwrap_or_else(|| "no answer".to_string());
                anyhow::bail!("could not fetch {id}: {reason}");
            };
            print!("{}", render_details(&listing, &Html2MdConverter));
            if store.save(listing).context("saving job")? {
                println!("Saved {id}.");
            } else {
                println!("{id} is already saved.");
            }
            Ok(())
        }
        Commands::Unsave { id } => {
            if store.unsave(&id).context("updating saved jobs")? {
                println!("Removed {id}.");
            } else {
                println!("{id} was not saved.");
            }
            Ok(())
        }
        Commands::Shell => {
            let runner = EffectRunner::new(&config)?;
            let state = AppState::with_defaults(config.search_defaults());
            let stdin = io::stdin();
            Shell::new(runner, &mut store, state, io::stdout()).run(stdin.lock())
        }
    }
}

fn run_search(
    config: &AppConfig,
    args: &SearchArgs,
    store: &SavedJobsStore<FileKeyValueStore>,
) -> anyhow::Result<()> {
    let runner = EffectRunner::new(config)?;
    let state = AppState::with_defaults(config.search_defaults());
    let mut state = runner.run_until_idle(state, Msg::SearchSubmitted(args.to_query()))?;

    let mut fetched = 1;
    while fetched < args.pages && state.can_load_more() {
        state = runner.run_until_idle(state, Msg::LoadMoreRequested)?;
        fetched += 1;
    }

    let view = state.view();
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render_results(&view, |id| store.is_saved(id)))?;
    if let Some(err) = state.error() {
        anyhow::bail!("search failed: {err}");
    }
    Ok(())
}

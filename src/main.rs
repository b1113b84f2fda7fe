use clap::Parser;
use color_eyre::Result;
use leettrack::{
    Catalog, Config, JsonFileStore, MemoryStore, Profile, RemoteClient,
    cli::{Cli, Commands},
    config::StorageBackend,
    store::ProblemStore,
};
use std::net::SocketAddr;
use std::sync::Arc;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config option is parsed but not yet used to override config path
    let config = Config::load_with_profile(profile)?;

    // Select the storage backend once, here; nothing downstream probes
    // the environment.
    let store: Box<dyn ProblemStore> = match config.storage_backend {
        StorageBackend::File => Box::new(JsonFileStore::new(config.get_data_path(profile))),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };

    let client = RemoteClient::new(config.api_base_url.clone());

    // Dispatch to appropriate command handler
    match cli.command {
        None | Some(Commands::Tui) => {
            let catalog = Arc::new(Catalog::load(&config.get_catalog_path(profile)));
            let app = leettrack::tui::App::new(config, store, catalog, client);
            leettrack::tui::run_event_loop(app)?;
        }
        Some(Commands::Serve { host, port }) => {
            leettrack::proxy::init_tracing();
            let host = host.unwrap_or_else(|| config.proxy_host.clone());
            let port = port.unwrap_or(config.proxy_port);
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .map_err(|e| color_eyre::eyre::eyre!("Invalid proxy address: {}", e))?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(leettrack::proxy::serve(client, addr))?;
        }
        Some(Commands::Add {
            title,
            difficulty,
            url,
            tags,
            number,
        }) => {
            leettrack::cli::handle_add(title, difficulty, url, tags, number, store.as_ref())?;
        }
        Some(Commands::Import {
            identifier,
            daily,
            random,
        }) => {
            leettrack::cli::handle_import(identifier, daily, random, store.as_ref(), &client)?;
        }
    }

    Ok(())
}

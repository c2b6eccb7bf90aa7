//! Lunch Set - Main entry point
//!
//! Parses the command line, sets up logging and either runs the interactive
//! menu or one of the headless commands.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use lunchset::app::App;
use lunchset::catalog::{Catalog, CatalogSource, FileCatalog, HttpCatalog};
use lunchset::cli::{Cli, Commands};
use lunchset::config::AppConfig;
use lunchset::controller::OrderController;
use lunchset::error::LunchError;
use lunchset::types::{Category, KindFilter, format_price};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Initialize tracing with appropriate settings
///
/// `RUST_LOG` overrides the default `info` level. Logs go to `--log-file`
/// when given; otherwise the interactive menu discards them and headless
/// commands write to stderr.
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, ansi) = match cli.log_file {
        Some(ref path) => {
            let file = File::create(path)
                .map_err(|e| LunchError::general(format!("Failed to create log file: {}", e)))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if cli.is_interactive() => (BoxMakeWriter::new(std::io::sink), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .init();
    Ok(())
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    init_logging(&cli)?;
    info!("Lunch Set starting up");
    debug!("CLI arguments parsed: {:?}", cli);

    match cli.command {
        Some(Commands::InitConfig { ref path }) => {
            AppConfig::default().save_to_file(path)?;
            println!("✓ Wrote default configuration to {}", path.display());
        }
        Some(Commands::Catalog { ref kind }) => {
            let config = cli.resolve_config()?;
            print_catalog(&config, kind)?;
        }
        Some(Commands::Check { ref keywords }) => {
            let config = cli.resolve_config()?;
            if !check_order(&config, keywords)? {
                std::process::exit(1);
            }
        }
        Some(Commands::Menu) | None => {
            let config = cli.resolve_config()?;
            run_menu(config)?;
        }
    }

    Ok(())
}

/// Pick the catalog source the configuration asks for
fn catalog_source(config: &AppConfig) -> Box<dyn CatalogSource> {
    match config.catalog_file {
        Some(ref path) => Box::new(FileCatalog::new(path)),
        None => Box::new(HttpCatalog::new(
            config.endpoint.clone(),
            config.api_key.clone(),
        )),
    }
}

/// Run the interactive menu
fn run_menu(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Initializing terminal for TUI mode");
    let source = catalog_source(&config);

    // Initialize terminal
    enable_raw_mode().map_err(|e| LunchError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        LunchError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = run_app(config, source);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Err(ref e) = result {
        error!("Menu exited with error: {}", e);
    }
    Ok(result?)
}

fn run_app(config: AppConfig, source: Box<dyn CatalogSource>) -> Result<(), LunchError> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| LunchError::terminal(format!("Failed to create terminal: {}", e)))?;

    let mut app = App::new(config);
    app.start_catalog_load(source);
    app.run(&mut terminal)
}

/// Print the catalog grouped by category, applying `--kind` filters
fn print_catalog(
    config: &AppConfig,
    filters: &[(Category, KindFilter)],
) -> Result<(), Box<dyn std::error::Error>> {
    let source = catalog_source(config);
    let catalog = Catalog::load(source.as_ref())?;
    info!("Loaded {} dishes from {}", catalog.len(), source.describe());

    for category in Category::ALL {
        // Last filter given for a category wins
        let filter = filters
            .iter()
            .rev()
            .find(|(c, _)| *c == category)
            .map(|(_, f)| f.clone())
            .unwrap_or_default();

        println!("{} [{}]", category.panel_title(), filter);
        let kinds = catalog.kinds(category);
        if !kinds.is_empty() {
            println!("  kinds: {}", kinds.join(", "));
        }

        let dishes = catalog.visible(category, &filter);
        if dishes.is_empty() {
            println!("  No dishes available at the moment");
        }
        for dish in dishes {
            println!(
                "  {:<24} {:<40} {:>8} {}  {}",
                dish.keyword,
                dish.name,
                format_price(dish.price),
                config.currency,
                dish.count
            );
        }
        println!();
    }

    Ok(())
}

/// Validate a set of dish keywords. Returns `false` when the set is rejected.
fn check_order(config: &AppConfig, keywords: &[String]) -> Result<bool, Box<dyn std::error::Error>> {
    let source = catalog_source(config);
    let mut controller = OrderController::new(Catalog::load(source.as_ref())?);

    for keyword in keywords {
        controller.select_keyword(keyword)?;
    }

    match controller.submit() {
        Ok(order) => {
            println!("✓ Order accepted");
            for line in order.describe(&config.currency) {
                println!("  {}", line);
            }
            if let Some(ref path) = config.order_output {
                order.save_to_file(path)?;
                println!("✓ Order written to {}", path.display());
            }
            Ok(true)
        }
        Err(LunchError::CompositionRejected(rejection)) => {
            info!("Order rejected: {:?}", rejection);
            eprintln!("✗ {}", rejection);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

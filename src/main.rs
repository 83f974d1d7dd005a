mod app;
mod catalog;
mod config;
mod sampler;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use catalog::{Catalog, Category};
use config::{AppConfig, MAX_SAMPLE_SIZE};
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "namedeck")]
#[command(version)]
#[command(about = "Random names for Beyblade, D&D, Splatoon and World of Warcraft")]
struct Args {
    /// Category to use (see --list)
    #[arg(short, long)]
    category: Option<String>,

    /// List available categories
    #[arg(short, long)]
    list: bool,

    /// Print a random set of names and exit
    #[arg(short, long)]
    generate: bool,

    /// Print the description of NAME and exit
    #[arg(short, long, value_name = "NAME")]
    describe: Option<String>,

    /// Number of names to generate (overrides config)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=MAX_SAMPLE_SIZE as i64))]
    count: Option<u16>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print --generate output as JSON
    #[arg(long)]
    json: bool,

    /// Config file (default: ~/.config/namedeck/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for relative category paths (overrides config)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so the TUI and piped output stay clean)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let (mut config, config_dir) = match &args.config {
        Some(path) => (AppConfig::load_from(path)?, path.parent().map(PathBuf::from)),
        None => (
            AppConfig::load()?,
            AppConfig::config_path().ok().and_then(|p| p.parent().map(PathBuf::from)),
        ),
    };
    apply_overrides(&mut config, &args);

    let catalog = Catalog::from_config(&config, config_dir.as_deref());

    // Handle CLI-only commands
    if args.list {
        print_categories(&catalog);
        return Ok(());
    }

    let start = resolve_category(
        &catalog,
        args.category.as_deref(),
        config.default_category.as_deref(),
    )?;

    if args.generate || args.describe.is_some() {
        let category = catalog
            .categories()
            .get(start)
            .context("No categories available")?;

        if let Some(name) = &args.describe {
            println!("{}", render_description(category, name).await);
            return Ok(());
        }

        match render_sample(category, config.sample_size, args.seed, args.json).await? {
            Some(output) => println!("{}", output),
            None => eprintln!("No data available"),
        }
        return Ok(());
    }

    ui::init_theme(Theme::from_config(&config.theme));

    // Run TUI
    run_tui(App::new(catalog, config.sample_size, args.seed), start).await
}

/// Command-line values win over the config file
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(dir) = args.data_dir.clone() {
        config.data_dir = Some(dir);
    }
    if let Some(count) = args.count {
        config.sample_size = count as usize;
    }
}

/// Index of the starting category. An unknown `--category` is an error; an
/// unknown configured default falls back to the first category.
fn resolve_category(catalog: &Catalog, cli: Option<&str>, configured: Option<&str>) -> Result<usize> {
    if let Some(id) = cli {
        let category = catalog.require(id)?;
        return Ok(catalog.position(&category.id).unwrap_or(0));
    }

    match configured {
        Some(id) => match catalog.position(id) {
            Some(index) => Ok(index),
            None => {
                tracing::warn!(
                    "default_category '{}' not found (available: {}), using '{}'",
                    id,
                    catalog.ids().join(", "),
                    catalog.ids().first().copied().unwrap_or("")
                );
                Ok(0)
            }
        },
        None => Ok(0),
    }
}

fn print_categories(catalog: &Catalog) {
    let width = catalog.ids().iter().map(|id| id.len()).max().unwrap_or(0);
    for category in catalog.categories() {
        println!(
            "{:<width$}  {}  ({})",
            category.id,
            category.title,
            category.source_label(),
            width = width
        );
    }
}

/// `--generate` output: one name per line, or a JSON array of entries.
/// `None` when the category has no data (failed load or empty list).
async fn render_sample(
    category: &Category,
    count: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<Option<String>> {
    let collection = match catalog::load(category).await {
        Ok(collection) => collection,
        Err(e) => {
            tracing::warn!("Failed to load category '{}': {}", category.id, e);
            return Ok(None);
        }
    };

    if collection.is_empty() {
        tracing::warn!("Category '{}' has no entries", category.id);
        return Ok(None);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let selection = sampler::sample(collection.entries(), count, &mut rng);

    let output = if json {
        serde_json::to_string_pretty(&selection)?
    } else {
        selection
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Some(output))
}

/// `--describe` output. A broken data file still answers with the sentinel.
async fn render_description(category: &Category, name: &str) -> String {
    let collection = match catalog::load(category).await {
        Ok(collection) => collection,
        Err(e) => {
            tracing::warn!("Failed to load category '{}': {}", category.id, e);
            Default::default()
        }
    };

    sampler::describe(collection.entries(), name).to_string()
}

async fn run_tui(mut app: App, start: usize) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.activate_category(start);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        // Pick up finished loads
        app.tick();
        tokio::task::yield_now().await;
    }
}

mod app;
mod config;
mod market;
mod paginator;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use market::Snapshot;

#[derive(Parser, Debug)]
#[command(name = "charbazaar")]
#[command(version)]
#[command(about = "Browse Tibia character auctions in the terminal")]
struct Args {
    /// Auction snapshot (JSON with `servers` and `characters`)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Characters per page (overrides the config file)
    #[arg(short = 'n', long)]
    per_page: Option<usize>,

    /// Print one page as plain text and exit
    #[arg(short, long)]
    print: bool,

    /// Page to print, starting at 1 (with --print)
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't end up in the TUI or --print output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load();

    let data_path = args
        .data
        .clone()
        .or_else(|| config.data_path.clone())
        .context("No snapshot given: pass --data <FILE> or set data_path in the config")?;

    let per_page = match args.per_page {
        Some(0) | None => config.items_per_page,
        Some(n) => n,
    };

    let (characters, servers) = Snapshot::load(&data_path).await?.into_parts();
    if servers.is_empty() {
        tracing::warn!("Snapshot has no servers; no listings can be shown");
    } else {
        tracing::debug!("Indexed {} servers", servers.len());
    }

    let mut app = App::new(characters, servers, per_page);

    if args.print {
        return print_page(&mut app, args.page);
    }

    ui::init_theme(theme::Theme::load(&config.theme));
    run_tui(&mut app).await
}

fn print_page(app: &mut App, page: usize) -> Result<()> {
    // Pages past the end are ignored and page 1 is printed instead
    if page > 1 && app.go_to_page(page - 1).is_none() {
        tracing::warn!("Page {} does not exist ({} pages)", page, app.paginator().page_count());
    }

    let now = ui::now_secs();
    for card in &app.cards {
        let highlight = card
            .highlighted_skill()
            .map(|s| format!("{} {}", s.name, s.level))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{}{} | {} | {} {} | {} | {} {} | {}",
            if card.favorite { "♥ " } else { "" },
            card.nickname,
            card.level_line(),
            card.region.flag(),
            card.server_name,
            market::format::format_time_left(card.auction_end, now),
            card.bid_label,
            card.bid,
            highlight,
        );
    }
    println!("{}", app.paginator().tracker_text());
    Ok(())
}

async fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app).await;

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
    let mut ticker = tokio::time::interval(std::time::Duration::from_millis(100));

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.set_status(format!("Error: {}", e));
                            }
                        }
                    }
                }
                continue;
            }
        }

        // Redraw at least every tick so auction countdowns stay current
        ticker.tick().await;
        app.tick();
    }
}

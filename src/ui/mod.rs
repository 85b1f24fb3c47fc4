mod components;

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::market::card::CharacterCard;
use crate::theme::Theme;

// Set once at startup from the config; falls back to the default palette
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialised");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn warning() -> Color { theme().warning }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }
fn battle_green() -> Color { theme().battle_green }
fn battle_yellow() -> Color { theme().battle_yellow }

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(6),    // Listing + card
            Constraint::Length(3), // Paginator
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);

    // Narrow terminals only get the listing
    if area.width > 100 {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        draw_listing(f, app, body[0]);
        draw_card(f, app, body[1]);
    } else {
        draw_listing(f, app, chunks[1]);
    }

    draw_paginator(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    match app.popup {
        Popup::None => {}
        Popup::Drawer => draw_drawer(f, app),
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(warning())))
    } else {
        let mut spans = vec![
            Span::styled(app.filter.vocation.label(), Style::default().fg(text_dim())),
            Span::styled(" │ ", Style::default().fg(inactive())),
            Span::styled(format!("{} listings", app.dataset_len()), Style::default().fg(text_dim())),
            Span::styled(" │ ", Style::default().fg(inactive())),
            Span::styled(format!("{} per page", app.paginator().items_per_page()), Style::default().fg(text_dim())),
        ];
        if app.filter.favorites_only {
            spans.push(Span::styled(" │ ", Style::default().fg(inactive())));
            spans.push(Span::styled("♥ favourites only", Style::default().fg(danger())));
        }
        Line::from(spans)
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_listing(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Character Bazaar ", Style::default().fg(accent()).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));

    let now = now_secs();
    let show_bid = area.width > 70;

    let header_row = Row::new(vec![
        Span::styled("", Style::default().fg(header())),
        Span::styled("Name", Style::default().fg(header())),
        Span::styled("Level", Style::default().fg(header())),
        Span::styled("Server", Style::default().fg(header())),
        Span::styled("Ends", Style::default().fg(header())),
        Span::styled(if show_bid { "Bid" } else { "" }, Style::default().fg(header())),
    ]);

    if app.cards.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No characters to show",
            Style::default().fg(text_dim()),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app.cards.iter().map(|card| listing_row(card, now, show_bid)).collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Percentage(30),
        Constraint::Percentage(25),
        Constraint::Percentage(18),
        Constraint::Percentage(10),
        Constraint::Percentage(17),
    ];

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(block)
        .row_highlight_style(Style::default().bg(bg_selected()).fg(text()));

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn listing_row(card: &CharacterCard, now: u64, show_bid: bool) -> Row<'static> {
    let fav = if card.favorite { "♥" } else { "" };
    let server_style = if card.experimental {
        Style::default().fg(danger())
    } else {
        Style::default().fg(text())
    };

    Row::new(vec![
        Span::styled(fav, Style::default().fg(danger())),
        Span::styled(card.nickname.clone(), Style::default().fg(text())),
        Span::styled(format!("{} {}", card.level, card.vocation), Style::default().fg(text_dim())),
        Span::styled(format!("{} {}", card.region.flag(), card.server_name), server_style),
        Span::styled(crate::market::format::format_time_left(card.auction_end, now), Style::default().fg(text_dim())),
        Span::styled(if show_bid { card.bid.clone() } else { String::new() }, Style::default().fg(accent())),
    ])
}

fn draw_card(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Character ", Style::default().fg(inactive())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let content = match app.selected_card() {
        Some(card) => components::card_lines(card, now_secs()),
        None => vec![Line::from(Span::styled("Nothing selected", Style::default().fg(text_dim())))],
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_paginator(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let paginator = Paragraph::new(components::paginator_line(app.paginator()))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paginator, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(accent()));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(text_dim()));

    let spans = match app.popup {
        Popup::Drawer => vec![
            key("j/k"), desc(" move  "),
            key("f"), desc(" unfavourite  "),
            key("Esc"), desc(" close"),
        ],
        _ => vec![
            key("←/→"), desc(" page  "),
            key("j/k"), desc(" select  "),
            key("f"), desc(" favourite  "),
            key("v"), desc(" vocation  "),
            key("d"), desc(" drawer  "),
            key("?"), desc(" help  "),
            key("q"), desc(" quit"),
        ],
    };

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

/// 90% of the terminal, capped at 70 columns
fn drawer_width(total: u16) -> u16 {
    (total / 10 * 9).min(70)
}

/// Favourites drawer, anchored to the left edge
fn draw_drawer(f: &mut Frame, app: &App) {
    let area = f.area();
    let width = drawer_width(area.width);
    let drawer_area = Rect::new(area.x, area.y, width, area.height.saturating_sub(1));

    f.render_widget(Clear, drawer_area);

    let block = Block::default()
        .title(Span::styled(" ♥ Favourites ", Style::default().fg(accent()).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));

    let mut lines = Vec::new();
    if app.favorite_cards.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No favourites yet. Press f on a character to add it.",
            Style::default().fg(text_dim()),
        )));
    }

    for (i, card) in app.favorite_cards.iter().enumerate() {
        let selected = i == app.drawer_selected;
        let name_style = if selected {
            Style::default().fg(text()).bg(bg_selected()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text())
        };

        lines.push(Line::from(vec![
            Span::styled(if selected { "▸ " } else { "  " }, Style::default().fg(accent())),
            Span::styled(card.nickname.clone(), name_style),
            Span::styled(format!("  {}", card.level_line()), Style::default().fg(text_dim())),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            components::battleye_span(card.battleye),
            Span::styled(
                format!(" {} ({}) · {}", card.server_name, card.region_name, card.pvp_type),
                Style::default().fg(text_dim()),
            ),
        ]));
        if let Some(skill) = card.highlighted_skill() {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(format!("★ {} {}", skill.name, skill.level), Style::default().fg(accent())),
                Span::styled(format!("   {} {} TC", card.bid_label, card.bid), Style::default().fg(text_dim())),
            ]));
        }
        lines.push(Line::from(""));
    }

    let drawer = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(drawer, drawer_area);
}

fn draw_help_popup(f: &mut Frame) {
    let popup_area = centered_rect(60, 70, f.area());

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };
    let entry = |k: &'static str, d: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), Style::default().fg(accent())),
            Span::raw(d),
        ])
    };

    let help_text = vec![
        section("═══ Pages ═══"),
        entry("←  / →", "Previous page / Next page"),
        entry("g  / G", "First page / Last page"),
        entry("PgUp/PgDn", "Previous page / Next page"),
        Line::from(""),
        section("═══ Characters ═══"),
        entry("j/k ↑/↓", "Select character"),
        entry("f", "Toggle favourite"),
        entry("F", "Show favourites only"),
        entry("v", "Cycle vocation filter"),
        entry("d", "Open favourites drawer"),
        Line::from(""),
        section("═══ Card ═══"),
        Line::from(vec![
            Span::styled("  ★ ", Style::default().fg(accent())),
            Span::raw("marks the character's highest skill"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            components::battleye_span(true),
            Span::raw(" BattlEye protected   "),
            components::battleye_span(false),
            Span::raw(" unprotected"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("h", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 charbazaar Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

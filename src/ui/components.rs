//! Reusable pieces of the auction card and the paginator bar

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::{accent, battle_green, battle_yellow, danger, header, inactive, text, text_dim};
use crate::market::card::{CharacterCard, ItemSlot};
use crate::market::format::format_time_left;
use crate::paginator::Paginator;

/// `« First page  ‹ Previous page   26 - 50 of 101   Next page ›  Last page »`
pub fn paginator_line(paginator: &Paginator) -> Line<'static> {
    let [first, previous, next, last] = paginator.controls();

    let control = |glyph: &'static str, label: &'static str, enabled: bool, glyph_first: bool| {
        let style = if enabled {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(inactive())
        };
        let content = if glyph_first {
            format!("{} {}", glyph, label)
        } else {
            format!("{} {}", label, glyph)
        };
        Span::styled(content, style)
    };

    Line::from(vec![
        control(first.action.glyph(), first.action.label(), first.enabled, true),
        Span::raw("  "),
        control(previous.action.glyph(), previous.action.label(), previous.enabled, true),
        Span::styled("   ", Style::default()),
        Span::styled(paginator.tracker_text(), Style::default().fg(text())),
        Span::styled("   ", Style::default()),
        control(next.action.glyph(), next.action.label(), next.enabled, false),
        Span::raw("  "),
        control(last.action.glyph(), last.action.label(), last.enabled, false),
    ])
}

pub fn battleye_span(battleye: bool) -> Span<'static> {
    let color = if battleye { battle_green() } else { battle_yellow() };
    Span::styled("●", Style::default().fg(color))
}

/// Skill list with the dominant skill emphasised, two skills per line
pub fn skill_lines(card: &CharacterCard) -> Vec<Line<'static>> {
    card.skills
        .chunks(2)
        .map(|pair| {
            let mut spans = vec![Span::raw("  ")];
            for skill in pair {
                let (marker, style) = if skill.highlighted {
                    ("★ ", Style::default().fg(accent()).add_modifier(Modifier::BOLD))
                } else {
                    ("  ", Style::default().fg(text_dim()))
                };
                spans.push(Span::styled(
                    format!("{}{:<12}{:>4}    ", marker, capitalize(&skill.name), skill.level),
                    style,
                ));
            }
            Line::from(spans)
        })
        .collect()
}

/// Full card body for the detail panel
pub fn card_lines(card: &CharacterCard, now: u64) -> Vec<Line<'static>> {
    let label = |s: &'static str| Span::styled(format!("{:<13}", s), Style::default().fg(header()));

    let mut server = vec![
        label("Server"),
        Span::styled(format!("[{}] ", card.region.flag()), Style::default().fg(text_dim())),
        Span::styled(card.server_name.clone(), Style::default().fg(text())),
    ];
    if card.experimental {
        server.push(Span::styled(
            "  ⚠ This is an experimental server!",
            Style::default().fg(danger()),
        ));
    }

    let star = if card.favorite { "♥ " } else { "" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(star, Style::default().fg(danger())),
            Span::styled(card.nickname.clone(), Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(card.level_line(), Style::default().fg(text_dim()))),
        Line::from(Span::styled(card.outfit_url.clone(), Style::default().fg(inactive()))),
        Line::from(""),
        Line::from(server),
        Line::from(vec![
            label("PvP"),
            battleye_span(card.battleye),
            Span::styled(format!(" {}", card.pvp_type), Style::default().fg(text())),
        ]),
        Line::from(vec![
            label("Auction End"),
            Span::styled(format_time_left(card.auction_end, now), Style::default().fg(text())),
        ]),
        Line::from(vec![
            label(card.bid_label),
            Span::styled(format!("{} TC", card.bid), Style::default().fg(accent())),
        ]),
        Line::from(""),
        Line::from(Span::styled("Items", Style::default().fg(header()))),
    ];

    for slot in &card.items {
        let line = match slot {
            ItemSlot::Featured { item, url } => {
                Span::styled(format!("  #{:<6} {}", item, url), Style::default().fg(text_dim()))
            }
            ItemSlot::Empty => Span::styled(format!("  ({})", slot.alt()), Style::default().fg(inactive())),
        };
        lines.push(Line::from(line));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Skills", Style::default().fg(header()))));
    lines.extend(skill_lines(card));

    if !card.charms.is_empty() {
        lines.push(Line::from(""));
        let mut chips = vec![Span::styled("Charms  ", Style::default().fg(header()))];
        for charm in &card.charms {
            chips.push(Span::styled(format!("[{}] ", charm), Style::default().fg(accent())));
        }
        lines.push(Line::from(chips));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("󰏌 ", Style::default().fg(text_dim())),
        Span::styled(card.auction_url.clone(), Style::default().fg(text_dim())),
    ]));

    lines
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::{bold, dim};
use crate::app::App;
use crate::catch_game::{Category, Phase, REWARD_THRESHOLD, SESSION_SECS};
use crate::i18n::tr;

const DROP: &str = "💧";
const BUG: &str = "🐞";
const BASKET: &str = "\\___/";

/// Maps a percentage onto a cell offset so that `symbol_width` cells fit.
fn cell_offset(percent: f64, span: u16, symbol_width: u16) -> u16 {
    let usable = span.saturating_sub(symbol_width);
    ((percent.clamp(0.0, 100.0) / 100.0) * usable as f64).round() as u16
}

pub fn render_game(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let game = &app.game;

    match game.phase() {
        Phase::Idle => {
            let lines = vec![
                Line::from(Span::styled(
                    tr(lang, "Catch the water drops!", "पानी की बूंदें पकड़ें!"),
                    bold().fg(Color::Cyan),
                )),
                Line::raw(""),
                Line::from(format!(
                    "{DROP} +10    {BUG} -5    {SESSION_SECS}s"
                )),
                Line::raw(""),
                Line::from(Span::styled(
                    tr(lang, "(enter) Play Now", "(enter) अभी खेलें"),
                    bold().fg(Color::Green),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::bordered())
                .render(area, buf);
        }
        Phase::Active => render_playfield(app, area, buf),
        Phase::Ended => {
            let summary = game.summary();
            let score = summary.map(|s| s.score).unwrap_or_default();
            let mut lines = vec![
                Line::from(Span::styled(
                    tr(lang, "Time's up!", "समय समाप्त!"),
                    bold().fg(Color::Cyan),
                )),
                Line::raw(""),
                Line::from(Span::styled(
                    format!("{} {}", tr(lang, "Score", "स्कोर"), score),
                    bold(),
                )),
            ];
            if let Some(stats) = summary.map(|s| s.stats) {
                lines.push(Line::from(Span::styled(
                    format!(
                        "{DROP} {}   {BUG} {}   {} {}",
                        stats.rewarding_caught,
                        stats.penalizing_caught,
                        tr(lang, "missed", "छूटे"),
                        stats.expired
                    ),
                    dim(),
                )));
            }
            lines.push(Line::raw(""));
            lines.push(match summary.and_then(|s| s.points_awarded) {
                Some(points) => Line::from(Span::styled(
                    format!("+{points} {}", tr(lang, "points earned!", "अंक मिले!")),
                    bold().fg(Color::Yellow),
                )),
                None => Line::from(Span::styled(
                    format!(
                        "{} {}",
                        tr(lang, "Score above", "अंक पाने के लिए"),
                        REWARD_THRESHOLD
                    ),
                    dim(),
                )),
            });
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                tr(lang, "(enter) Play Again", "(enter) फिर से खेलें"),
                bold().fg(Color::Green),
            )));
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::bordered())
                .render(area, buf);
        }
    }
}

fn render_playfield(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let game = &app.game;
    let [status, field] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("⏱ {}s", game.remaining_secs()),
            bold().fg(if game.remaining_secs() <= 5 {
                Color::Red
            } else {
                Color::White
            }),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} {}", tr(lang, "Score", "स्कोर"), game.score()),
            bold().fg(Color::Yellow),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(status, buf);

    let block = Block::bordered().border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(field);
    block.render(field, buf);
    if inner.width == 0 || inner.height < 2 {
        return;
    }

    // The bottom row holds the basket; objects fall through the rows above it
    let sky_height = inner.height - 1;
    for object in game.objects() {
        if !(0.0..=100.0).contains(&object.y) {
            continue;
        }
        let symbol = match object.category {
            Category::Rewarding => DROP,
            Category::Penalizing => BUG,
        };
        let width = symbol.width() as u16;
        let x = inner.x + cell_offset(object.x, inner.width, width);
        let y = inner.y + cell_offset(object.y, sky_height, 1);
        buf.set_string(x, y, symbol, Style::default());
    }

    let basket_width = BASKET.width() as u16;
    let x = inner.x + cell_offset(app.basket_x, inner.width, basket_width);
    buf.set_string(
        x,
        inner.y + sky_height,
        BASKET,
        bold().fg(Color::Yellow),
    );
}

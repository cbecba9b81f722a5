use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Widget, Wrap},
};

use super::{bold, dim};
use crate::app::{App, Screen, HOME_MENU};
use crate::i18n::{tr, Language};

fn menu_label(screen: Screen, lang: Language) -> &'static str {
    match screen {
        Screen::Learn => tr(lang, "Learn & earn points", "सीखें और अंक कमाएं"),
        Screen::Quiz => tr(lang, "Test Your Knowledge!", "अपने ज्ञान का परीक्षण करें!"),
        Screen::Game => tr(lang, "Mini game: Save the Water", "मिनी गेम: पानी बचाओ"),
        Screen::Diagnosis => tr(lang, "Diagnose a crop problem", "फसल की समस्या का निदान"),
        Screen::Home | Screen::Course => "",
    }
}

pub fn render_home(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let mut lines = vec![
        Line::from(Span::styled(
            tr(
                lang,
                "Grow smarter, one lesson at a time.",
                "हर पाठ के साथ बेहतर खेती करें।",
            ),
            dim(),
        )),
        Line::raw(""),
    ];
    lines.extend(HOME_MENU.iter().enumerate().map(|(idx, screen)| {
        let selected = idx == app.menu_index;
        let marker = if selected { "▶ " } else { "  " };
        let style = if selected {
            bold().fg(Color::Green)
        } else {
            Style::default()
        };
        Line::from(Span::styled(
            format!("{marker}{}", menu_label(*screen, lang)),
            style,
        ))
    }));

    Paragraph::new(lines)
        .block(Block::bordered())
        .render(area, buf);
}

pub fn render_learn(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let subjects = app.catalog.subjects();
    if subjects.is_empty() {
        return;
    }

    let rows = Layout::vertical(subjects.iter().map(|_| Constraint::Length(4)))
        .split(area);

    for ((idx, subject), row) in subjects.iter().enumerate().zip(rows.iter()) {
        let selected = idx == app.subject_index;
        let border_style = if selected {
            bold().fg(Color::Green)
        } else {
            dim()
        };
        let levels = (1..=subject.max_level.min(3))
            .map(|lvl| if lvl <= subject.level { "●" } else { "○" })
            .join(" ");
        let title = format!(
            "{} {}  {}",
            subject.icon,
            subject.title.get(lang),
            levels
        );
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(*row);
        block.render(*row, buf);

        let [text, gauge] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);
        Paragraph::new(subject.description.get(lang))
            .wrap(Wrap { trim: true })
            .render(text, buf);
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .percent(subject.progress.min(100))
            .label(format!(
                "{} {}/{}",
                tr(lang, "Level", "स्तर"),
                subject.level,
                subject.max_level
            ))
            .render(gauge, buf);
    }

    if area.height as usize > subjects.len() * 4 {
        let hint = Rect {
            y: area.y + (subjects.len() * 4) as u16,
            height: 1,
            ..area
        };
        Paragraph::new(Span::styled(
            tr(lang, "Win +50 points per course", "हर कोर्स पर +50 अंक जीतें"),
            dim(),
        ))
        .alignment(Alignment::Center)
        .render(hint, buf);
    }
}

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use super::{bold, dim};
use crate::app::App;
use crate::diagnosis::DeskState;
use crate::i18n::tr;

pub fn render_diagnosis(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let [input, output] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(3)]).areas(area);

    let symptoms = app.diagnosis.symptoms();
    let text = if symptoms.is_empty() {
        Line::from(Span::styled(
            tr(
                lang,
                "Describe what you see on the crop...",
                "फसल पर जो दिख रहा है उसका वर्णन करें...",
            ),
            dim(),
        ))
    } else {
        Line::from(vec![Span::raw(symptoms), Span::styled("▏", dim())])
    };
    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(tr(lang, " Symptoms ", " लक्षण ")))
        .render(input, buf);

    let lines = match app.diagnosis.state() {
        DeskState::Idle => vec![Line::from(Span::styled(
            tr(
                lang,
                "Press enter to diagnose.",
                "निदान के लिए enter दबाएं।",
            ),
            dim(),
        ))],
        DeskState::Analyzing => vec![Line::from(Span::styled(
            tr(lang, "Analyzing...", "विश्लेषण हो रहा है..."),
            bold().fg(Color::Cyan),
        ))],
        DeskState::Ready(result) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(result.name.get(lang).to_string(), bold().fg(Color::Red)),
                    Span::raw("  "),
                    Span::styled(
                        format!(
                            "{}% {}",
                            result.confidence,
                            tr(lang, "match", "मिलान")
                        ),
                        bold().fg(Color::Yellow),
                    ),
                ]),
                Line::raw(""),
                Line::from(Span::styled(
                    tr(lang, "Recommended treatment", "अनुशंसित उपचार"),
                    bold(),
                )),
            ];
            lines.extend(
                result
                    .treatment
                    .iter()
                    .enumerate()
                    .map(|(i, step)| Line::raw(format!("{}. {}", i + 1, step.get(lang)))),
            );
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                tr(
                    lang,
                    "This is an automated guess. Consult a local agronomist before treating.",
                    "यह एक स्वचालित अनुमान है। उपचार से पहले स्थानीय कृषि विशेषज्ञ से सलाह लें।",
                ),
                dim(),
            )));
            lines
        }
    };

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered())
        .render(output, buf);
}

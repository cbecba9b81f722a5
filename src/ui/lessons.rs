use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Widget, Wrap},
};

use super::{bold, dim};
use crate::app::App;
use crate::course::COMPLETION_POINTS;
use crate::i18n::tr;
use crate::progress::percent_complete;
use crate::quiz::MAX_TIER;

/// Filled and empty stars for a reward tier.
pub fn stars(tier: u32) -> String {
    (1..=MAX_TIER)
        .map(|i| if i <= tier { "★" } else { "☆" })
        .join(" ")
}

pub fn render_quiz(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let quiz = &app.quiz;

    if let Some(result) = quiz.result() {
        let headline = if result.celebrate {
            tr(lang, "Great harvest of knowledge!", "ज्ञान की शानदार फसल!")
        } else {
            tr(lang, "Keep learning, farmer!", "सीखते रहो, किसान!")
        };
        let lines = vec![
            Line::from(Span::styled(headline, bold().fg(Color::Green))),
            Line::raw(""),
            Line::from(Span::styled(
                format!("{} {}", tr(lang, "Score", "स्कोर"), result.score),
                bold(),
            )),
            Line::from(Span::styled(stars(result.tier), bold().fg(Color::Yellow))),
            Line::raw(""),
            Line::from(Span::styled(
                tr(lang, "(r) play again", "(r) फिर से खेलें"),
                dim(),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered())
            .render(area, buf);
        return;
    }

    let Some(question) = quiz.current_question() else {
        return;
    };
    let [status, gauge, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(area);

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!(
                "{} {}/{}",
                tr(lang, "Question", "प्रश्न"),
                quiz.current_index() + 1,
                quiz.len()
            ),
            bold(),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} {}", tr(lang, "Score", "स्कोर"), quiz.score()),
            bold().fg(Color::Yellow),
        ),
    ]))
    .render(status, buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent_complete(quiz.current_index(), quiz.len()))
        .label("")
        .render(gauge, buf);

    let feedback = quiz.current_feedback();
    let mut lines = vec![
        Line::from(Span::styled(question.payload.prompt.get(lang), bold())),
        Line::raw(""),
    ];
    for (idx, option) in question.payload.options.iter().enumerate() {
        let is_correct = idx == question.correct_answer;
        let (mark, style) = match feedback {
            None if idx == app.option_index => ("▶", bold().fg(Color::Cyan)),
            None => (" ", Style::default()),
            Some(_) if is_correct => ("✓", bold().fg(Color::Green)),
            Some(f) if f.selected == idx => ("✗", bold().fg(Color::Red)),
            Some(_) => (" ", dim()),
        };
        lines.push(Line::from(Span::styled(
            format!("{mark} {}. {}", idx + 1, option.get(lang)),
            style,
        )));
    }
    if let Some(f) = feedback {
        lines.push(Line::raw(""));
        lines.push(if f.correct {
            Line::from(Span::styled(
                tr(lang, "Correct! +10", "सही! +10"),
                bold().fg(Color::Green),
            ))
        } else {
            Line::from(Span::styled(
                tr(lang, "Not quite.", "सही नहीं।"),
                bold().fg(Color::Red),
            ))
        });
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered())
        .render(body, buf);
}

pub fn render_course(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let course = &app.course;
    let title = app
        .catalog
        .course(&app.course_id)
        .map(|c| c.title.get(lang).to_string())
        .unwrap_or_default();

    if course.is_completed() {
        let lines = vec![
            Line::from(Span::styled(
                tr(lang, "Course Completed!", "कोर्स पूरा हुआ!"),
                bold().fg(Color::Green),
            )),
            Line::raw(""),
            Line::from(match lang {
                crate::i18n::Language::English => format!(
                    "You've earned {COMPLETION_POINTS} points for mastering this topic."
                ),
                crate::i18n::Language::Hindi => format!(
                    "इस विषय में महारत हासिल करने के लिए आपने {COMPLETION_POINTS} अंक अर्जित किए हैं।"
                ),
            }),
            Line::raw(""),
            Line::from(Span::styled(
                tr(lang, "(esc) Back to Learning", "(esc) सीखने पर वापस जाएं"),
                dim(),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title))
            .render(area, buf);
        return;
    }

    let Some(chapter) = course.current_chapter() else {
        return;
    };
    let [status, gauge, body, actions] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    Paragraph::new(Line::from(vec![
        Span::styled(title, bold().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(
            format!(
                "{} {} / {}",
                tr(lang, "Chapter", "अध्याय"),
                course.current_index() + 1,
                course.len()
            ),
            bold(),
        ),
    ]))
    .render(status, buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent_complete(course.current_index() + 1, course.len()))
        .label("")
        .render(gauge, buf);

    let mut lines = vec![
        Line::from(Span::styled(chapter.title.get(lang), bold())),
        Line::from(Span::styled(
            format!(
                "{} {}",
                chapter.reading_minutes,
                tr(lang, "min read", "मिनट पढ़ें")
            ),
            dim(),
        )),
        Line::raw(""),
    ];
    lines.extend(chapter.body.get(lang).lines().map(Line::raw));
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered())
        .render(body, buf);

    let next = if course.is_last_chapter() {
        tr(lang, "Finish →", "समाप्त →")
    } else {
        tr(lang, "Next Chapter →", "अगला अध्याय →")
    };
    let previous = if course.current_index() == 0 {
        Span::styled(tr(lang, "← Previous", "← पिछला"), dim())
    } else {
        Span::raw(tr(lang, "← Previous", "← पिछला"))
    };
    Paragraph::new(Line::from(vec![
        previous,
        Span::raw("     "),
        Span::styled(next, bold().fg(Color::Green)),
    ]))
    .alignment(Alignment::Center)
    .render(actions, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::ui::test_support::*;

    #[test]
    fn stars_follow_tier() {
        assert_eq!(stars(0), "☆ ☆ ☆");
        assert_eq!(stars(2), "★ ★ ☆");
        assert_eq!(stars(3), "★ ★ ★");
    }

    #[test]
    fn quiz_shows_question_and_feedback() {
        let mut app = app_on(Screen::Quiz);
        let rendered = render_to_string(&app);
        assert!(rendered.contains("Question 1/3"));
        assert!(rendered.contains("Nitrogen deficiency"));

        app.quiz.submit(2);
        let rendered = render_to_string(&app);
        assert!(rendered.contains("✗ 3. White powdery spots"));
        assert!(rendered.contains("✓ 1. Yellowing"));
        assert!(rendered.contains("Not quite."));
    }

    #[test]
    fn quiz_result_shows_stars() {
        let mut app = app_on(Screen::Quiz);
        for answer in [0, 0, 1] {
            app.quiz.submit(answer);
            app.quiz.skip_delay();
        }
        let rendered = render_to_string(&app);

        assert!(rendered.contains("Score 30"));
        assert!(rendered.contains("★ ★ ★"));
    }

    #[test]
    fn course_shows_chapter_then_completion() {
        let mut app = app_on(Screen::Course);
        let rendered = render_to_string(&app);
        assert!(rendered.contains("Chapter 1 / 2"));
        assert!(rendered.contains("Understanding Soil pH"));
        assert!(rendered.contains("Next Chapter"));

        app.course.advance();
        assert!(render_to_string(&app).contains("Finish"));

        app.course.advance();
        let rendered = render_to_string(&app);
        assert!(rendered.contains("Course Completed!"));
        assert!(rendered.contains("50 points"));
    }
}

pub mod diagnosis;
pub mod game;
pub mod home;
pub mod lessons;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::{
    app::{App, Screen},
    celebration::ConfettiAnimation,
    i18n::tr,
};

const HORIZONTAL_MARGIN: u16 = 2;
const CONFETTI_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .horizontal_margin(HORIZONTAL_MARGIN)
        .areas(area);

        render_header(self, header, buf);

        match self.screen {
            Screen::Home => home::render_home(self, body, buf),
            Screen::Learn => home::render_learn(self, body, buf),
            Screen::Quiz => lessons::render_quiz(self, body, buf),
            Screen::Course => lessons::render_course(self, body, buf),
            Screen::Game => game::render_game(self, body, buf),
            Screen::Diagnosis => diagnosis::render_diagnosis(self, body, buf),
        }

        Paragraph::new(Span::styled(legend(self), dim()))
            .alignment(Alignment::Center)
            .render(footer, buf);

        if self.confetti.is_active() {
            render_confetti(&self.confetti, area, buf);
        }
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let lang = app.language;
    let title = match app.screen {
        Screen::Home => tr(lang, "FarmQuest", "फार्मक्वेस्ट"),
        Screen::Learn => tr(lang, "Learning Paths", "सीखने के रास्ते"),
        Screen::Quiz => tr(lang, "Daily Challenge", "दैनिक चुनौती"),
        Screen::Course => tr(lang, "Course", "कोर्स"),
        Screen::Game => tr(lang, "Save the Water", "पानी बचाओ"),
        Screen::Diagnosis => tr(lang, "Crop Doctor", "फसल डॉक्टर"),
    };
    let line = Line::from(vec![
        Span::styled(title, bold().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(
            format!("🪙 {}", app.points()),
            bold().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled(format!("[Tab] {}", lang.switch_label()), dim()),
    ]);
    Paragraph::new(line)
        .block(Block::bordered())
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn legend(app: &App) -> &'static str {
    let lang = app.language;
    match app.screen {
        Screen::Home => tr(
            lang,
            "(↑/↓) choose / (enter) open / (q) quit",
            "(↑/↓) चुनें / (enter) खोलें / (q) बाहर",
        ),
        Screen::Learn => tr(
            lang,
            "(enter) resume course / (q) quiz / (g) game / (esc) home",
            "(enter) कोर्स / (q) क्विज़ / (g) खेल / (esc) होम",
        ),
        Screen::Quiz => tr(
            lang,
            "(1-4) answer / (r)estart / (esc) home",
            "(1-4) उत्तर / (r) फिर से / (esc) होम",
        ),
        Screen::Course => tr(
            lang,
            "(←) previous / (→) next / (r)estart / (esc) home",
            "(←) पिछला / (→) अगला / (r) फिर से / (esc) होम",
        ),
        Screen::Game => tr(
            lang,
            "(←/→) move basket / (space) catch / (esc) home",
            "(←/→) टोकरी / (space) पकड़ें / (esc) होम",
        ),
        Screen::Diagnosis => tr(
            lang,
            "type symptoms / (enter) diagnose / (del) clear / (esc) home",
            "लक्षण लिखें / (enter) निदान / (del) साफ़ / (esc) होम",
        ),
    }
}

/// Draws confetti on top of whatever screen is showing
fn render_confetti(confetti: &ConfettiAnimation, area: Rect, buf: &mut Buffer) {
    for particle in &confetti.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = CONFETTI_COLORS[particle.color_index % CONFETTI_COLORS.len()];
        let life_left = 1.0 - particle.age / particle.max_age;
        let style = if life_left > 0.6 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if life_left > 0.25 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}

//! Headless application state.
//!
//! Owns one engine per screen plus the shared wallet, and translates key
//! presses and ticks into engine operations. Rendering lives in `ui`.

use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::{Catalog, Chapter, QuizCard, DEFAULT_COURSE};
use crate::catch_game::{GameSession, Phase};
use crate::celebration::ConfettiAnimation;
use crate::clock::TimeStep;
use crate::course::{AdvanceOutcome, CourseSession};
use crate::diagnosis::DiagnosisDesk;
use crate::error::CatalogError;
use crate::i18n::Language;
use crate::quiz::QuizSession;
use crate::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::rewards::{Celebration, Wallet};

/// Horizontal distance (in percent of the playfield) within which the
/// basket reaches a falling object.
pub const CATCH_REACH: f64 = 6.0;
pub const BASKET_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Home,
    Learn,
    Quiz,
    Course,
    Game,
    Diagnosis,
}

/// Entries of the home menu, in display order.
pub const HOME_MENU: [Screen; 4] = [Screen::Learn, Screen::Quiz, Screen::Game, Screen::Diagnosis];

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub language: Language,
    pub starting_points: u32,
    pub seed: Option<u64>,
    pub screen: Screen,
    pub course_id: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::English,
            starting_points: crate::rewards::STARTING_POINTS,
            seed: None,
            screen: Screen::Home,
            course_id: DEFAULT_COURSE.to_string(),
        }
    }
}

type DynRandom = Box<dyn RandomSource>;

fn random_source(seed: Option<u64>, stream: u64) -> DynRandom {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed.wrapping_add(stream))),
        None => Box::new(ThreadRandom),
    }
}

pub struct App {
    pub language: Language,
    pub screen: Screen,
    pub wallet: Rc<Wallet>,
    pub catalog: Catalog,
    pub menu_index: usize,
    pub subject_index: usize,
    pub quiz: QuizSession<QuizCard, Rc<Wallet>>,
    pub option_index: usize,
    pub course_id: String,
    pub course: CourseSession<Chapter, Rc<Wallet>>,
    pub game: GameSession<DynRandom, Rc<Wallet>>,
    /// Basket position in percent of playfield width.
    pub basket_x: f64,
    pub diagnosis: DiagnosisDesk<DynRandom>,
    pub confetti: ConfettiAnimation,
    pub viewport: (u16, u16),
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: AppSettings) -> Result<Self, CatalogError> {
        let catalog = Catalog::load()?;
        let wallet = Wallet::shared(settings.starting_points);

        let quiz = QuizSession::new(catalog.daily_quiz(), wallet.clone())?;
        let (course_id, course) = Self::build_course(&catalog, &settings.course_id, &wallet)?;
        let game = GameSession::new(random_source(settings.seed, 0), wallet.clone());
        let diagnosis =
            DiagnosisDesk::new(catalog.diagnoses().to_vec(), random_source(settings.seed, 1));

        log::info!(
            "app ready on {} screen, {} points, language {}",
            settings.screen,
            settings.starting_points,
            settings.language
        );

        Ok(Self {
            language: settings.language,
            screen: settings.screen,
            wallet,
            catalog,
            menu_index: 0,
            subject_index: 0,
            quiz,
            option_index: 0,
            course_id,
            course,
            game,
            basket_x: 50.0,
            diagnosis,
            confetti: ConfettiAnimation::new(),
            viewport: (80, 24),
            should_quit: false,
        })
    }

    fn build_course(
        catalog: &Catalog,
        id: &str,
        wallet: &Rc<Wallet>,
    ) -> Result<(String, CourseSession<Chapter, Rc<Wallet>>), CatalogError> {
        let course = catalog
            .course(id)
            .ok_or_else(|| CatalogError::UnknownCourse(id.to_string()))?;
        if course.id != id {
            log::warn!("unknown course {:?}, showing {:?}", id, course.id);
        }
        let session = CourseSession::new(course.chapters.clone(), wallet.clone())?;
        Ok((course.id.clone(), session))
    }

    pub fn points(&self) -> u32 {
        self.wallet.balance()
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
    }

    /// Switches screens, giving the target a fresh session like a page load.
    pub fn open(&mut self, screen: Screen) {
        if self.screen == Screen::Game && screen != Screen::Game {
            self.game.stop();
        }
        match screen {
            Screen::Quiz => {
                self.quiz.restart();
                self.option_index = 0;
            }
            Screen::Course => self.course.restart(),
            Screen::Diagnosis => self.diagnosis.clear(),
            Screen::Game => self.game.stop(),
            Screen::Home | Screen::Learn => {}
        }
        log::debug!("screen {} -> {}", self.screen, screen);
        self.screen = screen;
    }

    pub fn open_course(&mut self, id: &str) -> Result<(), CatalogError> {
        let (course_id, course) = Self::build_course(&self.catalog, id, &self.wallet)?;
        self.course_id = course_id;
        self.course = course;
        self.screen = Screen::Course;
        Ok(())
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.quiz.advance(elapsed);
        self.game.advance(elapsed);
        self.diagnosis.advance(elapsed);

        let mut signals = self.quiz.drain_celebrations();
        signals.extend(self.game.drain_celebrations());
        for signal in signals {
            self.celebrate(signal);
        }
        self.confetti.update(elapsed);
    }

    fn celebrate(&mut self, signal: Celebration) {
        let (width, height) = self.viewport;
        self.confetti.burst(signal, width, height);
    }

    /// Catches the lowest visible object within reach of the basket.
    pub fn catch_under_basket(&mut self) {
        let target = self
            .game
            .objects()
            .iter()
            .filter(|o| (o.x - self.basket_x).abs() <= CATCH_REACH && o.y >= 0.0)
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|o| o.id);
        if let Some(id) = target {
            self.game.catch(id);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => {
                if self.screen == Screen::Home {
                    self.should_quit = true;
                } else {
                    self.open(Screen::Home);
                }
                return;
            }
            KeyCode::Tab => {
                self.toggle_language();
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Home => self.on_home_key(key.code),
            Screen::Learn => self.on_learn_key(key.code),
            Screen::Quiz => self.on_quiz_key(key.code),
            Screen::Course => self.on_course_key(key.code),
            Screen::Game => self.on_game_key(key.code),
            Screen::Diagnosis => self.on_diagnosis_key(key.code),
        }
    }

    fn on_home_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
            KeyCode::Down => self.menu_index = (self.menu_index + 1).min(HOME_MENU.len() - 1),
            KeyCode::Enter => self.open(HOME_MENU[self.menu_index]),
            KeyCode::Char('l') => self.toggle_language(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn on_learn_key(&mut self, code: KeyCode) {
        let subjects = self.catalog.subjects().len();
        match code {
            KeyCode::Up => self.subject_index = self.subject_index.saturating_sub(1),
            KeyCode::Down => {
                self.subject_index = (self.subject_index + 1).min(subjects.saturating_sub(1))
            }
            KeyCode::Enter => {
                if let Some(subject) = self.catalog.subjects().get(self.subject_index) {
                    let id = subject.id.clone();
                    if let Err(err) = self.open_course(&id) {
                        log::warn!("cannot open course {}: {}", id, err);
                    }
                }
            }
            KeyCode::Char('q') => self.open(Screen::Quiz),
            KeyCode::Char('g') => self.open(Screen::Game),
            KeyCode::Char('l') => self.toggle_language(),
            _ => {}
        }
    }

    fn on_quiz_key(&mut self, code: KeyCode) {
        let options = self
            .quiz
            .current_question()
            .map(|q| q.payload.options.len())
            .unwrap_or(0);
        match code {
            KeyCode::Up => self.option_index = self.option_index.saturating_sub(1),
            KeyCode::Down => {
                self.option_index = (self.option_index + 1).min(options.saturating_sub(1))
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.submit_answer(self.option_index),
            KeyCode::Char(c @ '1'..='9') => {
                let choice = c as usize - '1' as usize;
                if choice < options {
                    self.option_index = choice;
                    self.submit_answer(choice);
                }
            }
            KeyCode::Char('r') => {
                self.quiz.restart();
                self.option_index = 0;
            }
            KeyCode::Char('l') => self.toggle_language(),
            _ => {}
        }
    }

    fn submit_answer(&mut self, choice: usize) {
        let before = self.quiz.current_index();
        self.quiz.submit(choice);
        if self.quiz.current_index() != before {
            self.option_index = 0;
        }
    }

    fn on_course_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('n') => {
                if self.course.advance() == AdvanceOutcome::Completed {
                    self.celebrate(Celebration::Small);
                }
            }
            KeyCode::Left | KeyCode::Char('p') => {
                self.course.previous();
            }
            KeyCode::Char('r') => self.course.restart(),
            KeyCode::Char('l') => self.toggle_language(),
            _ => {}
        }
    }

    fn on_game_key(&mut self, code: KeyCode) {
        match (self.game.phase(), code) {
            (Phase::Active, KeyCode::Left) => {
                self.basket_x = (self.basket_x - BASKET_STEP).max(0.0)
            }
            (Phase::Active, KeyCode::Right) => {
                self.basket_x = (self.basket_x + BASKET_STEP).min(100.0)
            }
            (Phase::Active, KeyCode::Char(' ')) => self.catch_under_basket(),
            (Phase::Idle | Phase::Ended, KeyCode::Enter | KeyCode::Char(' ')) => {
                self.basket_x = 50.0;
                self.game.start();
            }
            (Phase::Idle | Phase::Ended, KeyCode::Char('l')) => self.toggle_language(),
            _ => {}
        }
    }

    fn on_diagnosis_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                self.diagnosis.analyze();
            }
            KeyCode::Backspace => self.diagnosis.pop_symptom_char(),
            KeyCode::Delete => self.diagnosis.clear(),
            KeyCode::Char(c) => self.diagnosis.push_symptom_char(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catch_game::FallingObject;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(AppSettings {
            seed: Some(1),
            ..AppSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn home_menu_navigation_opens_screens() {
        let mut app = app();
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Quiz);

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Home);
        app.on_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.open(Screen::Diagnosis);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn tab_toggles_language_everywhere() {
        let mut app = app();
        app.open(Screen::Diagnosis);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.language, Language::Hindi);

        app.on_key(key(KeyCode::Char('l')));
        assert_eq!(app.language, Language::Hindi);
        assert_eq!(app.diagnosis.symptoms(), "l");
    }

    #[test]
    fn quiz_digits_submit_answers() {
        let mut app = app();
        app.open(Screen::Quiz);

        app.on_key(key(KeyCode::Char('1')));
        assert_eq!(app.quiz.score(), 10);
        app.on_key(key(KeyCode::Char('1')));
        assert_eq!(app.quiz.score(), 10);

        app.on_tick(Duration::from_millis(1500));
        assert_eq!(app.quiz.current_index(), 1);
        assert!(app.confetti.is_active());
    }

    #[test]
    fn learn_enter_opens_selected_course() {
        let mut app = app();
        app.open(Screen::Learn);
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Course);
        assert_eq!(app.course_id, "water");
        app.on_key(key(KeyCode::Enter));
        assert!(app.course.is_completed());
        assert_eq!(app.points(), 400);
    }

    #[test]
    fn basket_catches_lowest_object_in_reach() {
        let mut app = app();
        app.open(Screen::Game);
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.game.phase(), Phase::Active);

        app.on_tick(Duration::from_millis(2400));
        let objects: Vec<FallingObject> = app.game.objects().to_vec();
        let lowest = objects
            .iter()
            .filter(|o| o.y >= 0.0)
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .cloned()
            .unwrap();
        app.basket_x = lowest.x;
        app.on_key(key(KeyCode::Char(' ')));

        assert!(app.game.objects().iter().all(|o| o.id != lowest.id));
        assert_eq!(app.game.stats().rewarding_caught + app.game.stats().penalizing_caught, 1);
    }

    #[test]
    fn leaving_game_stops_it() {
        let mut app = app();
        app.open(Screen::Game);
        app.on_key(key(KeyCode::Enter));
        app.on_tick(Duration::from_secs(3));
        app.on_key(key(KeyCode::Esc));

        assert_eq!(app.game.phase(), Phase::Idle);
        assert_eq!(app.points(), crate::rewards::STARTING_POINTS);
    }

    #[test]
    fn unknown_course_falls_back() {
        let app = App::new(AppSettings {
            course_id: "beekeeping".into(),
            ..AppSettings::default()
        })
        .unwrap();
        assert_eq!(app.course_id, "soil");
    }
}

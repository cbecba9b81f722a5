use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use farmquest::{
    app::{App, AppSettings, Screen},
    catalog::DEFAULT_COURSE,
    config::{Config, ConfigStore, FileConfigStore},
    i18n::Language,
    logging::{init_logging, LoggingConfig},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// gamified farming lessons in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Learn farming one lesson at a time: daily quizzes, short courses, a water-catching mini game and a crop doctor. Every activity earns points."
)]
pub struct Cli {
    /// interface language (defaults to the saved setting)
    #[clap(short = 'l', long, value_enum)]
    lang: Option<LangArg>,

    /// points balance to start the session with
    #[clap(short = 'p', long)]
    points: Option<u32>,

    /// seed for reproducible games and diagnoses
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// screen to open on start
    #[clap(long, value_enum, default_value_t = StartScreen::Home)]
    screen: StartScreen,

    /// course to open when starting on the course screen
    #[clap(short = 'c', long, default_value = DEFAULT_COURSE)]
    course: String,

    /// log filter, e.g. "debug" or "farmquest::catch_game=trace"
    #[clap(long)]
    log_level: Option<String>,

    /// store the language, points and seed given here as the new defaults
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    En,
    Hi,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Language::English,
            LangArg::Hi => Language::Hindi,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StartScreen {
    Home,
    Learn,
    Quiz,
    Course,
    Game,
    Diagnosis,
}

impl From<StartScreen> for Screen {
    fn from(arg: StartScreen) -> Self {
        match arg {
            StartScreen::Home => Screen::Home,
            StartScreen::Learn => Screen::Learn,
            StartScreen::Quiz => Screen::Quiz,
            StartScreen::Course => Screen::Course,
            StartScreen::Game => Screen::Game,
            StartScreen::Diagnosis => Screen::Diagnosis,
        }
    }
}

impl Cli {
    /// Command line flags win over the stored config.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(lang) = self.lang {
            config.language = lang.into();
        }
        if let Some(points) = self.points {
            config.starting_points = points;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }

    fn to_settings(&self, config: &Config) -> AppSettings {
        AppSettings {
            language: config.language,
            starting_points: config.starting_points,
            seed: config.seed,
            screen: self.screen.into(),
            course_id: self.course.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log_level.clone(),
        ..LoggingConfig::default()
    });

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(cli.to_settings(&config))?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.tick_rate_ms.max(1)),
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    log::info!("session over with {} points", app.points());
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick_rate));

    let size = terminal.size()?;
    app.viewport = (size.width, size.height);
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        match runner.step() {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Resize => {
                let size = terminal.size()?;
                app.viewport = (size.width, size.height);
            }
            AppEvent::Tick(elapsed) => app.on_tick(elapsed),
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

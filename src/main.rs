use clap::{builder::NonEmptyStringValueParser, error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use quotype::{
    app::{App, Control},
    config::{RuntimeSettings, TICK_INTERVAL},
    logging,
    quotes::Quote,
    runtime::{AppEvent, AppEventSource, CountdownControl, CrosstermEventSource, FixedTicker, Runner, Ticker},
    ui,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// one-minute typing speed test: type a quote, get wpm, cpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A one-minute typing speed test. Press Enter, type the quote without backspace, and see your words per minute, characters per minute and accuracy. The last score is remembered between runs."
)]
pub struct Cli {
    /// type this text instead of a random quote
    #[clap(short = 'q', long, value_parser = NonEmptyStringValueParser::new())]
    quote: Option<String>,

    /// author shown under a custom quote
    #[clap(short = 'a', long, requires = "quote", value_parser = NonEmptyStringValueParser::new())]
    author: Option<String>,

    /// file that remembers the last score
    #[clap(long, conflicts_with = "no_score")]
    score_file: Option<PathBuf>,

    /// do not read or write the last score
    #[clap(long)]
    no_score: bool,

    /// write logs here instead of the state directory (level from RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn to_settings(&self) -> RuntimeSettings {
        RuntimeSettings {
            custom_quote: self.quote.as_ref().map(|text| {
                Quote::new(
                    text.clone(),
                    self.author.clone().unwrap_or_else(|| "Anonymous".to_string()),
                )
            }),
            score_path: self.score_file.clone(),
            no_score: self.no_score,
            log_path: self.log_file.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let settings = cli.to_settings();
    logging::init(settings.resolved_log_path().as_deref());

    let mut app = App::from_settings(&settings)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(TICK_INTERVAL));
    let result = start_tui(&mut terminal, &mut app, &mut runner);
    app.shutdown(&mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("quitting after error: {}", e);
    }
    result
}

fn start_tui<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => app.on_tick(runner),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key, runner) == Control::Quit {
                    break;
                }
            }
            AppEvent::Closed => break,
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    runner.cancel_countdown();
    Ok(())
}

use std::error::Error;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use webbrowser::Browser;

use crate::config::RuntimeSettings;
use crate::quotes::QuoteBook;
use crate::runtime::CountdownControl;
use crate::score::{open_store, ScoreStore};
use crate::session::{Effect, Msg, Phase, Session};

/// Reference shown in the tip line
pub const TIP_URL: &str = "https://en.wikipedia.org/wiki/Typing#Alphanumeric_entry";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    pub session: Session,
    /// Score read from the store when this session was built
    pub last_score: u32,
    /// The typing target has input focus
    pub focused: bool,
    book: QuoteBook,
    store: Box<dyn ScoreStore>,
}

impl App {
    pub fn new(book: QuoteBook, store: Box<dyn ScoreStore>) -> Self {
        let session = Session::new(book.pick());
        let last_score = store.load();
        Self {
            session,
            last_score,
            focused: false,
            book,
            store,
        }
    }

    pub fn from_settings(settings: &RuntimeSettings) -> Result<Self, Box<dyn Error>> {
        let book = match &settings.custom_quote {
            Some(quote) => QuoteBook::single(quote.clone()),
            None => QuoteBook::embedded()?,
        };
        let store = open_store(settings.resolved_score_path());
        Ok(Self::new(book, store))
    }

    /// Throw the finished attempt away and start over with a fresh quote
    pub fn reload<C: CountdownControl>(&mut self, timer: &mut C) {
        timer.cancel_countdown();
        self.session = Session::new(self.book.pick());
        self.last_score = self.store.load();
        self.focused = false;
        log::debug!("reloaded, last score {}", self.last_score);
    }

    pub fn on_key<C: CountdownControl>(&mut self, key: KeyEvent, timer: &mut C) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
            return Control::Quit;
        }

        match self.session.phase() {
            Phase::Idle => match key.code {
                KeyCode::Enter => self.dispatch(Msg::Start, timer),
                KeyCode::Char('i') => open_tip(),
                _ => {}
            },
            Phase::Running => match key.code {
                KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                    self.dispatch(Msg::Key(c), timer)
                }
                // navigation, function and modifier keys never reach the session
                _ => {}
            },
            Phase::Ended => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.reload(timer),
                KeyCode::Char('i') => open_tip(),
                _ => {}
            },
        }
        Control::Continue
    }

    pub fn on_tick<C: CountdownControl>(&mut self, timer: &mut C) {
        self.dispatch(Msg::Tick, timer);
    }

    /// Stop the countdown before the app goes away
    pub fn shutdown<C: CountdownControl>(&mut self, timer: &mut C) {
        timer.cancel_countdown();
    }

    fn dispatch<C: CountdownControl>(&mut self, msg: Msg, timer: &mut C) {
        let effects = self.session.update(msg);
        self.apply_effects(effects, timer);
    }

    fn apply_effects<C: CountdownControl>(&mut self, effects: Vec<Effect>, timer: &mut C) {
        for effect in effects {
            match effect {
                Effect::ArmCountdown => timer.arm_countdown(),
                Effect::CancelCountdown => timer.cancel_countdown(),
                Effect::FocusTarget => self.focused = true,
                Effect::SaveScore(wpm) => {
                    self.focused = false;
                    match self.store.save(wpm) {
                        Ok(()) => log::info!("saved score {}", wpm),
                        Err(e) => log::warn!("could not save score {}: {}", wpm, e),
                    }
                }
            }
        }
    }
}

fn open_tip() {
    if Browser::is_available() {
        if let Err(e) = webbrowser::open(TIP_URL) {
            log::warn!("could not open {}: {}", TIP_URL, e);
        }
    } else {
        log::debug!("no browser available for {}", TIP_URL);
    }
}

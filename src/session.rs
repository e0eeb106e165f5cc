use crate::config::{MAX_ERRORS, SESSION_SECS};
use crate::metrics::Metrics;
use crate::quotes::{is_allowed_key, Quote};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

/// Input fed into [`Session::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Start,
    Tick,
    Key(char),
}

/// Side effects requested by a transition, executed by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ArmCountdown,
    CancelCountdown,
    FocusTarget,
    SaveScore(u32),
}

/// One typed character as shown in the output panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub char: char,
    pub is_error: bool,
}

/// One timed attempt at a quote
#[derive(Debug, Clone)]
pub struct Session {
    quote: Quote,
    chars: Vec<char>,
    phase: Phase,
    remaining_secs: u32,
    cursor: usize,
    correct: u32,
    errors: u32,
    is_error: bool,
    output: Vec<Keystroke>,
    metrics: Metrics,
}

impl Session {
    pub fn new(quote: Quote) -> Self {
        let chars = quote.text.chars().collect();
        Self {
            quote,
            chars,
            phase: Phase::Idle,
            remaining_secs: SESSION_SECS,
            cursor: 0,
            correct: 0,
            errors: 0,
            is_error: false,
            output: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    /// Applies one message and returns the effects it asks for.
    /// Messages that make no sense in the current phase are dropped.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match (self.phase, msg) {
            (Phase::Idle, Msg::Start) => self.start(),
            (Phase::Running, Msg::Tick) => self.tick(),
            (Phase::Running, Msg::Key(c)) => self.handle_key(c),
            (phase, msg) => {
                log::debug!("ignoring {:?} in {:?}", msg, phase);
                Vec::new()
            }
        }
    }

    fn start(&mut self) -> Vec<Effect> {
        self.remaining_secs = SESSION_SECS;
        self.cursor = 0;
        self.correct = 0;
        self.errors = 0;
        self.is_error = false;
        self.output.clear();
        self.metrics = Metrics::default();
        self.phase = Phase::Running;
        log::info!("session started, {} chars by {}", self.chars.len(), self.quote.author);
        vec![Effect::ArmCountdown, Effect::FocusTarget]
    }

    fn tick(&mut self) -> Vec<Effect> {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.refresh_metrics();
        if self.remaining_secs == 0 {
            return self.end();
        }
        Vec::new()
    }

    fn handle_key(&mut self, c: char) -> Vec<Effect> {
        if self.expected_char() == Some(c) {
            self.cursor += 1;
            self.correct += 1;
            self.is_error = false;
            self.output.push(Keystroke {
                char: c,
                is_error: false,
            });
        } else if is_allowed_key(c) {
            self.errors += 1;
            self.is_error = true;
            self.output.push(Keystroke {
                char: c,
                is_error: true,
            });
        } else {
            return Vec::new();
        }

        self.refresh_metrics();
        if self.cursor == self.chars.len() || self.errors > MAX_ERRORS {
            return self.end();
        }
        Vec::new()
    }

    fn end(&mut self) -> Vec<Effect> {
        self.phase = Phase::Ended;
        log::info!(
            "session ended: {} wpm, {} cpm, {}% accuracy, {} errors, {}s left",
            self.metrics.wpm,
            self.metrics.cpm,
            self.metrics.accuracy,
            self.errors,
            self.remaining_secs
        );
        vec![Effect::CancelCountdown, Effect::SaveScore(self.metrics.wpm)]
    }

    fn refresh_metrics(&mut self) {
        if let Some(metrics) = Metrics::compute(self.correct, self.errors, self.elapsed_secs()) {
            self.metrics = metrics;
        }
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        SESSION_SECS - self.remaining_secs
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Set while the last allowed keystroke was a miss
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn output(&self) -> &[Keystroke] {
        &self.output
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn expected_char(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    /// The part of the quote not typed yet
    pub fn remaining_text(&self) -> String {
        self.chars[self.cursor..].iter().collect()
    }
}

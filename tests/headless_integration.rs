use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quotype::app::{App, Control};
use quotype::quotes::{Quote, QuoteBook};
use quotype::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use quotype::score::{FileScoreStore, MemoryScoreStore, ScoreStore};
use quotype::session::Phase;

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

/// Drive the app until the predicate holds or the step budget runs out
fn drive<F: Fn(&App) -> bool>(
    app: &mut App,
    runner: &mut Runner<TestEventSource, FixedTicker>,
    max_steps: u32,
    done: F,
) {
    for _ in 0..max_steps {
        match runner.step() {
            AppEvent::Tick => app.on_tick(runner),
            AppEvent::Resize => {}
            AppEvent::Key(k) => {
                if app.on_key(k, runner) == Control::Quit {
                    break;
                }
            }
            AppEvent::Closed => break,
        }
        if done(app) {
            break;
        }
    }
}

// Headless integration using the internal runtime without a TTY
#[test]
fn headless_typing_flow_completes() {
    let store = MemoryScoreStore::new();
    let mut app = App::new(
        QuoteBook::single(Quote::new("hi", "someone")),
        Box::new(store.clone()),
    );

    let (tx, rx) = mpsc::channel();
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let mut runner = Runner::new(TestEventSource::new(rx), ticker);

    tx.send(enter()).unwrap();
    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();

    drive(&mut app, &mut runner, 100, |app| {
        app.session.phase() == Phase::Ended
    });

    assert_eq!(app.session.phase(), Phase::Ended);
    assert_eq!(app.session.correct(), 2);
    assert!(!runner.countdown_armed());
    assert_eq!(store.stored(), Some(app.session.metrics().wpm));
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let store = MemoryScoreStore::new();
    let mut app = App::new(
        QuoteBook::single(Quote::new("a much longer quote than anyone types", "x")),
        Box::new(store.clone()),
    );

    let (tx, rx) = mpsc::channel();
    // one "second" per millisecond so the whole minute takes ~60ms
    let ticker = FixedTicker::new(Duration::from_millis(1));
    let mut runner = Runner::new(TestEventSource::new(rx), ticker);

    tx.send(enter()).unwrap();
    for c in "a much".chars() {
        tx.send(key(c)).unwrap();
    }

    drive(&mut app, &mut runner, 1_000, |app| {
        app.session.phase() == Phase::Ended
    });

    assert_eq!(app.session.phase(), Phase::Ended, "timed session should finish by timeout");
    assert_eq!(app.session.remaining_secs(), 0);
    assert_eq!(app.session.correct(), 6);
    // 6 chars in a minute: 6 cpm, 1 wpm
    assert_eq!(app.session.metrics().cpm, 6);
    assert_eq!(store.stored(), Some(1));
    assert!(!runner.countdown_armed());
}

#[test]
fn headless_error_abort_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.json");
    let mut app = App::new(
        QuoteBook::single(Quote::new("abc", "x")),
        Box::new(FileScoreStore::with_path(&path)),
    );
    assert_eq!(app.last_score, 0);

    let (tx, rx) = mpsc::channel();
    let ticker = FixedTicker::new(Duration::from_secs(60));
    let mut runner = Runner::new(TestEventSource::new(rx), ticker);

    tx.send(enter()).unwrap();
    for _ in 0..51 {
        tx.send(key('z')).unwrap();
    }

    drive(&mut app, &mut runner, 200, |app| {
        app.session.phase() == Phase::Ended
    });
    assert_eq!(app.session.phase(), Phase::Ended);
    assert_eq!(app.session.errors(), 51);
    assert_eq!(FileScoreStore::with_path(&path).load(), 0);
    assert!(path.exists());

    tx.send(key('r')).unwrap();
    drive(&mut app, &mut runner, 10, |app| app.session.phase() == Phase::Idle);
    assert_eq!(app.session.phase(), Phase::Idle);
    assert_eq!(app.session.errors(), 0);
}

#[test]
fn headless_score_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.json");
    let quote = Quote::new("go", "x");

    {
        let mut app = App::new(
            QuoteBook::single(quote.clone()),
            Box::new(FileScoreStore::with_path(&path)),
        );
        let (tx, rx) = mpsc::channel();
        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        tx.send(enter()).unwrap();
        drive(&mut app, &mut runner, 100, |app| app.session.elapsed_secs() >= 1);
        tx.send(key('g')).unwrap();
        tx.send(key('o')).unwrap();
        drive(&mut app, &mut runner, 100, |app| {
            app.session.phase() == Phase::Ended
        });
        assert_eq!(app.session.phase(), Phase::Ended);
    }

    let saved = FileScoreStore::with_path(&path).load();
    assert!(saved > 0);

    let app = App::new(
        QuoteBook::single(quote),
        Box::new(FileScoreStore::with_path(&path)),
    );
    assert_eq!(app.last_score, saved);
}

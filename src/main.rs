mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use diamond_quest::compute::{init_world, tick};
use diamond_quest::entities::{Cue, InputState, Mode, Session, World};
use diamond_quest::persist::{FileStore, Persistence, Snapshot};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Simultaneous-input tracking ───────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Sample the logical action state for this frame.
fn sample_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    InputState {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        jump: any_held(
            key_frame,
            &[
                KeyCode::Up,
                KeyCode::Char('w'),
                KeyCode::Char('W'),
                KeyCode::Char(' '),
            ],
            frame,
        ),
        punch: any_held(key_frame, &[KeyCode::Char('x'), KeyCode::Char('X')], frame),
        kick: any_held(key_frame, &[KeyCode::Char('z'), KeyCode::Char('Z')], frame),
    }
}

// ── Audio cue sink ────────────────────────────────────────────────────────────

/// Fire-and-forget terminal "audio": the heavyweight cues ring the bell,
/// the rest are dropped.  Never blocks the frame.
fn play_cues<W: Write>(out: &mut W, cues: &mut Vec<Cue>) {
    for cue in cues.drain(..) {
        if matches!(cue, Cue::Explosion | Cue::LifeLost) {
            let _ = out.write_all(b"\x07");
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    NewGame,
    Continue(Snapshot),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    saved: Option<&Snapshot>,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "◆  DIAMOND  QUEST  ◆";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("[1] New Game"))?;
    if let Some(snapshot) = saved {
        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(3)))?;
        out.queue(Print(format!(
            "[2] Continue  (Level {}, score {})",
            snapshot.level, snapshot.score
        )))?;
    }
    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(2)))?;
    out.queue(Print("[Q] Quit"))?;

    // Super-diamond legend
    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Super diamonds (grab them on high platforms):"))?;
    let legend: &[(&str, Color, &str)] = &[
        ("◈", Color::Blue, " Super Jump     - higher, floatier jumps"),
        ("◈", Color::Red, " Super Strength - double damage, shockwaves"),
        ("◈", Color::Yellow, " Invincibility  - no damage taken"),
    ];
    for (i, (symbol, color, text)) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(symbol))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*text))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 5))?;
    out.queue(Print("Collect diamonds, defeat every robot, beat the boss!"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::NewGame),
                KeyCode::Char('2') if saved.is_some() => {
                    return Ok(MenuResult::Continue(saved.unwrap().clone()));
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Name prompt for score submission ─────────────────────────────────────────

fn prompt_name<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Option<String>> {
    let (width, height) = terminal::size()?;
    let cy = height / 2;
    let mut name = String::new();

    loop {
        out.queue(cursor::MoveTo((width / 2).saturating_sub(15), cy + 3))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("Name: {:<20}", name)))?;
        out.flush()?;

        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter => {
                    let trimmed = name.trim();
                    return Ok(if trimmed.is_empty() {
                        Some("Anonymous".to_string())
                    } else {
                        Some(trimmed.to_string())
                    });
                }
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(c) if name.len() < 20 && !c.is_control() => {
                    name.push(c);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    world: &mut World,
    session: &mut Session,
    store: &mut FileStore,
) -> std::io::Result<bool> {
    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_saved_level = session.level;
    let mut score_submitted = false;
    // Transient notification line and its remaining frames
    let mut notice: Option<(String, u32)> = None;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Esc => {
                            session.mode = match session.mode {
                                Mode::Running => Mode::Paused,
                                Mode::Paused => Mode::Running,
                                other => other,
                            };
                        }
                        KeyCode::F(5) => {
                            let snapshot = Snapshot::capture(world, session);
                            notice = Some(match store.save(&snapshot) {
                                Ok(()) => ("Game saved".to_string(), 120),
                                Err(e) => (format!("Save failed: {:#}", e), 240),
                            });
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if matches!(session.mode, Mode::Win | Mode::GameOver) =>
                        {
                            return Ok(false);
                        }
                        KeyCode::Char('s') | KeyCode::Char('S')
                            if matches!(session.mode, Mode::Win | Mode::GameOver)
                                && !score_submitted =>
                        {
                            if let Some(name) = prompt_name(out, rx)? {
                                notice = Some(
                                    match store.submit_score(&name, session.score, session.level) {
                                        Ok(rank) => {
                                            score_submitted = true;
                                            (format!("Score submitted - rank #{}", rank), 240)
                                        }
                                        Err(e) => (format!("Submit failed: {:#}", e), 240),
                                    },
                                );
                            }
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Advance the simulation ────────────────────────────────────────────
        let input = sample_input(&key_frame, frame);
        tick(world, session, &input);
        play_cues(out, &mut world.cues);

        // Auto-save once the next level has been generated
        if session.level != last_saved_level && session.mode == Mode::Running {
            last_saved_level = session.level;
            let snapshot = Snapshot::capture(world, session);
            if let Err(e) = store.save(&snapshot) {
                notice = Some((format!("Auto-save failed: {:#}", e), 240));
            }
        }

        // ── Render ────────────────────────────────────────────────────────────
        if let Some((_, frames_left)) = notice.as_mut() {
            *frames_left = frames_left.saturating_sub(1);
        }
        notice = notice.filter(|(_, frames_left)| *frames_left > 0);
        display::render(out, world, session, notice.as_ref().map(|(t, _)| t.as_str()))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    // Category (a): a terminal we cannot drive is fatal to startup
    terminal::enable_raw_mode()
        .context("could not initialise the terminal (run from an interactive terminal and retry)")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut store = FileStore::new();

    loop {
        // Category (c): an unreadable save silently falls back to defaults
        let saved = store.load().ok().flatten();

        match show_menu(out, rx, saved.as_ref())? {
            MenuResult::Quit => break,
            MenuResult::NewGame => {
                let mut session = Session::new();
                let mut world = init_world(session.level);
                if game_loop(out, rx, &mut world, &mut session, &mut store)? {
                    break;
                }
            }
            MenuResult::Continue(snapshot) => {
                let mut session = Session::new();
                let mut world = init_world(snapshot.level);
                snapshot.apply(&mut world, &mut session);
                if game_loop(out, rx, &mut world, &mut session, &mut store)? {
                    break;
                }
            }
        }
    }
    Ok(())
}

//! Keyboard input for the frame loop.
//!
//! Key events arrive one at a time from `crossterm`; the game wants a
//! per-frame snapshot. `InputState` folds events into held direction keys
//! (continuous) and one-shot actions (edge-triggered), and `take_frame`
//! produces the `FrameInput` for the next update.

use crate::session::FrameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Without release events a direction counts as held this long after its
/// last press or auto-repeat.
pub const HOLD_WINDOW: Duration = Duration::from_millis(200);

/// Without release events auto-repeat arrives as plain presses, so a held
/// action key re-triggers only after this long without any action event.
/// A deliberate second tap inside the window is swallowed too.
pub const ACTION_REPEAT_WINDOW: Duration = Duration::from_millis(600);

/// What a key means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    /// Jump / restart.
    Action,
    Quit,
    /// Ctrl+C.
    Close,
    Other,
}

/// Map a key to its action (Left/A, Right/D, Space/Up/W, Q/Esc, Ctrl+C).
pub fn map_key(key: &KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return KeyAction::Close;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Right,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            KeyAction::Action
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::Other,
    }
}

/// One held direction key.
#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    last_seen: Option<Instant>,
}

impl HeldKey {
    fn press(&mut self, now: Instant) {
        self.last_seen = Some(now);
    }

    fn release(&mut self) {
        self.last_seen = None;
    }

    fn is_held(&self, now: Instant, release_events: bool) -> bool {
        match self.last_seen {
            Some(_) if release_events => true,
            Some(seen) => now.saturating_duration_since(seen) <= HOLD_WINDOW,
            None => false,
        }
    }
}

/// Accumulates key events between frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: HeldKey,
    right: HeldKey,
    action: bool,
    /// Last action key event, pressed or repeated.
    last_action: Option<Instant>,
    quit: bool,
    close: bool,
    /// The terminal reports key releases, so held keys stay down until released.
    release_events: bool,
}

impl InputState {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Default::default()
        }
    }

    /// Fold one key event into the pending state.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let action = map_key(&key);

        if key.kind == KeyEventKind::Release {
            match action {
                KeyAction::Left => self.left.release(),
                KeyAction::Right => self.right.release(),
                _ => {}
            }
            return;
        }

        match action {
            KeyAction::Left => self.left.press(now),
            KeyAction::Right => self.right.press(now),
            // Auto-repeat must not re-trigger edge actions
            KeyAction::Action if key.kind == KeyEventKind::Press => {
                if !self.is_action_repeat(now) {
                    self.action = true;
                }
                self.last_action = Some(now);
            }
            KeyAction::Quit if key.kind == KeyEventKind::Press => self.quit = true,
            KeyAction::Close => self.close = true,
            _ => {}
        }
    }

    /// A press that is really auto-repeat of a held action key.
    fn is_action_repeat(&self, now: Instant) -> bool {
        !self.release_events
            && self
                .last_action
                .is_some_and(|last| now.saturating_duration_since(last) < ACTION_REPEAT_WINDOW)
    }

    /// Snapshot for this frame. One-shot actions are consumed.
    pub fn take_frame(&mut self, now: Instant) -> FrameInput {
        let frame = FrameInput {
            move_left: self.left.is_held(now, self.release_events),
            move_right: self.right.is_held(now, self.release_events),
            action: self.action,
            quit: self.quit,
            close: self.close,
        };
        self.action = false;
        self.quit = false;
        self.close = false;
        frame
    }
}

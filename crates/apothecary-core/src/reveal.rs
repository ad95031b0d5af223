//! Speech-bubble reveal: pop in, type out, optionally auto-hide.
//!
//! An explicit state machine advanced by [`Reveal::tick`]. Starting a new
//! reveal supersedes the current one. Cancelling returns to `Idle`, whose
//! frame is always invisible, scale 0, no text; a cancelled reveal never
//! resumes on its own.

use crate::fixed::{Fixed64, Ticks};
use serde::{Deserialize, Serialize};

/// Timing for a reveal, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub pop_ticks: Ticks,
    pub ticks_per_char: Ticks,
    /// Hide this many ticks after the text is complete. `None` keeps it up.
    pub auto_hide: Option<Ticks>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            pop_ticks: 12,
            ticks_per_char: 2,
            auto_hide: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealPhase {
    #[default]
    Idle,
    Popping,
    Typing,
    Shown,
}

/// What the presentation layer should draw this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFrame {
    pub phase: RevealPhase,
    pub visible: bool,
    /// 0 -> 1 while popping, then 1.
    pub scale: Fixed64,
    /// Characters of the text to show.
    pub shown_chars: usize,
}

#[derive(Debug, Clone)]
pub struct Reveal {
    config: RevealConfig,
    phase: RevealPhase,
    elapsed: Ticks,
    text_len: usize,
}

impl Reveal {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            phase: RevealPhase::Idle,
            elapsed: 0,
            text_len: 0,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != RevealPhase::Idle
    }

    /// Begin revealing a text of `text_len` characters, replacing any
    /// reveal in progress.
    pub fn start(&mut self, text_len: usize) -> RevealFrame {
        if self.is_active() {
            tracing::trace!(phase = ?self.phase, "reveal superseded");
        }
        self.cancel();
        self.text_len = text_len;
        self.phase = RevealPhase::Popping;
        self.frame()
    }

    /// Stop immediately and go back to `Idle`.
    pub fn cancel(&mut self) -> RevealFrame {
        self.phase = RevealPhase::Idle;
        self.elapsed = 0;
        self.text_len = 0;
        self.frame()
    }

    /// Jump to the fully typed text.
    pub fn skip(&mut self) -> RevealFrame {
        if self.is_active() {
            self.phase = RevealPhase::Shown;
            self.elapsed = 0;
        }
        self.frame()
    }

    /// Advance by `dt` ticks, carrying leftover time into later phases.
    pub fn tick(&mut self, dt: Ticks) -> RevealFrame {
        let mut remaining = dt;
        loop {
            let span = match self.phase {
                RevealPhase::Idle => break,
                RevealPhase::Popping => self.config.pop_ticks,
                RevealPhase::Typing => self.typing_ticks(),
                RevealPhase::Shown => match self.config.auto_hide {
                    Some(hide) => hide,
                    None => break,
                },
            };
            let left = span.saturating_sub(self.elapsed);
            if remaining < left {
                self.elapsed += remaining;
                break;
            }
            remaining -= left;
            self.elapsed = 0;
            self.phase = match self.phase {
                RevealPhase::Popping => RevealPhase::Typing,
                RevealPhase::Typing => RevealPhase::Shown,
                _ => {
                    self.text_len = 0;
                    RevealPhase::Idle
                }
            };
        }
        self.frame()
    }

    pub fn frame(&self) -> RevealFrame {
        let (visible, scale, shown_chars) = match self.phase {
            RevealPhase::Idle => (false, Fixed64::ZERO, 0),
            RevealPhase::Popping => {
                (true, pop_scale(self.elapsed, self.config.pop_ticks), 0)
            }
            RevealPhase::Typing => {
                let chars = match self.config.ticks_per_char {
                    0 => self.text_len,
                    per => ((self.elapsed / per) as usize).min(self.text_len),
                };
                (true, Fixed64::ONE, chars)
            }
            RevealPhase::Shown => (true, Fixed64::ONE, self.text_len),
        };
        RevealFrame {
            phase: self.phase,
            visible,
            scale,
            shown_chars,
        }
    }

    fn typing_ticks(&self) -> Ticks {
        self.config
            .ticks_per_char
            .saturating_mul(self.text_len as Ticks)
    }
}

/// `elapsed / total` clamped to `[0, 1]`, computed on raw Q32.32 bits so
/// tick counts beyond the integer range still scale.
fn pop_scale(elapsed: Ticks, total: Ticks) -> Fixed64 {
    if total == 0 {
        return Fixed64::ONE;
    }
    let bits = ((elapsed.min(total) as u128) << Fixed64::FRAC_NBITS) / total as u128;
    Fixed64::from_bits(bits as i64)
}

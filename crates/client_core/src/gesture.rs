//! Swipe gesture recognition for a single displayed card.
//!
//! A [`GestureRecognizer`] turns raw pointer, touch and keyboard input into
//! exactly one [`Choice`]. The owner feeds it [`GestureInput`]s and reacts to
//! the returned [`GestureReaction`]. A commit is reported twice: first as
//! [`GestureReaction::Committing`] (start the exit animation), then, once the
//! host signals [`GestureInput::AnimationFinished`], as
//! [`GestureReaction::Committed`], which is the owner's cue to submit the
//! decision. After that the recognizer is retired and ignores all input.

use std::time::Duration;

use shared::domain::Choice;

/// Horizontal displacement a drag must exceed to count as a decision.
pub const SWIPE_THRESHOLD: f32 = 120.0;

/// Length of the fly-out animation between commit and owner notification.
pub const EXIT_ANIMATION: Duration = Duration::from_millis(250);

const FLY_OUT_DISTANCE: f32 = 1000.0;
const ROTATION_PER_UNIT: f32 = 0.05;
const OPACITY_FALLOFF: f32 = 600.0;
const MIN_DRAG_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { origin_x: f32, delta_x: f32 },
    /// Exit animation running. `release_delta` is the drag offset at release
    /// (zero for key and button commits).
    Committing { choice: Choice, release_delta: f32 },
    /// The owner has been notified; this instance accepts no further input.
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKey {
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    /// Mouse down or touch start.
    Start { x: f32 },
    Move { x: f32 },
    /// Mouse up or touch end.
    End,
    /// Pointer left the card, treated exactly like `End`.
    Leave,
    TouchCancel,
    Key(CardKey),
    /// One of the explicit Skip/Save controls.
    Button(Choice),
    AnimationFinished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureReaction {
    Ignored,
    DragStarted,
    /// The host must suppress its default scrolling while this is reported.
    Dragged { delta_x: f32 },
    SnappedBack,
    Committing(Choice),
    Committed(Choice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCursor {
    Default,
    Grab,
    Grabbing,
}

/// Presentation of a card derived from recognizer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisual {
    pub translate_x: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
    pub save_label_opacity: f32,
    pub skip_label_opacity: f32,
    pub cursor: CardCursor,
    /// Whether position changes should be eased rather than applied directly.
    pub animate: bool,
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    state: GestureState,
    threshold: f32,
    disabled: bool,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::with_threshold(SWIPE_THRESHOLD)
    }

    /// Non-finite thresholds fall back to [`SWIPE_THRESHOLD`].
    pub fn with_threshold(threshold: f32) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.abs()
        } else {
            SWIPE_THRESHOLD
        };
        Self {
            state: GestureState::Idle,
            threshold,
            disabled: false,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.state, GestureState::Committing { .. })
    }

    pub fn is_retired(&self) -> bool {
        self.state == GestureState::Retired
    }

    /// Current horizontal drag offset (the release offset while committing).
    pub fn delta_x(&self) -> f32 {
        match self.state {
            GestureState::Dragging { delta_x, .. } => delta_x,
            GestureState::Committing { release_delta, .. } => release_delta,
            GestureState::Idle | GestureState::Retired => 0.0,
        }
    }

    /// Blocks new gestures. An exit animation already running is unaffected.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn handle(&mut self, input: GestureInput) -> GestureReaction {
        match input {
            GestureInput::Start { x } => self.start(x),
            GestureInput::Move { x } => self.move_to(x),
            GestureInput::End | GestureInput::Leave | GestureInput::TouchCancel => self.end(),
            GestureInput::Key(key) => self.key(key),
            GestureInput::Button(choice) => self.press(choice),
            GestureInput::AnimationFinished => self.animation_finished(),
        }
    }

    pub fn start(&mut self, x: f32) -> GestureReaction {
        if self.disabled || self.state != GestureState::Idle {
            return GestureReaction::Ignored;
        }
        self.state = GestureState::Dragging {
            origin_x: x,
            delta_x: 0.0,
        };
        GestureReaction::DragStarted
    }

    pub fn move_to(&mut self, x: f32) -> GestureReaction {
        if self.disabled {
            return GestureReaction::Ignored;
        }
        match &mut self.state {
            GestureState::Dragging { origin_x, delta_x } => {
                *delta_x = x - *origin_x;
                GestureReaction::Dragged { delta_x: *delta_x }
            }
            _ => GestureReaction::Ignored,
        }
    }

    pub fn end(&mut self) -> GestureReaction {
        let GestureState::Dragging { delta_x, .. } = self.state else {
            return GestureReaction::Ignored;
        };

        if !self.disabled && delta_x.abs() > self.threshold {
            let choice = Choice::from_liked(delta_x > 0.0);
            self.state = GestureState::Committing {
                choice,
                release_delta: delta_x,
            };
            GestureReaction::Committing(choice)
        } else {
            self.state = GestureState::Idle;
            GestureReaction::SnappedBack
        }
    }

    pub fn key(&mut self, key: CardKey) -> GestureReaction {
        match key {
            CardKey::ArrowLeft => self.press(Choice::Skip),
            CardKey::ArrowRight => self.press(Choice::Save),
            CardKey::Other => GestureReaction::Ignored,
        }
    }

    pub fn press(&mut self, choice: Choice) -> GestureReaction {
        if self.disabled || self.state != GestureState::Idle {
            return GestureReaction::Ignored;
        }
        self.state = GestureState::Committing {
            choice,
            release_delta: 0.0,
        };
        GestureReaction::Committing(choice)
    }

    pub fn animation_finished(&mut self) -> GestureReaction {
        let GestureState::Committing { choice, .. } = self.state else {
            return GestureReaction::Ignored;
        };
        self.state = GestureState::Retired;
        GestureReaction::Committed(choice)
    }

    /// `exit_progress` is the fraction of [`EXIT_ANIMATION`] elapsed and only
    /// matters while committing.
    pub fn visual(&self, exit_progress: f32) -> CardVisual {
        let delta = self.delta_x();
        let (translate_x, opacity) = match self.state {
            GestureState::Committing {
                choice,
                release_delta,
            } => {
                let progress = exit_progress.clamp(0.0, 1.0);
                let target = if choice.liked() {
                    FLY_OUT_DISTANCE
                } else {
                    -FLY_OUT_DISTANCE
                };
                (
                    release_delta + (target - release_delta) * progress,
                    1.0 - progress,
                )
            }
            _ => (
                delta,
                (1.0 - delta.abs() / OPACITY_FALLOFF).max(MIN_DRAG_OPACITY),
            ),
        };

        let cursor = if self.disabled {
            CardCursor::Default
        } else if self.is_dragging() {
            CardCursor::Grabbing
        } else {
            CardCursor::Grab
        };

        CardVisual {
            translate_x,
            rotation_deg: translate_x * ROTATION_PER_UNIT,
            opacity,
            save_label_opacity: label_opacity(delta, self.threshold),
            skip_label_opacity: label_opacity(-delta, self.threshold),
            cursor,
            animate: !self.is_dragging(),
        }
    }
}

fn label_opacity(signed_delta: f32, threshold: f32) -> f32 {
    if signed_delta <= 0.0 || threshold <= 0.0 {
        return 0.0;
    }
    (signed_delta / threshold).min(1.0)
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;

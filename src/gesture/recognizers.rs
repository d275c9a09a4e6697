// SPDX-License-Identifier: GPL-3.0-only

//! The three competing recognizers
//!
//! A recognizer only answers "could this still be me?" for the events it is
//! shown. It never decides whether it wins; that is the arbiter's job.

use super::{GestureKind, GestureOutcome, PinchPhase, Point, PointerId, Pointers, TouchEvent, TouchPhase};
use crate::constants::gesture::{
    DOUBLE_TAP_SLOP, DOUBLE_TAP_TIMEOUT, MIN_PINCH_SPAN, TAP_TIMEOUT, TOUCH_SLOP,
};
use tokio::time::Instant;

/// Answer to a touch event during arbitration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Still undecided
    Possible,
    /// Cannot match anymore in this round
    Failed,
    /// Matched; fires once every higher-priority recognizer has failed
    Ready(GestureOutcome),
}

/// Answer to a touch event after the recognizer has won
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tracking {
    Continue(Option<GestureOutcome>),
    Finished(Option<GestureOutcome>),
}

pub trait Recognizer: Send {
    fn kind(&self) -> GestureKind;

    /// Forget everything; a new arbitration round starts
    fn reset(&mut self);

    /// A new touch sequence starts inside a running round.
    ///
    /// Returns true when the recognizer is eligible again even if it had
    /// failed on an earlier sequence of the same round.
    fn begin_sequence(&mut self) -> bool {
        false
    }

    fn on_touch(&mut self, event: &TouchEvent, pointers: &Pointers) -> Verdict;

    /// Time passed without input
    fn on_tick(&mut self, now: Instant) -> Verdict {
        match self.deadline() {
            Some(deadline) if now >= deadline => Verdict::Failed,
            _ => Verdict::Possible,
        }
    }

    /// Instant at which this recognizer fails unless more input arrives
    fn deadline(&self) -> Option<Instant>;

    /// Continuous recognizers keep receiving events after winning
    fn is_continuous(&self) -> bool {
        false
    }

    fn on_winning_touch(&mut self, _event: &TouchEvent, _pointers: &Pointers) -> Tracking {
        Tracking::Finished(None)
    }
}

// =============================================================================
// Pinch
// =============================================================================

#[derive(Debug, Default)]
enum PinchState {
    #[default]
    Idle,
    Tracking {
        first: PointerId,
        second: PointerId,
        initial_span: f32,
        last_scale: f32,
    },
}

/// Two-finger pinch. Activates the moment a second finger lands.
#[derive(Debug, Default)]
pub struct PinchRecognizer {
    state: PinchState,
}

impl PinchRecognizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recognizer for PinchRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
    }

    fn reset(&mut self) {
        self.state = PinchState::Idle;
    }

    fn begin_sequence(&mut self) -> bool {
        self.state = PinchState::Idle;
        true
    }

    fn on_touch(&mut self, event: &TouchEvent, pointers: &Pointers) -> Verdict {
        match event.phase {
            TouchPhase::Down if pointers.len() >= 2 => {
                let Some(((first, a), (second, b))) = pointers.first_two() else {
                    return Verdict::Possible;
                };
                self.state = PinchState::Tracking {
                    first,
                    second,
                    initial_span: a.distance(&b),
                    last_scale: 1.0,
                };
                Verdict::Ready(GestureOutcome::Pinch(PinchPhase::Began))
            }
            TouchPhase::Up | TouchPhase::Cancel if pointers.is_empty() => Verdict::Failed,
            _ => Verdict::Possible,
        }
    }

    fn deadline(&self) -> Option<Instant> {
        None
    }

    fn is_continuous(&self) -> bool {
        true
    }

    fn on_winning_touch(&mut self, event: &TouchEvent, pointers: &Pointers) -> Tracking {
        let PinchState::Tracking {
            first,
            second,
            initial_span,
            last_scale,
        } = &mut self.state
        else {
            return Tracking::Finished(None);
        };

        match event.phase {
            TouchPhase::Move => {
                let (Some(a), Some(b)) = (pointers.get(*first), pointers.get(*second)) else {
                    return Tracking::Continue(None);
                };
                if *initial_span < MIN_PINCH_SPAN {
                    return Tracking::Continue(None);
                }
                let scale = a.distance(&b) / *initial_span;
                if (scale - *last_scale).abs() <= f32::EPSILON {
                    return Tracking::Continue(None);
                }
                *last_scale = scale;
                Tracking::Continue(Some(GestureOutcome::Pinch(PinchPhase::Update(scale))))
            }
            TouchPhase::Up | TouchPhase::Cancel
                if !pointers.contains(*first) || !pointers.contains(*second) =>
            {
                self.state = PinchState::Idle;
                Tracking::Finished(Some(GestureOutcome::Pinch(PinchPhase::Ended)))
            }
            _ => Tracking::Continue(None),
        }
    }
}

// =============================================================================
// Double tap
// =============================================================================

#[derive(Debug, Default)]
enum DoubleTapState {
    #[default]
    WaitingFirst,
    FirstDown {
        at: Instant,
        position: Point,
    },
    WaitingSecond {
        first: Point,
        window_end: Instant,
    },
    SecondDown {
        first: Point,
        window_end: Instant,
        at: Instant,
        position: Point,
    },
}

/// Two taps whose releases fall within the double-tap window
#[derive(Debug, Default)]
pub struct DoubleTapRecognizer {
    state: DoubleTapState,
}

impl DoubleTapRecognizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recognizer for DoubleTapRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::DoubleTap
    }

    fn reset(&mut self) {
        self.state = DoubleTapState::WaitingFirst;
    }

    fn on_touch(&mut self, event: &TouchEvent, pointers: &Pointers) -> Verdict {
        if event.phase == TouchPhase::Cancel || pointers.len() > 1 {
            return Verdict::Failed;
        }

        match (&self.state, event.phase) {
            (DoubleTapState::WaitingFirst, TouchPhase::Down) => {
                self.state = DoubleTapState::FirstDown {
                    at: event.at,
                    position: event.position,
                };
                Verdict::Possible
            }
            (DoubleTapState::FirstDown { position, .. }, TouchPhase::Move) => {
                if event.position.distance(position) > TOUCH_SLOP {
                    Verdict::Failed
                } else {
                    Verdict::Possible
                }
            }
            (DoubleTapState::FirstDown { at, position }, TouchPhase::Up) => {
                if event.at.duration_since(*at) > TAP_TIMEOUT {
                    return Verdict::Failed;
                }
                self.state = DoubleTapState::WaitingSecond {
                    first: *position,
                    window_end: event.at + DOUBLE_TAP_TIMEOUT,
                };
                Verdict::Possible
            }
            (DoubleTapState::WaitingSecond { first, window_end }, TouchPhase::Down) => {
                if event.at > *window_end || event.position.distance(first) > DOUBLE_TAP_SLOP {
                    return Verdict::Failed;
                }
                self.state = DoubleTapState::SecondDown {
                    first: *first,
                    window_end: *window_end,
                    at: event.at,
                    position: event.position,
                };
                Verdict::Possible
            }
            (DoubleTapState::SecondDown { position, .. }, TouchPhase::Move) => {
                if event.position.distance(position) > TOUCH_SLOP {
                    Verdict::Failed
                } else {
                    Verdict::Possible
                }
            }
            (DoubleTapState::SecondDown { window_end, at, .. }, TouchPhase::Up) => {
                if event.at <= *window_end && event.at.duration_since(*at) <= TAP_TIMEOUT {
                    Verdict::Ready(GestureOutcome::DoubleTap)
                } else {
                    Verdict::Failed
                }
            }
            _ => Verdict::Possible,
        }
    }

    fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DoubleTapState::WaitingFirst => None,
            DoubleTapState::FirstDown { at, .. } => Some(*at + TAP_TIMEOUT),
            DoubleTapState::WaitingSecond { window_end, .. } => Some(*window_end),
            DoubleTapState::SecondDown { window_end, at, .. } => {
                Some((*window_end).min(*at + TAP_TIMEOUT))
            }
        }
    }
}

// =============================================================================
// Single tap
// =============================================================================

#[derive(Debug, Default)]
enum SingleTapState {
    #[default]
    Idle,
    Pressed {
        at: Instant,
        position: Point,
    },
    Released,
}

/// One short press and release without drifting past the touch slop
#[derive(Debug, Default)]
pub struct SingleTapRecognizer {
    state: SingleTapState,
}

impl SingleTapRecognizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recognizer for SingleTapRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::SingleTap
    }

    fn reset(&mut self) {
        self.state = SingleTapState::Idle;
    }

    fn on_touch(&mut self, event: &TouchEvent, pointers: &Pointers) -> Verdict {
        if event.phase == TouchPhase::Cancel || pointers.len() > 1 {
            return Verdict::Failed;
        }

        match (&self.state, event.phase) {
            (SingleTapState::Idle, TouchPhase::Down) => {
                self.state = SingleTapState::Pressed {
                    at: event.at,
                    position: event.position,
                };
                Verdict::Possible
            }
            (SingleTapState::Pressed { position, .. }, TouchPhase::Move) => {
                if event.position.distance(position) > TOUCH_SLOP {
                    Verdict::Failed
                } else {
                    Verdict::Possible
                }
            }
            (SingleTapState::Pressed { at, position }, TouchPhase::Up) => {
                if event.at.duration_since(*at) > TAP_TIMEOUT {
                    return Verdict::Failed;
                }
                let position = *position;
                self.state = SingleTapState::Released;
                Verdict::Ready(GestureOutcome::SingleTap(position))
            }
            _ => Verdict::Possible,
        }
    }

    fn deadline(&self) -> Option<Instant> {
        match &self.state {
            SingleTapState::Pressed { at, .. } => Some(*at + TAP_TIMEOUT),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn event(
        pointers: &mut Pointers,
        id: PointerId,
        phase: TouchPhase,
        x: f32,
        y: f32,
        at: Instant,
    ) -> TouchEvent {
        let event = TouchEvent::at(id, phase, Point::new(x, y), at);
        pointers.apply(&event);
        event
    }

    #[test]
    fn test_pinch_reports_relative_scale() {
        let t0 = Instant::now();
        let mut pointers = Pointers::default();
        let mut pinch = PinchRecognizer::new();

        let e = event(&mut pointers, 1, TouchPhase::Down, 100.0, 100.0, t0);
        assert_eq!(pinch.on_touch(&e, &pointers), Verdict::Possible);
        let e = event(&mut pointers, 2, TouchPhase::Down, 200.0, 100.0, t0);
        assert_eq!(
            pinch.on_touch(&e, &pointers),
            Verdict::Ready(GestureOutcome::Pinch(PinchPhase::Began))
        );

        let e = event(&mut pointers, 2, TouchPhase::Move, 300.0, 100.0, t0);
        assert_eq!(
            pinch.on_winning_touch(&e, &pointers),
            Tracking::Continue(Some(GestureOutcome::Pinch(PinchPhase::Update(2.0))))
        );

        let e = event(&mut pointers, 1, TouchPhase::Up, 100.0, 100.0, t0);
        assert_eq!(
            pinch.on_winning_touch(&e, &pointers),
            Tracking::Finished(Some(GestureOutcome::Pinch(PinchPhase::Ended)))
        );
    }

    #[test]
    fn test_pinch_fails_when_single_finger_lifts() {
        let t0 = Instant::now();
        let mut pointers = Pointers::default();
        let mut pinch = PinchRecognizer::new();

        let e = event(&mut pointers, 1, TouchPhase::Down, 10.0, 10.0, t0);
        pinch.on_touch(&e, &pointers);
        let e = event(&mut pointers, 1, TouchPhase::Up, 10.0, 10.0, t0);
        assert_eq!(pinch.on_touch(&e, &pointers), Verdict::Failed);
        assert!(pinch.begin_sequence());
    }

    #[test]
    fn test_single_tap_rejects_long_press() {
        let t0 = Instant::now();
        let mut pointers = Pointers::default();
        let mut tap = SingleTapRecognizer::new();

        let e = event(&mut pointers, 1, TouchPhase::Down, 10.0, 10.0, t0);
        tap.on_touch(&e, &pointers);
        assert_eq!(tap.deadline(), Some(t0 + TAP_TIMEOUT));

        let late = t0 + TAP_TIMEOUT + Duration::from_millis(1);
        let e = event(&mut pointers, 1, TouchPhase::Up, 10.0, 10.0, late);
        assert_eq!(tap.on_touch(&e, &pointers), Verdict::Failed);
    }

    #[test]
    fn test_single_tap_rejects_drag() {
        let t0 = Instant::now();
        let mut pointers = Pointers::default();
        let mut tap = SingleTapRecognizer::new();

        let e = event(&mut pointers, 1, TouchPhase::Down, 10.0, 10.0, t0);
        tap.on_touch(&e, &pointers);
        let e = event(&mut pointers, 1, TouchPhase::Move, 30.0, 10.0, t0);
        assert_eq!(tap.on_touch(&e, &pointers), Verdict::Failed);
    }

    #[test]
    fn test_double_tap_window_expires() {
        let t0 = Instant::now();
        let mut pointers = Pointers::default();
        let mut double = DoubleTapRecognizer::new();

        let e = event(&mut pointers, 1, TouchPhase::Down, 10.0, 10.0, t0);
        double.on_touch(&e, &pointers);
        let up = t0 + Duration::from_millis(50);
        let e = event(&mut pointers, 1, TouchPhase::Up, 10.0, 10.0, up);
        assert_eq!(double.on_touch(&e, &pointers), Verdict::Possible);

        assert_eq!(double.deadline(), Some(up + DOUBLE_TAP_TIMEOUT));
        assert_eq!(double.on_tick(up + Duration::from_millis(100)), Verdict::Possible);
        assert_eq!(double.on_tick(up + DOUBLE_TAP_TIMEOUT), Verdict::Failed);
    }

    #[test]
    fn test_double_tap_rejects_distant_second_tap() {
        let t0 = Instant::now();
        let mut pointers = Pointers::default();
        let mut double = DoubleTapRecognizer::new();

        let e = event(&mut pointers, 1, TouchPhase::Down, 10.0, 10.0, t0);
        double.on_touch(&e, &pointers);
        let e = event(&mut pointers, 1, TouchPhase::Up, 10.0, 10.0, t0);
        double.on_touch(&e, &pointers);
        let e = event(&mut pointers, 2, TouchPhase::Down, 300.0, 300.0, t0);
        assert_eq!(double.on_touch(&e, &pointers), Verdict::Failed);
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Touch gesture recognition
//!
//! Three recognizers compete for every touch sequence on the viewfinder:
//! pinch, double tap and single tap, in that priority order. The
//! [`GestureArbiter`] feeds each touch event to all of them and lets a
//! ready recognizer fire only after every higher-priority one has failed,
//! so each sequence produces at most one kind of outcome.
//!
//! The arbiter is pure state; [`input::InputContext`] hosts it on its own
//! task and forwards outcomes to the screen over a channel.

pub mod arbiter;
pub mod input;
pub mod recognizers;

pub use arbiter::GestureArbiter;
pub use input::{InputContext, TouchSender};
pub use recognizers::{
    DoubleTapRecognizer, PinchRecognizer, Recognizer, SingleTapRecognizer, Tracking, Verdict,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::time::Instant;

/// Position in viewfinder coordinates (logical px)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Identifier of one finger for the lifetime of its contact
pub type PointerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    /// The system took the touch away (incoming call, palm rejection)
    Cancel,
}

/// One raw touch sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub pointer: PointerId,
    pub phase: TouchPhase,
    pub position: Point,
    pub at: Instant,
}

impl TouchEvent {
    /// Event stamped with the current time
    pub fn now(pointer: PointerId, phase: TouchPhase, position: Point) -> Self {
        Self {
            pointer,
            phase,
            position,
            at: Instant::now(),
        }
    }

    pub fn at(pointer: PointerId, phase: TouchPhase, position: Point, at: Instant) -> Self {
        Self {
            pointer,
            phase,
            position,
            at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchPhase {
    Began,
    /// Finger span relative to the span at `Began`
    Update(f32),
    Ended,
}

/// What a resolved touch sequence means
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    Pinch(PinchPhase),
    DoubleTap,
    SingleTap(Point),
}

impl GestureOutcome {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureOutcome::Pinch(_) => GestureKind::Pinch,
            GestureOutcome::DoubleTap => GestureKind::DoubleTap,
            GestureOutcome::SingleTap(_) => GestureKind::SingleTap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Pinch,
    DoubleTap,
    SingleTap,
}

/// Fingers currently on the surface
#[derive(Debug, Clone, Default)]
pub struct Pointers {
    active: BTreeMap<PointerId, Point>,
}

impl Pointers {
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, pointer: PointerId) -> bool {
        self.active.contains_key(&pointer)
    }

    pub fn get(&self, pointer: PointerId) -> Option<Point> {
        self.active.get(&pointer).copied()
    }

    /// The two lowest pointer ids, which define the pinch span
    pub fn first_two(&self) -> Option<((PointerId, Point), (PointerId, Point))> {
        let mut iter = self.active.iter();
        let (a, pa) = iter.next()?;
        let (b, pb) = iter.next()?;
        Some(((*a, *pa), (*b, *pb)))
    }

    /// Apply an event; returns false for events about unknown fingers
    pub(crate) fn apply(&mut self, event: &TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Down => {
                self.active.insert(event.pointer, event.position);
                true
            }
            TouchPhase::Move => match self.active.get_mut(&event.pointer) {
                Some(position) => {
                    *position = event.position;
                    true
                }
                None => false,
            },
            TouchPhase::Up | TouchPhase::Cancel => self.active.remove(&event.pointer).is_some(),
        }
    }
}

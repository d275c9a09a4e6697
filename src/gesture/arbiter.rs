// SPDX-License-Identifier: GPL-3.0-only

//! Priority arbitration over competing recognizers
//!
//! Candidates are kept in priority order. During a round every candidate
//! that is still possible sees every event. A candidate that becomes ready
//! fires only once all candidates ahead of it have failed; when it fires the
//! rest are dropped for the remainder of the round. A round ends when its
//! winner is done (or everything failed) and no finger is on the surface.
//!
//! A round may span more than one touch sequence: a pending first tap keeps
//! the round open while the double-tap window runs. Once nothing that spans
//! sequences can still match, the earlier sequence is settled on its own and
//! the current sequence is replayed into a fresh round.

use super::recognizers::{
    DoubleTapRecognizer, PinchRecognizer, Recognizer, SingleTapRecognizer, Tracking, Verdict,
};
use super::{GestureKind, GestureOutcome, Pointers, TouchEvent, TouchPhase};
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Possible,
    Failed,
    Ready(GestureOutcome),
}

/// Which touch sequence of the round a candidate is judging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// The current sequence only
    Current,
    /// Earlier sequences and the current one (a double tap's second tap)
    Spanning,
    /// Matched an earlier sequence and waits for the spanning candidates
    Pending,
}

struct Candidate {
    recognizer: Box<dyn Recognizer>,
    status: Status,
    origin: Origin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Round {
    Idle,
    Arbitrating,
    Won { index: usize, finished: bool },
    Exhausted,
}

pub struct GestureArbiter {
    candidates: Vec<Candidate>,
    pointers: Pointers,
    round: Round,
    /// The round has seen more than one touch sequence
    carried: bool,
    /// Events of the current touch sequence
    sequence: Vec<TouchEvent>,
}

impl Default for GestureArbiter {
    /// Pinch, then double tap, then single tap
    fn default() -> Self {
        Self::new(vec![
            Box::new(PinchRecognizer::new()),
            Box::new(DoubleTapRecognizer::new()),
            Box::new(SingleTapRecognizer::new()),
        ])
    }
}

impl GestureArbiter {
    /// Build an arbiter from recognizers listed highest priority first
    pub fn new(recognizers: Vec<Box<dyn Recognizer>>) -> Self {
        Self {
            candidates: recognizers
                .into_iter()
                .map(|recognizer| Candidate {
                    recognizer,
                    status: Status::Possible,
                    origin: Origin::Current,
                })
                .collect(),
            pointers: Pointers::default(),
            round: Round::Idle,
            carried: false,
            sequence: Vec::new(),
        }
    }

    /// Recognizer kinds in priority order
    pub fn priorities(&self) -> Vec<GestureKind> {
        self.candidates.iter().map(|c| c.recognizer.kind()).collect()
    }

    /// Whether a round is open (fingers down or a decision pending)
    pub fn is_busy(&self) -> bool {
        self.round != Round::Idle
    }

    /// Feed one touch event, returning the outcomes it resolved
    pub fn handle(&mut self, event: TouchEvent) -> Vec<GestureOutcome> {
        // Expired windows must resolve before a new sequence is judged
        let mut outcomes = self.tick(event.at);

        let sequence_start = event.phase == TouchPhase::Down && self.pointers.is_empty();
        if !self.pointers.apply(&event) {
            debug!(pointer = event.pointer, phase = ?event.phase, "Ignoring event for unknown pointer");
            return outcomes;
        }

        if sequence_start {
            self.sequence.clear();
            match self.round {
                Round::Arbitrating => self.begin_sequence(),
                Round::Idle | Round::Exhausted | Round::Won { .. } => self.start_round(),
            }
        }
        self.sequence.push(event);

        outcomes.extend(self.process(&event));
        outcomes
    }

    /// Advance time without input
    pub fn tick(&mut self, now: Instant) -> Vec<GestureOutcome> {
        if self.round != Round::Arbitrating {
            return Vec::new();
        }
        for candidate in &mut self.candidates {
            if candidate.status == Status::Possible {
                candidate.status = verdict_status(candidate.recognizer.on_tick(now));
            }
        }
        self.decide()
    }

    /// Earliest instant at which `tick` could change anything
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.round != Round::Arbitrating {
            return None;
        }
        self.candidates
            .iter()
            .filter(|c| c.status == Status::Possible)
            .filter_map(|c| c.recognizer.deadline())
            .min()
    }

    /// Run one event (already applied to `pointers`) through the round
    fn process(&mut self, event: &TouchEvent) -> Vec<GestureOutcome> {
        let mut outcomes = Vec::new();
        match self.round {
            Round::Idle => {}
            Round::Won {
                index,
                finished: false,
            } => {
                match self.candidates[index]
                    .recognizer
                    .on_winning_touch(event, &self.pointers)
                {
                    Tracking::Continue(outcome) => outcomes.extend(outcome),
                    Tracking::Finished(outcome) => {
                        outcomes.extend(outcome);
                        self.round = Round::Won {
                            index,
                            finished: true,
                        };
                    }
                }
                self.close_if_released();
            }
            Round::Won { finished: true, .. } | Round::Exhausted => self.close_if_released(),
            Round::Arbitrating => {
                let cancelled = event.phase == TouchPhase::Cancel;
                for candidate in &mut self.candidates {
                    if candidate.status != Status::Possible {
                        continue;
                    }
                    candidate.status = if cancelled {
                        Status::Failed
                    } else {
                        verdict_status(candidate.recognizer.on_touch(event, &self.pointers))
                    };
                }
                outcomes.extend(self.decide());
            }
        }
        outcomes
    }

    fn start_round(&mut self) {
        for candidate in &mut self.candidates {
            candidate.recognizer.reset();
            candidate.status = Status::Possible;
            candidate.origin = Origin::Current;
        }
        self.carried = false;
        self.round = Round::Arbitrating;
    }

    fn begin_sequence(&mut self) {
        self.carried = true;
        for candidate in &mut self.candidates {
            candidate.origin = match candidate.status {
                Status::Possible => Origin::Spanning,
                Status::Ready(_) => Origin::Pending,
                Status::Failed => Origin::Current,
            };
            if candidate.status == Status::Failed && candidate.recognizer.begin_sequence() {
                candidate.status = Status::Possible;
            }
        }
    }

    fn decide(&mut self) -> Vec<GestureOutcome> {
        if self.earlier_sequences_settled() {
            self.settle_earlier_sequences()
        } else {
            self.resolve().into_iter().collect()
        }
    }

    /// Nothing spanning sequences can still match and nothing has matched
    /// the current sequence yet
    fn earlier_sequences_settled(&self) -> bool {
        self.carried
            && self.candidates.iter().all(|c| match c.origin {
                Origin::Spanning => c.status == Status::Failed,
                Origin::Current => !matches!(c.status, Status::Ready(_)),
                Origin::Pending => true,
            })
    }

    /// Fire what earlier sequences left pending, then judge the current
    /// sequence in a round of its own
    fn settle_earlier_sequences(&mut self) -> Vec<GestureOutcome> {
        let pending = self
            .candidates
            .iter()
            .find_map(|c| match (c.origin, c.status) {
                (Origin::Pending, Status::Ready(outcome)) => Some(outcome),
                _ => None,
            });
        debug!(?pending, "Earlier touch sequence settled");
        let mut outcomes: Vec<GestureOutcome> = pending.into_iter().collect();

        self.start_round();
        let events = std::mem::take(&mut self.sequence);
        self.pointers = Pointers::default();
        for event in &events {
            outcomes.extend(self.tick(event.at));
            self.pointers.apply(event);
            outcomes.extend(self.process(event));
        }
        self.sequence = events;
        outcomes
    }

    fn resolve(&mut self) -> Option<GestureOutcome> {
        let mut winner = None;
        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.status {
                Status::Failed => continue,
                Status::Possible => return None,
                Status::Ready(outcome) => {
                    winner = Some((index, outcome));
                    break;
                }
            }
        }

        let Some((index, outcome)) = winner else {
            debug!("All recognizers failed");
            self.round = Round::Exhausted;
            self.close_if_released();
            return None;
        };

        for (other, candidate) in self.candidates.iter_mut().enumerate() {
            if other != index {
                candidate.recognizer.reset();
                candidate.status = Status::Failed;
            }
        }

        let continuous = self.candidates[index].recognizer.is_continuous();
        debug!(winner = ?outcome.kind(), continuous, "Gesture recognized");
        self.round = Round::Won {
            index,
            finished: !continuous,
        };
        self.close_if_released();
        Some(outcome)
    }

    fn close_if_released(&mut self) {
        let settled = matches!(
            self.round,
            Round::Won { finished: true, .. } | Round::Exhausted
        );
        if settled && self.pointers.is_empty() {
            self.round = Round::Idle;
        }
    }
}

fn verdict_status(verdict: Verdict) -> Status {
    match verdict {
        Verdict::Possible => Status::Possible,
        Verdict::Failed => Status::Failed,
        Verdict::Ready(outcome) => Status::Ready(outcome),
    }
}

//! Scripted sensor and simulated clock shared by the unit tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::tracking_pipeline::common::error::NativeCode;
use crate::tracking_pipeline::source::{Clock, MultiFrame, Sensor, SensorPoll, SourceKind};

#[derive(Debug, Clone, Default)]
pub struct FakeFrame {
    pub color: Option<Vec<u8>>,
    pub depth: Option<Vec<u16>>,
}

impl FakeFrame {
    pub fn depth(samples: Vec<u16>) -> Self {
        Self {
            color: None,
            depth: Some(samples),
        }
    }

    pub fn color(bytes: Vec<u8>) -> Self {
        Self {
            color: Some(bytes),
            depth: None,
        }
    }

    /// Depth frame with every sample set to `value`.
    pub fn flat_depth(value: u16) -> Self {
        Self::depth(vec![value; SourceKind::Depth.buffer_len()])
    }
}

impl MultiFrame for FakeFrame {
    fn color_buffer(&self) -> Option<&[u8]> {
        self.color.as_deref()
    }

    fn depth_buffer(&self) -> Option<&[u16]> {
        self.depth.as_deref()
    }
}

pub enum Step {
    Frame(FakeFrame),
    Pending,
    Failed(NativeCode),
}

/// Replays a fixed script of polls, then reports `Pending` forever.
pub struct ScriptedSensor {
    script: VecDeque<Step>,
    polls: Rc<Cell<usize>>,
}

impl ScriptedSensor {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            script: script.into(),
            polls: Rc::new(Cell::new(0)),
        }
    }

    pub fn frames(frames: Vec<FakeFrame>) -> Self {
        Self::new(frames.into_iter().map(Step::Frame).collect())
    }

    pub fn poll_counter(&self) -> Rc<Cell<usize>> {
        self.polls.clone()
    }
}

impl Sensor for ScriptedSensor {
    type Frame = FakeFrame;

    fn acquire_latest(&mut self) -> SensorPoll<FakeFrame> {
        self.polls.set(self.polls.get() + 1);
        match self.script.pop_front() {
            Some(Step::Frame(frame)) => SensorPoll::Frame(frame),
            Some(Step::Failed(code)) => SensorPoll::Failed(code),
            Some(Step::Pending) | None => SensorPoll::Pending,
        }
    }
}

/// Simulated time: only advances when slept on, or by `tick` per `now()` read.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    tick: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::ticking(Duration::ZERO)
    }

    pub fn ticking(tick: Duration) -> Self {
        Self {
            now: Rc::new(Cell::new(Duration::ZERO)),
            tick,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.tick);
        now
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Per-frame breakdown of where processing time went.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add_step(&mut self, name: &'static str, duration: Duration) {
        self.steps.push(StepTiming { name, duration });
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every step recorded under `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        let mut found = None;
        for step in self.steps.iter().filter(|s| s.name == name) {
            *found.get_or_insert(Duration::ZERO) += step.duration;
        }
        found
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    /// One-line `name=1.234ms` listing, used by the verbose frame log.
    pub fn breakdown(&self) -> String {
        self.steps
            .iter()
            .map(|s| format!("{}={:.3}ms", s.name, s.duration.as_secs_f64() * 1000.0))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self) -> (&'static str, Duration) {
        (self.name, self.start.elapsed())
    }

    /// Stops the timer and appends the step to `timings`.
    pub fn record(self, timings: &mut PipelineTimings) {
        let (name, duration) = self.stop();
        timings.add_step(name, duration);
    }
}

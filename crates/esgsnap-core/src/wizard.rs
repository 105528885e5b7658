//! Step state for the guided assessment wizard.

pub const STEP_TITLES: &[&str] = &[
    "Company profile",
    "Energy & fuel usage",
    "Operations & facilities",
    "Workforce & governance",
    "Review & confirmation",
];

pub const TOTAL_STEPS: usize = STEP_TITLES.len();

/// Result of advancing the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    /// `next` was called on the final step.
    Finished,
}

/// Current wizard step, 1-based and always within `1..=TOTAL_STEPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard {
    step: usize,
}

impl Default for Wizard {
    fn default() -> Self {
        Self { step: 1 }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn title(&self) -> &'static str {
        STEP_TITLES[self.step - 1]
    }

    pub fn is_first(&self) -> bool {
        self.step == 1
    }

    pub fn is_last(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    pub fn next(&mut self) -> Advance {
        if self.is_last() {
            return Advance::Finished;
        }
        self.step = (self.step + 1).min(TOTAL_STEPS);
        Advance::Moved(self.step)
    }

    pub fn back(&mut self) -> usize {
        self.step = self.step.saturating_sub(1).max(1);
        self.step
    }

    pub fn progress_percent(&self) -> f64 {
        self.step as f64 / TOTAL_STEPS as f64 * 100.0
    }
}

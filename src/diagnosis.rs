//! Simulated crop diagnosis.
//!
//! There is no inference behind this: after a short "analysis" one of the
//! known diagnoses is picked at random.

use std::time::Duration;

use crate::catalog::Diagnosis;
use crate::clock::{Deferred, TimeStep};
use crate::random::RandomSource;

pub const ANALYSIS_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub enum DeskState {
    Idle,
    Analyzing,
    Ready(Diagnosis),
}

#[derive(Debug)]
pub struct DiagnosisDesk<R: RandomSource> {
    candidates: Vec<Diagnosis>,
    symptoms: String,
    analysis: Deferred,
    result: Option<Diagnosis>,
    rng: R,
}

impl<R: RandomSource> DiagnosisDesk<R> {
    pub fn new(candidates: Vec<Diagnosis>, rng: R) -> Self {
        Self {
            candidates,
            symptoms: String::new(),
            analysis: Deferred::idle(),
            result: None,
            rng,
        }
    }

    pub fn set_symptoms(&mut self, text: impl Into<String>) {
        self.symptoms = text.into();
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn push_symptom_char(&mut self, c: char) {
        self.symptoms.push(c);
    }

    pub fn pop_symptom_char(&mut self) {
        self.symptoms.pop();
    }

    /// Starts an analysis. Returns false if one is already running or there
    /// is nothing to choose from.
    pub fn analyze(&mut self) -> bool {
        if self.analysis.is_pending() || self.candidates.is_empty() {
            return false;
        }
        self.result = None;
        self.analysis = Deferred::new(ANALYSIS_DELAY);
        log::debug!("diagnosis started ({} chars of symptoms)", self.symptoms.len());
        true
    }

    /// Drops the current result and any analysis in flight.
    pub fn clear(&mut self) {
        self.analysis.cancel();
        self.result = None;
        self.symptoms.clear();
    }

    pub fn state(&self) -> DeskState {
        if self.analysis.is_pending() {
            DeskState::Analyzing
        } else if let Some(result) = &self.result {
            DeskState::Ready(result.clone())
        } else {
            DeskState::Idle
        }
    }

    pub fn result(&self) -> Option<&Diagnosis> {
        self.result.as_ref()
    }

    fn conclude(&mut self) {
        let idx = self.rng.pick_index(self.candidates.len());
        let picked = self.candidates[idx].clone();
        log::info!("diagnosis ready: {} ({}%)", picked.name.en, picked.confidence);
        self.result = Some(picked);
    }
}

impl<R: RandomSource> TimeStep for DiagnosisDesk<R> {
    fn advance(&mut self, elapsed: Duration) {
        if self.analysis.elapse(elapsed) {
            self.conclude();
        }
    }
}

//! In-memory collision events with labelled muon collections

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use zpeak_core::{Error, MuonCandidate, MuonSource, Result};

/// Run / luminosity-block / event number triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId {
    pub run: u32,
    pub lumi: u32,
    pub event: u64,
}

impl EventId {
    pub fn new(run: u32, lumi: u32, event: u64) -> Self {
        Self { run, lumi, event }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run {} lumi {} event {}", self.run, self.lumi, self.event)
    }
}

/// One collision event as handed over by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    collections: HashMap<String, Vec<MuonCandidate>>,
}

impl Event {
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            collections: HashMap::new(),
        }
    }

    /// Attach a muon collection under `label`
    pub fn with_muons(mut self, label: impl Into<String>, muons: Vec<MuonCandidate>) -> Self {
        self.insert_muons(label, muons);
        self
    }

    /// Attach or replace a muon collection
    pub fn insert_muons(&mut self, label: impl Into<String>, muons: Vec<MuonCandidate>) {
        self.collections.insert(label.into(), muons);
    }

    /// Labels of the attached collections, sorted
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

impl MuonSource for Event {
    fn muons(&self, label: &str) -> Result<&[MuonCandidate]> {
        self.collections
            .get(label)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::missing_input(label))
    }
}

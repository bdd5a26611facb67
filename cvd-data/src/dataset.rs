use crate::cleaning::clean_observations;
use cvd_owid::error::Result;
use cvd_owid::observation::{Observation, RawObservation};

/// The cleaned working table.
///
/// Built once per cache lifetime and never mutated afterwards; views only
/// read slices of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Parse and clean an OWID CSV body.
    pub fn from_csv(csv_body: &str) -> Result<Self> {
        let raw = RawObservation::parse_owid_csv(csv_body)?;
        Ok(Self::from_raw(raw))
    }

    /// Clean already-parsed rows.
    pub fn from_raw(raw: Vec<RawObservation>) -> Self {
        Self {
            observations: clean_observations(raw),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

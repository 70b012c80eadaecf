use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::models::{Need, Offer};

/// Errors that can occur while loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {kind} {id}: {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Offers and needs exported from the posting store
///
/// Every record is validated once on load; the engine trusts what it gets
/// from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub needs: Vec<Need>,
}

impl Dataset {
    /// Read and validate a JSON dataset file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_json(&raw)?;

        tracing::info!(
            "Loaded {} offers and {} needs from {}",
            dataset.offers.len(),
            dataset.needs.len(),
            path.as_ref().display()
        );

        Ok(dataset)
    }

    /// Parse and validate a JSON dataset
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(raw)?;
        dataset.validate_records()?;
        Ok(dataset)
    }

    fn validate_records(&self) -> Result<(), DatasetError> {
        for offer in &self.offers {
            offer.validate().map_err(|e| DatasetError::InvalidRecord {
                kind: "offer",
                id: offer.id.clone(),
                reason: e.to_string(),
            })?;
        }
        for need in &self.needs {
            need.validate().map_err(|e| DatasetError::InvalidRecord {
                kind: "need",
                id: need.id.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn offer(&self, id: &str) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.id == id)
    }

    pub fn need(&self, id: &str) -> Option<&Need> {
        self.needs.iter().find(|need| need.id == id)
    }

    pub fn require_offer(&self, id: &str) -> Result<&Offer, DatasetError> {
        self.offer(id)
            .ok_or_else(|| DatasetError::NotFound(format!("offer {}", id)))
    }

    pub fn require_need(&self, id: &str) -> Result<&Need, DatasetError> {
        self.need(id)
            .ok_or_else(|| DatasetError::NotFound(format!("need {}", id)))
    }
}

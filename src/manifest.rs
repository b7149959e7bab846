use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::{Card, GenerationReport};

const MANIFEST_VERSION: u8 = 1;

/// JSON record of a generated batch and the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchManifest {
    pub version: u8,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub seed: Option<u64>,
    pub requested: usize,
    pub max_attempts: usize,
    pub cards: Vec<Card>,
    /// SHA-256 over the card values, see [`fingerprint`].
    pub fingerprint: String,
}

impl BatchManifest {
    pub fn from_report(report: &GenerationReport, seed: Option<u64>) -> Self {
        let cards = report.batch.cards().to_vec();
        Self {
            version: MANIFEST_VERSION,
            created_at: Utc::now(),
            seed,
            requested: report.requested,
            max_attempts: report.max_attempts,
            fingerprint: fingerprint(&cards),
            cards,
        }
    }

    /// Read a manifest and check its fingerprint against the stored cards.
    pub fn load(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("failed to open manifest {}", path.display()))?;
        let manifest: BatchManifest = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        manifest
            .checked()
            .with_context(|| format!("invalid manifest {}", path.display()))
    }

    /// Parse a manifest held in memory, with the same checks as [`BatchManifest::load`].
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: BatchManifest =
            serde_json::from_str(json).context("failed to parse manifest")?;
        manifest.checked()
    }

    fn checked(self) -> Result<Self> {
        if self.version != MANIFEST_VERSION {
            return Err(anyhow!("unsupported manifest version {}", self.version));
        }
        let actual = fingerprint(&self.cards);
        if actual != self.fingerprint {
            return Err(anyhow!(
                "fingerprint mismatch (stored {}, computed {})",
                self.fingerprint,
                actual
            ));
        }
        Ok(self)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to write manifest {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("failed to serialize manifest")?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).context("failed to serialize manifest")?;
        json.push('\n');
        Ok(json)
    }
}

/// Hex SHA-256 of every card's values, row-major, card after card.
pub fn fingerprint(cards: &[Card]) -> String {
    let mut hasher = Sha256::new();
    for card in cards {
        let values: Vec<u8> = card.values().collect();
        hasher.update(&values);
    }
    let digest = hasher.finalize();
    format!("{digest:02x}")
}

//! Typed reference text, validated at the boundary.
//!
//! Surah payloads arrive in the alquran.cloud envelope shape. They are checked
//! once on the way in and converted to [`SurahText`], so nothing past this
//! module handles untyped JSON.

use std::fs;
use std::path::Path;
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

pub const SURAH_COUNT: u16 = 114;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: u16,
    pub status: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSurah {
    pub number: u16,
    pub name: String,
    #[serde(default)]
    pub english_name: String,
    pub number_of_ayahs: u16,
    pub ayahs: Vec<ApiAyah>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAyah {
    /// Position in the whole mushaf
    pub number: u32,
    pub number_in_surah: u16,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u16,
    pub global_number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahText {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    pub verses: Vec<Verse>,
}

impl SurahText {
    pub fn verse(&self, number: u16) -> Option<&Verse> {
        // Verses are validated to run 1..=n
        number.checked_sub(1).and_then(|idx| self.verses.get(idx as usize))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let envelope: ApiEnvelope<ApiSurah> = serde_json::from_str(json)?;
        Self::try_from(envelope)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading reference surah from {:?}", path.as_ref());
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl TryFrom<ApiEnvelope<ApiSurah>> for SurahText {
    type Error = Error;

    fn try_from(envelope: ApiEnvelope<ApiSurah>) -> Result<Self> {
        if envelope.code != 200 {
            return Err(Error::reference(format!(
                "Upstream returned code {} ({})", envelope.code, envelope.status
            )));
        }
        let surah = envelope.data
            .ok_or_else(|| Error::reference("Envelope has no data"))?;
        Self::try_from(surah)
    }
}

impl TryFrom<ApiSurah> for SurahText {
    type Error = Error;

    fn try_from(surah: ApiSurah) -> Result<Self> {
        if !(1..=SURAH_COUNT).contains(&surah.number) {
            return Err(Error::reference(format!(
                "Invalid surah number {} (must be between 1 and {})", surah.number, SURAH_COUNT
            )));
        }
        if surah.ayahs.is_empty() {
            return Err(Error::reference(format!("Surah {} has no ayahs", surah.number)));
        }
        if surah.ayahs.len() != surah.number_of_ayahs as usize {
            return Err(Error::reference(format!(
                "Surah {} declares {} ayahs but carries {}",
                surah.number, surah.number_of_ayahs, surah.ayahs.len()
            )));
        }

        let mut verses = Vec::with_capacity(surah.ayahs.len());
        for (idx, ayah) in surah.ayahs.into_iter().enumerate() {
            if ayah.number_in_surah as usize != idx + 1 {
                return Err(Error::reference(format!(
                    "Surah {}: expected ayah {} but found {}", surah.number, idx + 1, ayah.number_in_surah
                )));
            }
            verses.push(Verse {
                number: ayah.number_in_surah,
                global_number: ayah.number,
                text: ayah.text,
            });
        }

        debug!("Validated surah {} ({}) with {} verses", surah.number, surah.english_name, verses.len());

        Ok(Self {
            number: surah.number,
            name: surah.name,
            english_name: surah.english_name,
            verses,
        })
    }
}

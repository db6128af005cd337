//! Intake transcript types.

use serde::{Deserialize, Serialize};

/// Speaker of a transcript turn.
///
/// Fixture files use `医生`/`病人`; the English names are accepted too.
/// Anything else becomes `Other` and is never searched for keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// The clinician.
    #[serde(rename = "医生", alias = "doctor")]
    Doctor,
    /// The patient.
    #[serde(rename = "病人", alias = "patient")]
    Patient,
    /// Unknown speaker.
    #[default]
    #[serde(other)]
    Other,
}

/// One utterance in the intake conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    /// Who spoke.
    #[serde(default)]
    pub role: Role,
    /// What was said.
    #[serde(default)]
    pub text: String,
}

impl TranscriptTurn {
    /// Creates a doctor turn.
    pub fn doctor(text: impl Into<String>) -> Self {
        Self {
            role: Role::Doctor,
            text: text.into(),
        }
    }

    /// Creates a patient turn.
    pub fn patient(text: impl Into<String>) -> Self {
        Self {
            role: Role::Patient,
            text: text.into(),
        }
    }

    /// Returns true if the patient spoke this turn.
    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }
}

/// Concatenates every patient utterance, in order, separated by one space.
///
/// This is the corpus searched for missing-item keywords.
pub fn patient_text(transcript: &[TranscriptTurn]) -> String {
    transcript
        .iter()
        .filter(|turn| turn.is_patient())
        .map(|turn| turn.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

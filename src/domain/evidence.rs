//! Evidence payloads attached to outcome reports and disputes.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Outcome claimed by an evidence payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParsedOutcome {
    Yes,
    No,
    /// Free-form value, used for dispute counter-evidence.
    Value,
}

impl ParsedOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Value => "VALUE",
        }
    }
}

impl From<bool> for ParsedOutcome {
    fn from(outcome: bool) -> Self {
        if outcome {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// JSON document pinned to IPFS and referenced by an evidence URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceData {
    pub event_id: String,
    pub source_url: String,
    /// RFC 3339 timestamp of when the source was read.
    pub fetched_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
    pub parsed_outcome: ParsedOutcome,
    /// IPFS hash of a snapshot (screenshot, archived page).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
    pub notes: String,
}

impl EvidenceData {
    /// Build evidence from user input, stamped with the current time.
    pub fn new(
        event_id: impl Into<String>,
        source_url: impl Into<String>,
        raw_value: impl Into<String>,
        parsed_outcome: ParsedOutcome,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            source_url: source_url.into(),
            fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            raw_value: Some(raw_value.into()),
            parsed_outcome,
            snapshot: None,
            notes: notes.into(),
        }
    }

    /// Check the payload carries everything a reviewer needs.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEvidence`] describing the first problem.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.event_id.trim().is_empty() {
            return Err(DomainError::InvalidEvidence {
                reason: "eventId is required".into(),
            });
        }
        if self.source_url.trim().is_empty() {
            return Err(DomainError::InvalidEvidence {
                reason: "sourceUrl is required".into(),
            });
        }
        if self.fetched_at.trim().is_empty() {
            return Err(DomainError::InvalidEvidence {
                reason: "fetchedAt is required".into(),
            });
        }
        if self.raw_value.is_none() && self.snapshot.is_none() {
            return Err(DomainError::InvalidEvidence {
                reason: "either rawValue or snapshot must be present".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EvidenceData {
        EvidenceData::new(
            "0xabc",
            "https://www.espn.com/nba/game/_/gameId/1",
            "112-108",
            ParsedOutcome::Yes,
            "home team won",
        )
    }

    #[test]
    fn new_evidence_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn evidence_without_value_or_snapshot_is_rejected() {
        let mut evidence = sample();
        evidence.raw_value = None;
        assert!(evidence.validate().is_err());

        evidence.snapshot = Some("QmSnapshot".into());
        assert!(evidence.validate().is_ok());
    }

    #[test]
    fn evidence_serializes_camel_case_with_upper_outcome() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["eventId"], "0xabc");
        assert_eq!(json["parsedOutcome"], "YES");
        assert_eq!(json["rawValue"], "112-108");
        assert!(json.get("snapshot").is_none());
    }

    #[test]
    fn unknown_outcome_fails_to_deserialize() {
        let json = r#"{"eventId":"1","sourceUrl":"u","fetchedAt":"t","rawValue":"v","parsedOutcome":"MAYBE","notes":""}"#;
        assert!(serde_json::from_str::<EvidenceData>(json).is_err());
    }

    #[test]
    fn bool_maps_to_yes_no() {
        assert_eq!(ParsedOutcome::from(true), ParsedOutcome::Yes);
        assert_eq!(ParsedOutcome::from(false).as_str(), "NO");
    }
}

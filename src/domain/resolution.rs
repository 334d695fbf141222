//! Resolution state as tracked by the resolution manager contract.
//!
//! Transitions happen on-chain. The client only reads the state and
//! decides which actions to offer.

use std::fmt;

use alloy_primitives::Address;
use serde::Serialize;

use super::error::DomainError;

/// Resolution lifecycle: Pending → Reportable → Reported → Disputed → Resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionState {
    #[default]
    Pending,
    Reportable,
    Reported,
    Disputed,
    Resolved,
}

impl ResolutionState {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reportable => "Reportable",
            Self::Reported => "Reported",
            Self::Disputed => "Disputed",
            Self::Resolved => "Resolved",
        }
    }

    #[must_use]
    pub const fn can_report(&self) -> bool {
        matches!(self, Self::Reportable)
    }

    #[must_use]
    pub const fn can_dispute(&self) -> bool {
        matches!(self, Self::Reported)
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl TryFrom<u8> for ResolutionState {
    type Error = DomainError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Reportable),
            2 => Ok(Self::Reported),
            3 => Ok(Self::Disputed),
            4 => Ok(Self::Resolved),
            other => Err(DomainError::UnknownResolutionState(other)),
        }
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full resolution record for a market.
///
/// Optional fields are `None` when the contract returns zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionInfo {
    pub state: ResolutionState,
    pub reporter: Option<Address>,
    pub reported_outcome: Option<bool>,
    pub evidence_uri: Option<String>,
    pub disputer: Option<Address>,
    pub dispute_reason: Option<String>,
    pub final_outcome: Option<bool>,
    pub is_invalid: bool,
}

impl ResolutionInfo {
    /// Build from the raw tuple returned by `getResolution`.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` is outside the known enum.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        state: u8,
        reporter: Address,
        reported_outcome: bool,
        evidence_uri: String,
        disputer: Address,
        dispute_reason: String,
        final_outcome: bool,
        is_invalid: bool,
    ) -> Result<Self, DomainError> {
        let state = ResolutionState::try_from(state)?;
        let reported = !reporter.is_zero();
        Ok(Self {
            state,
            reporter: reported.then_some(reporter),
            reported_outcome: reported.then_some(reported_outcome),
            evidence_uri: (!evidence_uri.is_empty()).then_some(evidence_uri),
            disputer: (!disputer.is_zero()).then_some(disputer),
            dispute_reason: (!dispute_reason.is_empty()).then_some(dispute_reason),
            final_outcome: state.is_resolved().then_some(final_outcome),
            is_invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_map_in_order() {
        let states: Vec<_> = (0u8..5)
            .map(|raw| ResolutionState::try_from(raw).unwrap())
            .collect();
        assert_eq!(
            states,
            vec![
                ResolutionState::Pending,
                ResolutionState::Reportable,
                ResolutionState::Reported,
                ResolutionState::Disputed,
                ResolutionState::Resolved,
            ]
        );
    }

    #[test]
    fn unknown_raw_value_is_rejected() {
        assert_eq!(
            ResolutionState::try_from(9),
            Err(DomainError::UnknownResolutionState(9))
        );
    }

    #[test]
    fn only_reportable_can_be_reported() {
        assert!(ResolutionState::Reportable.can_report());
        assert!(!ResolutionState::Reported.can_report());
        assert!(ResolutionState::Reported.can_dispute());
        assert!(!ResolutionState::Disputed.can_dispute());
        assert!(ResolutionState::Resolved.is_resolved());
    }

    #[test]
    fn from_raw_hides_zero_values() {
        let info = ResolutionInfo::from_raw(
            1,
            Address::ZERO,
            false,
            String::new(),
            Address::ZERO,
            String::new(),
            false,
            false,
        )
        .unwrap();
        assert_eq!(info.state, ResolutionState::Reportable);
        assert!(info.reporter.is_none());
        assert!(info.reported_outcome.is_none());
        assert!(info.evidence_uri.is_none());
        assert!(info.final_outcome.is_none());
    }

    #[test]
    fn from_raw_keeps_reported_fields() {
        let reporter = Address::repeat_byte(0x11);
        let info = ResolutionInfo::from_raw(
            4,
            reporter,
            true,
            "ipfs://QmEvidence".into(),
            Address::ZERO,
            String::new(),
            true,
            false,
        )
        .unwrap();
        assert_eq!(info.reporter, Some(reporter));
        assert_eq!(info.reported_outcome, Some(true));
        assert_eq!(info.final_outcome, Some(true));
        assert_eq!(info.state.label(), "Resolved");
    }
}

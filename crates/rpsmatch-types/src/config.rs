//! Configuration types for an RpsMatch engine instance.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Result, RpsError, constants};

/// Instance context bound into every signed move digest.
///
/// Two engines with different domains never accept each other's signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    /// Address of the deployment the signatures are meant for.
    pub verifying_contract: AccountId,
}

impl SigningDomain {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: AccountId,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }
}

impl Default for SigningDomain {
    fn default() -> Self {
        Self::new(
            constants::DEFAULT_DOMAIN_NAME,
            constants::DEFAULT_DOMAIN_VERSION,
            constants::DEFAULT_CHAIN_ID,
            AccountId::NULL,
        )
    }
}

/// Configuration for a match engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Typed-data domain for signature-authorized settlement.
    pub domain: SigningDomain,
    /// Smallest bet accepted on either settlement path.
    pub min_bet: u64,
    /// Maximum journal entries kept in memory.
    pub event_journal_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            domain: SigningDomain::default(),
            min_bet: constants::DEFAULT_MIN_BET,
            event_journal_capacity: constants::DEFAULT_EVENT_JOURNAL_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns `Configuration` on malformed JSON or invalid values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `Configuration` if a value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.min_bet == 0 {
            return Err(RpsError::Configuration("min_bet must be > 0".into()));
        }
        if self.event_journal_capacity == 0 {
            return Err(RpsError::Configuration(
                "event_journal_capacity must be > 0".into(),
            ));
        }
        if self.domain.name.is_empty() {
            return Err(RpsError::Configuration("domain.name must be set".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.min_bet, 1);
        assert_eq!(cfg.domain.name, "RpsMatch");
    }

    #[test]
    fn partial_json_takes_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{"min_bet": 5}"#).unwrap();
        assert_eq!(cfg.min_bet, 5);
        assert_eq!(cfg.event_journal_capacity, 10_000);
        assert_eq!(cfg.domain, SigningDomain::default());
    }

    #[test]
    fn zero_min_bet_rejected() {
        let err = EngineConfig::from_json_str(r#"{"min_bet": 0}"#).unwrap_err();
        assert!(matches!(err, RpsError::Configuration(_)));
    }

    #[test]
    fn malformed_json_rejected() {
        let err = EngineConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, RpsError::Configuration(_)));
    }

    #[test]
    fn config_serde_roundtrip() {
        let mut cfg = EngineConfig::default();
        cfg.domain.chain_id = 31337;
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), cfg);
    }
}

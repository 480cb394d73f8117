//! Integration tests for match codes
//!
//! These tests verify the complete code lifecycle: issue, validate,
//! consume, expiry and tamper detection.

#[cfg(test)]
mod match_code_tests {
    use chrono::{TimeDelta, Utc};
    use courtside::security::{
        CODE_TTL_MINUTES, CodeValidationError, MatchCodeRegistry, MatchCodeService,
    };

    fn players() -> Vec<String> {
        vec!["player-b".to_string(), "player-a".to_string()]
    }

    #[test]
    fn test_validate_then_consume_once() {
        let mut registry = MatchCodeRegistry::new();
        let issued = registry
            .issue("match-7", &players(), Some("court-2"), "summer-open")
            .unwrap();

        let payload = registry.validate(&issued.code).unwrap();
        assert_eq!(payload.match_id, "match-7");
        assert_eq!(payload.court_id.as_deref(), Some("court-2"));

        // validation does not consume
        assert!(registry.validate(&issued.code).is_ok());

        registry.consume(&issued.code).unwrap();
        assert_eq!(
            registry.validate(&issued.code),
            Err(CodeValidationError::AlreadyUsed)
        );
        assert_eq!(
            registry.consume(&issued.code),
            Err(CodeValidationError::AlreadyUsed)
        );

        let stats = registry.statistics();
        assert_eq!(stats.active_codes, 0);
        assert_eq!(stats.used_codes, 1);
        assert_eq!(stats.expiry_minutes, CODE_TTL_MINUTES);
    }

    #[test]
    fn test_expired_code_is_evicted() {
        let mut registry = MatchCodeRegistry::new();
        let now = Utc::now();
        let issued = registry
            .issue_at("match-1", &players(), None, "t", now)
            .unwrap();

        let just_before = now + TimeDelta::minutes(CODE_TTL_MINUTES);
        assert!(registry.validate_at(&issued.code, just_before).is_ok());

        let after = now + TimeDelta::minutes(CODE_TTL_MINUTES) + TimeDelta::seconds(1);
        assert_eq!(
            registry.validate_at(&issued.code, after),
            Err(CodeValidationError::Expired)
        );
        // evicted on sight: now simply unknown
        assert_eq!(
            registry.validate_at(&issued.code, after),
            Err(CodeValidationError::UnknownCode)
        );
        assert_eq!(
            registry.consume_at(&issued.code, after),
            Err(CodeValidationError::UnknownCode)
        );
    }

    #[test]
    fn test_tampered_payload_fails_integrity() {
        let mut registry = MatchCodeRegistry::new();
        let issued = registry
            .issue("match-3", &players(), Some("court-1"), "t")
            .unwrap();

        let mut tampered = registry.payload(&issued.code).unwrap().clone();
        tampered.court_id = Some("court-9".to_string());
        registry.restore(issued.code.clone(), tampered);

        assert_eq!(
            registry.validate(&issued.code),
            Err(CodeValidationError::IntegrityCheckFailed)
        );

        // restoring the genuine payload makes it valid again
        registry.restore(issued.code.clone(), issued.payload.clone());
        assert!(registry.validate(&issued.code).is_ok());
    }

    #[test]
    fn test_forged_digest_fails_integrity() {
        let mut registry = MatchCodeRegistry::new();
        let issued = registry.issue("match-4", &players(), None, "t").unwrap();

        let (base, _) = issued.code.split_once('-').unwrap();
        let forged = format!("{base}-{}", "0".repeat(16));
        registry.restore(forged.clone(), issued.payload.clone());

        assert_eq!(
            registry.validate(&forged),
            Err(CodeValidationError::IntegrityCheckFailed)
        );
        assert_eq!(
            registry.validate(&forged).unwrap_err().client_message(),
            "Invalid or expired code"
        );
    }

    #[test]
    fn test_malformed_codes() {
        let mut registry = MatchCodeRegistry::new();
        for code in ["nodash", "abc-def", "-", "ABC-0123456789abcdef"] {
            assert_eq!(
                registry.validate(code),
                Err(CodeValidationError::InvalidFormat),
                "{code}"
            );
        }
        assert_eq!(registry.validate(""), Err(CodeValidationError::MissingCode));
    }

    #[test]
    fn test_codes_are_unique() {
        let mut registry = MatchCodeRegistry::new();
        let first = registry.issue("m", &players(), None, "t").unwrap();
        let second = registry.issue("m", &players(), None, "t").unwrap();
        assert_ne!(first.code, second.code);
        assert_eq!(registry.statistics().active_codes, 2);
    }

    #[tokio::test]
    async fn test_service_lifecycle() {
        let service = MatchCodeService::new();
        let issued = service
            .issue("match-9", &players(), Some("court-1"), "t")
            .await
            .unwrap();

        assert!(service.validate(&issued.code).await.is_ok());
        assert!(service.consume(&issued.code).await.is_ok());
        assert_eq!(
            service.validate(&issued.code).await,
            Err(CodeValidationError::AlreadyUsed)
        );

        let later = Utc::now() + TimeDelta::minutes(CODE_TTL_MINUTES * 2);
        let stale = service.issue("match-10", &players(), None, "t").await.unwrap();
        assert_eq!(
            service.validate_at(&stale.code, later).await,
            Err(CodeValidationError::Expired)
        );
        assert_eq!(service.sweep_expired().await, 0);
        assert_eq!(service.statistics().await.used_codes, 1);
    }

    #[tokio::test]
    async fn test_service_rejects_empty_issue() {
        let service = MatchCodeService::new();
        assert!(service.issue("", &players(), None, "t").await.is_err());
        assert!(service.issue("m", &[], None, "t").await.is_err());
    }
}

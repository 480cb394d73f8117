//! Match access codes.
//!
//! A code has the form `<random>-<digest>`. The digest is a truncated sha256
//! over the key-sorted JSON payload, the random component and a fixed salt,
//! so a code is only valid against the payload it was issued for.
//!
//! ## Lifecycle
//!
//! - **Issue**: payload stored as active, expired entries swept
//! - **Validate**: format, used, unknown, expiry and integrity checks
//! - **Consume**: validate, then move to the used set for good
//!
//! ## Example
//!
//! ```
//! use courtside::security::{CodeValidationError, MatchCodeRegistry};
//!
//! let mut registry = MatchCodeRegistry::new();
//! let players = vec!["p1".to_string(), "p2".to_string()];
//! let issued = registry.issue("match-1", &players, Some("court-1"), "spring-open").unwrap();
//!
//! assert!(registry.validate(&issued.code).is_ok());
//! registry.consume(&issued.code).unwrap();
//! assert_eq!(
//!     registry.validate(&issued.code),
//!     Err(CodeValidationError::AlreadyUsed)
//! );
//! ```

pub mod errors;
pub mod match_code;
pub mod service;

pub use errors::{CodeValidationError, CodeValidationResult};
pub use match_code::{
    CODE_LENGTH, CODE_TTL_MINUTES, CodeStatistics, DIGEST_PREFIX_LEN, IssuedCode,
    MatchCodePayload, MatchCodeRegistry,
};
pub use service::MatchCodeService;

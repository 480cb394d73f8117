//! Same-affiliation-avoiding pairing.
//!
//! Pairs an arbitrary set of competitors into head-to-head matches so that as
//! few matches as possible are between members of the same affiliation. The
//! search is exhaustive backtracking with branch-and-bound pruning and
//! per-call memoization of residual competitor sets.
//!
//! ## Example
//!
//! ```
//! use courtside::{Competitor, pairing::PairingEngine};
//!
//! let competitors = vec![
//!     Competitor::new("1", "Ana", 17, "north"),
//!     Competitor::new("2", "Bo", 16, "north"),
//!     Competitor::new("3", "Cy", 17, "south"),
//!     Competitor::new("4", "Di", 15, "south"),
//! ];
//!
//! let result = PairingEngine::new().pair(&competitors).unwrap();
//! assert_eq!(result.matches.len(), 2);
//! assert_eq!(result.total_penalty, 0);
//! assert!(!result.has_bye());
//! ```

pub mod engine;
mod search;

pub use engine::{DEFAULT_MAX_PAIRING_COMPETITORS, PairingEngine, PairingResult};

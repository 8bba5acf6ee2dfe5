//! Domain rule engines.
//!
//! [`stage`] decides and performs project stage advancement; [`verification`]
//! carries the admin decision on quest submissions. Both load rows through
//! the `jam_db` repositories and delegate rule evaluation to `jam_core`.

pub mod stage;
pub mod verification;

pub use stage::StageEngine;
pub use verification::VerificationEngine;

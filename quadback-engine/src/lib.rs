//! Quad n-back trial engine: trial generation under a match-probability
//! policy, response scoring, and the session driver that serializes
//! ticks. The generator is a pure function of `(t, config, history)`
//! plus injected randomness and time.

pub mod config;
pub mod generator;
pub mod scoring;
pub mod session;

pub use config::{GameConfig, ModalityConfig};
pub use generator::generate;
pub use scoring::{attach_response, compute_stats};
pub use session::{Session, SessionStatus};

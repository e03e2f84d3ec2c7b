//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap;
pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_out;
pub mod token;

// Re-exports
pub use bootstrap::EnsureAdminUseCase;
pub use check_session::{CheckSessionUseCase, SessionInfoOutput};
pub use config::AuthConfig;
pub use sign_in::{ClientFingerprint, SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;

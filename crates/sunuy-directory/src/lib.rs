//! Async request layer over the directory: cancellable searches, incremental
//! "show more", and simulated form submission and sign-in.

pub mod backend;
pub mod error;
pub mod session;
pub mod submit;

pub use backend::{SearchBackend, SimulatedBackend};
pub use error::DirectoryError;
pub use session::{ContactLinks, DirectorySession, SessionPhase, SessionState};
pub use submit::{
    Authenticator, FormController, FormSubmitter, SimulatedAuthenticator, SimulatedSubmitter,
    Visitor,
};

pub mod backend;
pub mod commands;
pub mod controller;
pub mod state;

pub use backend::{RemoteBackend, WizardBackend};
pub use controller::WizardController;
pub use state::{STEP_SEQUENCE, WizardState, WizardStep};

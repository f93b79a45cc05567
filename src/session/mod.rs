mod store;

pub use store::{ResumeToken, SessionStore};

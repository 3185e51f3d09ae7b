pub mod session;

pub use session::{DEFAULT_FILENAME, SessionStore};

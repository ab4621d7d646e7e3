pub mod boundary;
pub mod context;
pub mod gate;
pub mod sessions;
pub mod token;

pub use boundary::{SessionBoundary, SessionEvent, SignIn};
pub use context::{Identity, Role, SessionContext};
pub use gate::Landing;

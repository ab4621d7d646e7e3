pub mod logic;
pub mod permit;
pub mod status;

pub use permit::{BusinessPermit, FsicPermit, PermitRecord};
pub use status::{PaymentStatus, PermitStatus, TransitionTable};

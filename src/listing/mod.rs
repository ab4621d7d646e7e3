pub mod controller;
pub mod filters;
pub mod kind;
pub mod notice;
pub mod pagination;
pub mod stats;

pub use controller::{ListController, ListView, LoadOutcome};
pub use filters::{FilterConfig, PaymentBucket};
pub use kind::{Business, Cell, ExportSheet, Fsic, KindSlug, ListKind, Occupancy};
pub use notice::{Notice, NoticeLevel};
pub use pagination::PageWindow;
pub use stats::{StatsCache, StatusStats};

pub mod card;
pub mod error;
pub mod field;
pub mod notice;
pub mod pagination;

pub use card::{card, stat_card};
pub use error::error_page;
pub use field::form_field;
pub use notice::notice_banner;
pub use pagination::pagination_nav;

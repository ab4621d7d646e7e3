pub mod apply;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod permit_form;
pub mod permits;

pub use apply::{application_received_page, apply_page};
pub use dashboard::{dashboard_page, DashboardVm};
pub use home::home_page;
pub use login::login_page;
pub use permit_form::{permit_form_page, FormVm};
pub use permits::{confirm_delete_page, list_page, ListPageVm};

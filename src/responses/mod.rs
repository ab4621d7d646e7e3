pub mod errors;
pub mod html;
pub mod redirect;
pub mod xlsx;

pub use crate::errors::ResultResp;
pub use errors::error_response;
pub use html::{html_response, html_response_with_status};
pub use redirect::{redirect, redirect_with_cookie};
pub use xlsx::xlsx_response;

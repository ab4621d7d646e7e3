use crate::listing::Notice;
use maud::{html, Markup};

pub fn notice_banner(notice: Option<&Notice>) -> Markup {
    html! {
        @if let Some(n) = notice {
            div class=(format!("notice notice-{}", n.level.as_str())) role="status" {
                (n.message)
            }
        }
    }
}

use crate::templates::layouts::desktop::plain_layout;
use maud::{html, Markup};

pub fn error_page(status: u16, message: &str) -> Markup {
    plain_layout(
        &format!("Error {status}"),
        html! {
            main class="container narrow" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to home" } }
            }
        },
    )
}

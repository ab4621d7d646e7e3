use crate::auth::SessionContext;
use crate::templates::desktop_layout;
use crate::templates::pages::permit_form::{form_body, FormVm};
use maud::{html, Markup};

pub fn apply_page(session: &SessionContext, intro: &str, vm: &FormVm) -> Markup {
    desktop_layout(
        &vm.title,
        session,
        html! {
            main class="container" {
                h1 { (vm.title) }
                p class="lead" { (intro) }
                (form_body(vm))
            }
        },
    )
}

pub fn application_received_page(session: &SessionContext, title: &str) -> Markup {
    desktop_layout(
        title,
        session,
        html! {
            main class="container narrow" {
                h1 { "Application submitted" }
                div class="notice notice-success" role="status" {
                    "Your application has been submitted successfully! "
                    "The fire station will review it shortly."
                }
                p { a href="/" { "Back to home" } }
            }
        },
    )
}

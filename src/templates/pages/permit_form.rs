use crate::auth::SessionContext;
use crate::forms::{FieldErrors, FieldSpec, FormFields};
use crate::listing::Notice;
use crate::templates::components::{form_field, notice_banner};
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Everything a create/edit form needs to render.
pub struct FormVm {
    pub title: String,
    pub action: String,
    pub cancel_href: String,
    pub specs: Vec<FieldSpec>,
    pub values: FormFields,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
    pub submit_label: &'static str,
}

pub fn form_body(vm: &FormVm) -> Markup {
    html! {
        (notice_banner(vm.notice.as_ref()))
        @if !vm.errors.is_empty() {
            div class="notice notice-error" role="alert" {
                "Please correct the highlighted fields."
            }
        }
        form method="post" action=(vm.action) class="permit-form" novalidate {
            div class="grid" {
                @for spec in &vm.specs {
                    (form_field(spec, &vm.values, &vm.errors))
                }
            }
            button type="submit" { (vm.submit_label) }
            " "
            a href=(vm.cancel_href) { "Cancel" }
        }
    }
}

pub fn permit_form_page(session: &SessionContext, vm: &FormVm) -> Markup {
    desktop_layout(
        &vm.title,
        session,
        html! {
            main class="container" {
                h1 { (vm.title) }
                (form_body(vm))
            }
        },
    )
}

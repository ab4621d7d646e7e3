use crate::auth::SessionContext;
use crate::templates::components::card;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn home_page(session: &SessionContext) -> Markup {
    desktop_layout(
        "Home",
        session,
        html! {
            main class="container" {
                h1 { "Apply for a permit" }
                p class="lead" {
                    "Submit your application online. The fire station will review it and "
                    "contact you about the inspection."
                }
                (card("Business Permit (FSEC)", html! {
                    p { "Fire Safety Evaluation Clearance for a building or establishment." }
                    a href="/apply/business" { "Start application" }
                }))
                (card("Fire Safety Inspection Certificate", html! {
                    p { "Inspection certificate required before a business can operate." }
                    a href="/apply/fsic" { "Start application" }
                }))
            }
        },
    )
}

use crate::auth::SessionContext;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn login_page(email: &str, error: Option<&str>) -> Markup {
    desktop_layout(
        "Sign in",
        &SessionContext::anonymous(),
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                p class="lead" { "Fire station personnel and applicants sign in with their account." }

                @if let Some(msg) = error {
                    div class="notice notice-error" role="alert" { (msg) }
                }

                form action="/login" method="post" class="stack" {
                    label for="email" { "Email" }
                    input type="email" id="email" name="email" value=(email) required autofocus;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password" required;
                    button type="submit" { "Sign in" }
                }
            }
        },
    )
}

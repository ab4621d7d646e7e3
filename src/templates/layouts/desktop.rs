use crate::auth::{Role, SessionContext};
use crate::listing::KindSlug;
use maud::{html, Markup, DOCTYPE};

fn nav_links(session: &SessionContext) -> Vec<(String, &'static str)> {
    let tables = |admin: bool| {
        KindSlug::ALL
            .into_iter()
            .filter(move |k| admin || !k.admin_only())
            .map(|k| (format!("/permits/{}", k.as_str()), k.title()))
    };
    match session.role() {
        Some(Role::Admin) => std::iter::once(("/admin".to_string(), "Dashboard"))
            .chain(tables(true))
            .collect(),
        Some(Role::Staff) => std::iter::once(("/dashboard".to_string(), "Dashboard"))
            .chain(tables(false))
            .collect(),
        Some(Role::Citizen) => vec![
            ("/home".to_string(), "Home"),
            ("/apply/business".to_string(), "Business Permit Application"),
            ("/apply/fsic".to_string(), "FSIC Application"),
        ],
        None => vec![
            ("/apply/business".to_string(), "Business Permit Application"),
            ("/apply/fsic".to_string(), "FSIC Application"),
        ],
    }
}

pub fn desktop_layout(title: &str, session: &SessionContext, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Fire Station Permits" }
            }
            body {
                header class="site-header" {
                    h3 { "Fire Station Permits" }
                    nav {
                        ul {
                            @for (href, label) in nav_links(session) {
                                li { a href=(href) { (label) } }
                            }
                        }
                    }
                    @match session.identity() {
                        Some(me) => {
                            span class="whoami" { (me.email) " (" (me.role.as_str()) ")" }
                            form action="/logout" method="post" class="inline" {
                                button type="submit" { "Sign out" }
                            }
                        }
                        None => a href="/login" { "Sign in" },
                    }
                }
                (content)
            }
        }
    }
}

/// Layout without navigation, for error pages.
pub fn plain_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body { (content) }
        }
    }
}

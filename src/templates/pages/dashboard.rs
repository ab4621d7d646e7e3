use crate::auth::SessionContext;
use crate::listing::{KindSlug, Notice, StatusStats};
use crate::templates::components::{card, notice_banner, stat_card};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct DashboardVm {
    pub title: &'static str,
    /// `None` when the permit store could not be read.
    pub stats: Option<StatusStats>,
    pub tables: Vec<KindSlug>,
    pub notice: Option<Notice>,
}

pub fn dashboard_page(session: &SessionContext, vm: &DashboardVm) -> Markup {
    desktop_layout(
        vm.title,
        session,
        html! {
            main class="container" {
                h1 { (vm.title) }
                @if let Some(me) = session.identity() {
                    p { "Signed in as " strong { (me.email) } }
                }
                (notice_banner(vm.notice.as_ref()))

                (card("Building permits", html! {
                    @match vm.stats {
                        Some(s) => div class="stats" {
                            (stat_card("Total", s.total, "stat-total"))
                            (stat_card("Pending", s.pending, "stat-pending"))
                            (stat_card("Approved", s.approved, "stat-approved"))
                            (stat_card("Rejected", s.rejected, "stat-rejected"))
                        },
                        None => p class="notice notice-error" { "Permit counts could not be loaded." },
                    }
                }))

                (card("Tables", html! {
                    ul {
                        @for k in &vm.tables {
                            li { a href=(format!("/permits/{}", k.as_str())) { (k.title()) } }
                        }
                    }
                }))
            }
        },
    )
}

use crate::listing::PageWindow;
use maud::{html, Markup};

/// First/prev/numbered/next/last links. `href` builds the link for a page.
pub fn pagination_nav(window: &PageWindow, href: impl Fn(usize) -> String) -> Markup {
    let link = |label: &str, page: usize, enabled: bool| {
        html! {
            @if enabled {
                a href=(href(page)) { (label) }
            } @else {
                span class="disabled" aria-disabled="true" { (label) }
            }
        }
    };

    html! {
        nav class="pagination" aria-label="Pagination" {
            (link("«", 1, window.has_prev()))
            (link("‹", window.page.saturating_sub(1).max(1), window.has_prev()))
            @for p in &window.visible {
                @if *p == window.page {
                    span class="current" aria-current="page" { (p) }
                } @else {
                    a href=(href(*p)) { (p) }
                }
            }
            (link("›", window.page.saturating_add(1), window.has_next()))
            (link("»", window.total_pages.max(1), window.has_next()))
        }
        p class="page-summary" { (window.summary()) }
    }
}

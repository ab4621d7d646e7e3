use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// A number with a caption, as on the dashboard tiles.
pub fn stat_card(label: &str, value: usize, class: &str) -> Markup {
    html! {
        div class=(format!("stat {class}")) {
            span class="stat-value" { (value) }
            span class="stat-label" { (label) }
        }
    }
}

use crate::auth::SessionContext;
use crate::domain::{PaymentStatus, PermitRecord, PermitStatus};
use crate::listing::filters::PaymentBucket;
use crate::listing::kind::{FilterKind, StatusStrategy};
use crate::listing::{Cell, FilterConfig, ListKind, ListView, LoadOutcome, Notice};
use crate::templates::components::{notice_banner, pagination_nav};
use crate::templates::desktop_layout;
use maud::{html, Markup};
use url::form_urlencoded;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub struct ListPageVm<'a, K: ListKind> {
    pub view: ListView<K::Record>,
    pub outcome: Option<&'a LoadOutcome>,
    pub query: &'a str,
    pub filters: FilterConfig,
    pub notice: Option<Notice>,
    pub current_year: i32,
}

/// Query string for links that keep the search and filters.
pub fn list_query(query: &str, filters: &FilterConfig, page: Option<usize>) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    if !query.is_empty() {
        ser.append_pair("q", query);
    }
    for (k, v) in filters.query_pairs() {
        ser.append_pair(k, &v);
    }
    if let Some(p) = page {
        ser.append_pair("page", &p.to_string());
    }
    ser.finish()
}

fn with_query(path: &str, qs: &str) -> String {
    if qs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{qs}")
    }
}

fn display_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
        Cell::Number(n) => format!("{n:.2}"),
    }
}

fn filter_form<K: ListKind>(vm: &ListPageVm<'_, K>) -> Markup {
    let f = &vm.filters;
    let years = (vm.current_year - 5..=vm.current_year + 1).rev();
    html! {
        form method="get" action=(format!("/permits/{}", K::SLUG)) class="filters" {
            input type="search" name="q" value=(vm.query) placeholder="Search...";
            @if K::supports(FilterKind::Month) {
                select name="month" aria-label="Month" {
                    option value="" { "All Months" }
                    @for (i, name) in MONTHS.iter().enumerate() {
                        option value=(i + 1) selected[f.month == Some(i as u32 + 1)] { (name) }
                    }
                }
            }
            @if K::supports(FilterKind::Year) {
                select name="year" aria-label="Year" {
                    option value="" { "All Years" }
                    @for y in years {
                        option value=(y) selected[f.year == Some(y)] { (y) }
                    }
                }
            }
            @if K::supports(FilterKind::Status) {
                select name="status" aria-label="Status" {
                    option value="" { "All Statuses" }
                    @for s in PermitStatus::ALL {
                        option value=(s.as_str()) selected[f.status == Some(s)] { (s.label()) }
                    }
                }
            }
            @if K::supports(FilterKind::Payment) {
                select name="payment" aria-label="Payment" {
                    option value="" { "All Payments" }
                    option value=(PaymentBucket::PaidThisYear.as_str())
                        selected[f.payment == Some(PaymentBucket::PaidThisYear)] { "Paid This Year" }
                    option value=(PaymentBucket::NotPaidOrOverdue.as_str())
                        selected[f.payment == Some(PaymentBucket::NotPaidOrOverdue)] { "Not Paid / Overdue" }
                }
            }
            button type="submit" { "Apply" }
            a href=(format!("/permits/{}", K::SLUG)) { "Clear" }
        }
    }
}

fn row_actions<K: ListKind>(record: &K::Record) -> Markup {
    let id = record.id();
    let base = format!("/permits/{}/{}", K::SLUG, urlencode(id));
    html! {
        @if K::STATUS != StatusStrategy::Unsupported {
            form method="post" action=(format!("{base}/status")) class="inline" {
                select name="status" aria-label="Change status" {
                    @for s in PermitStatus::ALL {
                        option value=(s.as_str()) selected[record.status() == s] { (s.label()) }
                    }
                }
                button type="submit" { "Update" }
            }
        }
        @if let Some(p) = K::payment(record) {
            form method="post" action=(format!("/permits/occupancy/{}/payment", urlencode(id))) class="inline" {
                select name="payment_status_occupancy" aria-label="Change payment" {
                    @for s in [PaymentStatus::NotPaid, PaymentStatus::Paid] {
                        option value=(s.as_str()) selected[p.payment_status_occupancy == s] { (s.label()) }
                    }
                }
                button type="submit" { "Set" }
            }
        }
        a href=(format!("{base}/edit")) { "Edit" }
        form method="post" action=(format!("{base}/delete")) class="inline" {
            button type="submit" class="danger" { "Delete" }
        }
    }
}

fn urlencode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

pub fn list_page<K: ListKind>(session: &SessionContext, vm: &ListPageVm<'_, K>) -> Markup {
    let qs = list_query(vm.query, &vm.filters, None);
    let export_href = with_query(&format!("/permits/{}/export", K::SLUG), &qs);
    let page_href = |p: usize| {
        with_query(
            &format!("/permits/{}", K::SLUG),
            &list_query(vm.query, &vm.filters, Some(p)),
        )
    };

    desktop_layout(
        K::TITLE,
        session,
        html! {
            main class="container wide" {
                h1 { (K::TITLE) }
                (notice_banner(vm.notice.as_ref()))

                div class="toolbar" {
                    (filter_form(vm))
                    a href=(export_href) class="button" { "Export to Excel" }
                    @if K::CREATABLE {
                        a href=(format!("/permits/{}/new", K::SLUG)) class="button" { "New Permit" }
                    }
                }

                @if let Some(LoadOutcome::Failed(e)) = vm.outcome {
                    div class="notice notice-error" role="alert" {
                        "Could not load permits: " (e.user_message())
                    }
                }

                table class="permits" {
                    thead {
                        tr {
                            @for col in K::EXPORT.columns {
                                th { (col) }
                            }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        @for r in &vm.view.rows {
                            tr class=(K::tone(r, vm.current_year).css_class()) data-id=(r.id()) {
                                @for cell in K::export_row(r) {
                                    td { (display_cell(&cell)) }
                                }
                                td class="actions" { (row_actions::<K>(r)) }
                            }
                        }
                        @if vm.view.rows.is_empty() && !matches!(vm.outcome, Some(LoadOutcome::Failed(_))) {
                            tr {
                                td colspan=(K::EXPORT.columns.len() + 1) class="empty" {
                                    @if vm.view.window.is_past_end() {
                                        "There are no records on this page. "
                                        a href=(page_href(1)) { "Back to the first page" }
                                    } @else {
                                        "No records found."
                                    }
                                }
                            }
                        }
                    }
                }

                (pagination_nav(&vm.view.window, page_href))
            }
        },
    )
}

pub fn confirm_delete_page<K: ListKind>(session: &SessionContext, record: &K::Record) -> Markup {
    let action = format!("/permits/{}/{}/delete", K::SLUG, urlencode(record.id()));
    let summary = K::export_row(record)
        .iter()
        .take(3)
        .map(display_cell)
        .collect::<Vec<_>>()
        .join(" · ");
    desktop_layout(
        "Delete permit",
        session,
        html! {
            main class="container narrow" {
                h1 { "Delete permit?" }
                p { "Are you sure you want to delete this record? This cannot be undone." }
                p { strong { (summary) } }
                form method="post" action=(action) {
                    input type="hidden" name="confirm" value="yes";
                    button type="submit" class="danger" { "Delete" }
                    " "
                    a href=(format!("/permits/{}", K::SLUG)) { "Cancel" }
                }
            }
        },
    )
}

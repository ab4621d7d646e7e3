//! The three permit tables share one controller; a [`ListKind`] supplies what
//! differs between them.
use std::str::FromStr;

use crate::domain::logic::{display_date, payment_tone, status_tone, RowTone};
use crate::domain::{BusinessPermit, FsicPermit, PermitRecord, PermitStatus};
use crate::store::Resource;

/// A filter a table may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Month,
    Year,
    Status,
    Payment,
}

/// How a status change reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStrategy {
    /// PUT the whole record with the new status.
    FullUpdate,
    /// PUT `{status}` to the status endpoint.
    StatusEndpoint,
    /// The table has no status control.
    Unsupported,
}

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Absent optional values export as "N/A".
    pub fn optional(s: Option<&str>) -> Self {
        match s.map(str::trim).filter(|s| !s.is_empty()) {
            Some(v) => Cell::Text(v.to_string()),
            None => Cell::Text("N/A".into()),
        }
    }

    pub fn date(s: Option<&str>) -> Self {
        match s.map(str::trim).filter(|s| !s.is_empty()) {
            Some(v) => Cell::Text(display_date(v)),
            None => Cell::Text("N/A".into()),
        }
    }
}

/// File and sheet naming plus column labels for a table export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSheet {
    pub file_stem: &'static str,
    pub sheet_name: &'static str,
    pub columns: &'static [&'static str],
}

impl ExportSheet {
    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.file_stem)
    }
}

pub trait ListKind {
    type Record: PermitRecord;

    /// Path segment under `/permits/`.
    const SLUG: &'static str;
    const TITLE: &'static str;
    const RESOURCE: Resource;
    const SORT_BY_DATE: bool;
    /// Whether staff can add records from this table.
    const CREATABLE: bool;
    const FILTERS: &'static [FilterKind];
    const STATUS: StatusStrategy;
    const EXPORT: ExportSheet;

    fn in_scope(_record: &Self::Record) -> bool {
        true
    }

    /// The field month/year filters and sorting look at.
    fn date_field(record: &Self::Record) -> &str;

    fn tone(record: &Self::Record, current_year: i32) -> RowTone;

    /// Occupancy payment fields, for kinds that show them.
    fn payment(_record: &Self::Record) -> Option<&BusinessPermit> {
        None
    }

    fn export_row(record: &Self::Record) -> Vec<Cell>;

    fn supports(filter: FilterKind) -> bool {
        Self::FILTERS.contains(&filter)
    }

    fn status_message(status: PermitStatus) -> String {
        format!("Status updated to {}.", status.as_str())
    }
}

/// Building permits as received, in fetch order.
#[derive(Debug, Clone, Copy)]
pub struct Business;

/// Approved building permits with their occupancy payment.
#[derive(Debug, Clone, Copy)]
pub struct Occupancy;

/// Fire safety inspection certificate applications.
#[derive(Debug, Clone, Copy)]
pub struct Fsic;

const BUSINESS_COLUMNS: &[&str] = &[
    "Date Received",
    "Owner/Establishment",
    "Location",
    "FCODE Fee",
    "OR No.",
    "Evaluated By",
    "Date Released FSEC",
    "Control No.",
    "Status",
];

const OCCUPANCY_COLUMNS: &[&str] = &[
    "Date Received",
    "Owner/Establishment",
    "Location",
    "FCODE Fee",
    "OR No.",
    "Inspected By",
    "Date Released FSIC",
    "Control No.",
    "Occupancy Payment Status",
    "Occupancy Payment Date",
];

const FSIC_COLUMNS: &[&str] = &[
    "Contact Number",
    "Business Name",
    "Owner",
    "Barangay",
    "Complete Address",
    "Floor Area (SQM)",
    "No of Storeys",
    "Rental",
    "Nature of Business",
    "BIR TIN",
    "Expiry",
    "Amount Paid",
    "OR Number",
    "Date Applied",
    "Type of Occupancy",
    "Date Released",
    "Status",
];

impl ListKind for Business {
    type Record = BusinessPermit;

    const SLUG: &'static str = "business";
    const TITLE: &'static str = "Building Permits";
    const RESOURCE: Resource = Resource::Business;
    const SORT_BY_DATE: bool = false;
    const CREATABLE: bool = true;
    const FILTERS: &'static [FilterKind] = &[FilterKind::Month];
    const STATUS: StatusStrategy = StatusStrategy::FullUpdate;
    const EXPORT: ExportSheet = ExportSheet {
        file_stem: "Building_Permits_Report",
        sheet_name: "Building Permits",
        columns: BUSINESS_COLUMNS,
    };

    fn date_field(record: &BusinessPermit) -> &str {
        &record.date_received
    }

    fn tone(record: &BusinessPermit, _current_year: i32) -> RowTone {
        status_tone(record.status)
    }

    fn export_row(r: &BusinessPermit) -> Vec<Cell> {
        vec![
            Cell::text(&r.date_received),
            Cell::text(&r.owner_establishment),
            Cell::text(&r.location),
            Cell::Number(r.fcode_fee),
            Cell::text(&r.or_no),
            Cell::text(&r.evaluated_by),
            Cell::date(Some(&r.date_released_fsec)),
            Cell::text(&r.control_no),
            Cell::text(r.status.as_str()),
        ]
    }
}

impl ListKind for Occupancy {
    type Record = BusinessPermit;

    const SLUG: &'static str = "occupancy";
    const TITLE: &'static str = "Occupancy Permits";
    const RESOURCE: Resource = Resource::Business;
    const SORT_BY_DATE: bool = true;
    const CREATABLE: bool = false;
    const FILTERS: &'static [FilterKind] =
        &[FilterKind::Month, FilterKind::Year, FilterKind::Payment];
    const STATUS: StatusStrategy = StatusStrategy::Unsupported;
    const EXPORT: ExportSheet = ExportSheet {
        file_stem: "Occupancy_Permits_Report",
        sheet_name: "Occupancy Permits",
        columns: OCCUPANCY_COLUMNS,
    };

    fn in_scope(record: &BusinessPermit) -> bool {
        record.status == PermitStatus::Approved
    }

    fn date_field(record: &BusinessPermit) -> &str {
        &record.date_received
    }

    fn tone(record: &BusinessPermit, current_year: i32) -> RowTone {
        payment_tone(record, current_year)
    }

    fn payment(record: &BusinessPermit) -> Option<&BusinessPermit> {
        Some(record)
    }

    fn export_row(r: &BusinessPermit) -> Vec<Cell> {
        vec![
            Cell::text(&r.date_received),
            Cell::text(&r.owner_establishment),
            Cell::text(&r.location),
            Cell::Number(r.fcode_fee),
            Cell::text(&r.or_no),
            Cell::text(&r.evaluated_by),
            Cell::date(Some(&r.date_released_fsec)),
            Cell::text(&r.control_no),
            Cell::text(r.payment_status_occupancy.label()),
            Cell::date(r.last_payment_date_occupancy.as_deref()),
        ]
    }
}

impl ListKind for Fsic {
    type Record = FsicPermit;

    const SLUG: &'static str = "fsic";
    const TITLE: &'static str = "FSIC Permits";
    const RESOURCE: Resource = Resource::Fsic;
    const SORT_BY_DATE: bool = true;
    const CREATABLE: bool = true;
    const FILTERS: &'static [FilterKind] =
        &[FilterKind::Month, FilterKind::Year, FilterKind::Status];
    const STATUS: StatusStrategy = StatusStrategy::StatusEndpoint;
    const EXPORT: ExportSheet = ExportSheet {
        file_stem: "FSIC_Permits_Report",
        sheet_name: "FSIC Permits",
        columns: FSIC_COLUMNS,
    };

    fn date_field(record: &FsicPermit) -> &str {
        &record.date_applied
    }

    fn tone(record: &FsicPermit, _current_year: i32) -> RowTone {
        status_tone(record.status)
    }

    fn export_row(r: &FsicPermit) -> Vec<Cell> {
        vec![
            Cell::text(&r.contact_number),
            Cell::text(&r.business_name),
            Cell::text(&r.owner),
            Cell::text(&r.brgy),
            Cell::text(&r.complete_address),
            Cell::Number(f64::from(r.floor_area)),
            Cell::Number(f64::from(r.no_of_storeys)),
            Cell::text(&r.rental),
            Cell::text(&r.nature_of_business),
            Cell::text(&r.bir_tin),
            Cell::date(r.expiry.as_deref()),
            Cell::Number(r.amount_paid),
            Cell::text(&r.or_number),
            Cell::text(&r.date_applied),
            Cell::text(&r.type_of_occupancy),
            Cell::date(r.date_released.as_deref()),
            Cell::text(r.status.as_str()),
        ]
    }

    fn status_message(status: PermitStatus) -> String {
        match status {
            PermitStatus::Approved => "Permit has been approved successfully!".into(),
            PermitStatus::Rejected => "Permit has been rejected.".into(),
            PermitStatus::Pending => "Permit status changed to pending.".into(),
        }
    }
}

/// Table named in a URL, for dispatching to the generic handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSlug {
    Business,
    Occupancy,
    Fsic,
}

impl KindSlug {
    pub const ALL: [KindSlug; 3] = [KindSlug::Business, KindSlug::Occupancy, KindSlug::Fsic];

    pub fn as_str(self) -> &'static str {
        match self {
            KindSlug::Business => Business::SLUG,
            KindSlug::Occupancy => Occupancy::SLUG,
            KindSlug::Fsic => Fsic::SLUG,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            KindSlug::Business => Business::TITLE,
            KindSlug::Occupancy => Occupancy::TITLE,
            KindSlug::Fsic => Fsic::TITLE,
        }
    }

    /// FSIC is reserved for administrators.
    pub fn admin_only(self) -> bool {
        self == KindSlug::Fsic
    }
}

impl FromStr for KindSlug {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KindSlug::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}

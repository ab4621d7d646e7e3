use chrono::NaiveDate;

use crate::domain::permit::parse_amount;
use crate::domain::{BusinessPermit, PaymentStatus, PermitStatus};
use crate::forms::{check_required, value, FieldErrors, FieldSpec, FormFields, Input};

pub const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("pending", "Pending"),
    ("approved", "Approved"),
    ("rejected", "Rejected"),
];

pub const PAYMENT_OPTIONS: &[(&str, &str)] = &[("not_paid", "Not Paid"), ("paid", "Paid")];

pub const STATUS_FIELD: FieldSpec =
    FieldSpec::optional("status", "Status", Input::Select(STATUS_OPTIONS));

pub const BUSINESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("date_received", "Date Received", Input::Date),
    FieldSpec::required("control_no", "Control No.", Input::Text),
    FieldSpec::required("owner_establishment", "Owner/Establishment", Input::Text),
    FieldSpec::required("location", "Location", Input::Text),
    FieldSpec::required("fcode_fee", "FCODE Fee", Input::Amount),
    FieldSpec::required("or_no", "OR No.", Input::Text),
    FieldSpec::required("evaluated_by", "Evaluated By", Input::Text),
    FieldSpec::required("date_released_fsec", "Date Released FSEC", Input::Date),
];

/// Business fields plus the payment pair staff edit from the occupancy table.
pub const OCCUPANCY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("date_received", "Date Received", Input::Date),
    FieldSpec::required("control_no", "Control No.", Input::Text),
    FieldSpec::required("owner_establishment", "Owner/Establishment", Input::Text),
    FieldSpec::required("location", "Location", Input::Text),
    FieldSpec::required("fcode_fee", "FCODE Fee", Input::Amount),
    FieldSpec::required("or_no", "OR No.", Input::Text),
    FieldSpec::required("evaluated_by", "Inspected By", Input::Text),
    FieldSpec::required("date_released_fsec", "Date Released FSIC", Input::Date),
    FieldSpec::optional(
        "payment_status_occupancy",
        "Occupancy Payment Status",
        Input::Select(PAYMENT_OPTIONS),
    ),
    FieldSpec::optional("last_payment_date_occupancy", "Last Payment Date", Input::Date),
];

/// Builds a business permit from form fields.
///
/// `base` is the stored record when editing; fields not on the form keep their
/// stored values. `status` and the payment pair are read only when submitted.
pub fn business_draft(
    fields: &FormFields,
    base: Option<&BusinessPermit>,
    today: NaiveDate,
) -> Result<BusinessPermit, FieldErrors> {
    let mut errors = FieldErrors::default();
    check_required(fields, BUSINESS_FIELDS, &mut errors);

    let mut permit = base.cloned().unwrap_or_default();
    permit.date_received = value(fields, "date_received").to_string();
    permit.control_no = value(fields, "control_no").to_string();
    permit.owner_establishment = value(fields, "owner_establishment").to_string();
    permit.location = value(fields, "location").to_string();
    permit.or_no = value(fields, "or_no").to_string();
    permit.evaluated_by = value(fields, "evaluated_by").to_string();
    permit.date_released_fsec = value(fields, "date_released_fsec").to_string();

    let fee = value(fields, "fcode_fee");
    if !fee.is_empty() {
        match parse_amount(fee) {
            Some(v) if v > 0.0 => permit.fcode_fee = v,
            _ => errors.add("fcode_fee", "FCODE Fee must be a positive amount."),
        }
    }

    let status = value(fields, "status");
    if !status.is_empty() {
        match status.parse::<PermitStatus>() {
            Ok(s) => permit.status = s,
            Err(_) => errors.add("status", "Choose a valid status."),
        }
    }

    let payment = value(fields, "payment_status_occupancy");
    if !payment.is_empty() {
        match payment.parse::<PaymentStatus>() {
            Ok(p) => {
                let date = value(fields, "last_payment_date_occupancy");
                permit.payment_status_occupancy = p;
                permit.last_payment_date_occupancy = match p {
                    PaymentStatus::Paid if date.is_empty() => {
                        Some(today.format("%Y-%m-%d").to_string())
                    }
                    PaymentStatus::Paid => Some(date.to_string()),
                    PaymentStatus::NotPaid => None,
                };
            }
            Err(_) => errors.add("payment_status_occupancy", "Choose a valid payment status."),
        }
    }

    errors.into_result(permit)
}

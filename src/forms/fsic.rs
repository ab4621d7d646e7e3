use crate::domain::permit::parse_amount;
use crate::domain::{FsicPermit, PermitStatus};
use crate::forms::{check_required, parse_count, value, FieldErrors, FieldSpec, FormFields, Input};

pub const FSIC_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("date_applied", "Date Applied", Input::Date),
    FieldSpec::required("contact_number", "Contact Number", Input::Text),
    FieldSpec::required("business_name", "Business Name", Input::Text),
    FieldSpec::required("owner", "Owner", Input::Text),
    FieldSpec::required("brgy", "Barangay", Input::Text),
    FieldSpec::required("complete_address", "Complete Address", Input::Text),
    FieldSpec::required("floor_area", "Floor Area (SQM)", Input::Count),
    FieldSpec::required("no_of_storeys", "No of Storeys", Input::Count),
    FieldSpec::required("rental", "Rental", Input::Text),
    FieldSpec::required("nature_of_business", "Nature of Business", Input::Text),
    FieldSpec::required("bir_tin", "BIR TIN", Input::Text),
    FieldSpec::required("expiry", "Expiry", Input::Date),
    FieldSpec::required("type_of_occupancy", "Type of Occupancy", Input::Text),
    FieldSpec::required("amount_paid", "Amount Paid", Input::Amount),
    FieldSpec::required("or_number", "OR Number", Input::Text),
    FieldSpec::optional("date_released", "Date Released", Input::Date),
];

/// Builds an FSIC permit from form fields; see [`crate::forms::business_draft`].
pub fn fsic_draft(fields: &FormFields, base: Option<&FsicPermit>) -> Result<FsicPermit, FieldErrors> {
    let mut errors = FieldErrors::default();
    check_required(fields, FSIC_FIELDS, &mut errors);

    let text = |name: &str| value(fields, name).to_string();
    let optional = |name: &str| Some(text(name)).filter(|s| !s.is_empty());

    let mut permit = base.cloned().unwrap_or_default();
    permit.date_applied = text("date_applied");
    permit.contact_number = text("contact_number");
    permit.business_name = text("business_name");
    permit.owner = text("owner");
    permit.brgy = text("brgy");
    permit.complete_address = text("complete_address");
    permit.rental = text("rental");
    permit.nature_of_business = text("nature_of_business");
    permit.bir_tin = text("bir_tin");
    permit.expiry = optional("expiry");
    permit.type_of_occupancy = text("type_of_occupancy");
    permit.or_number = text("or_number");
    permit.date_released = optional("date_released");
    permit.floor_area = parse_count(fields, "floor_area", "Floor Area", &mut errors);
    permit.no_of_storeys = parse_count(fields, "no_of_storeys", "No of Storeys", &mut errors);

    let amount = value(fields, "amount_paid");
    if !amount.is_empty() {
        match parse_amount(amount) {
            Some(v) if v >= 0.0 => permit.amount_paid = v,
            _ => errors.add("amount_paid", "Amount Paid must be an amount."),
        }
    }

    let status = value(fields, "status");
    if !status.is_empty() {
        match status.parse::<PermitStatus>() {
            Ok(s) => permit.status = s,
            Err(_) => errors.add("status", "Choose a valid status."),
        }
    }

    errors.into_result(permit)
}

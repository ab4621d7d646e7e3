//! Citizen application forms. Create-only; the store assigns id and status.
use astra::Request;

use crate::app::App;
use crate::auth::SessionContext;
use crate::domain::{BusinessPermit, FsicPermit, PermitStatus};
use crate::errors::ServerError;
use crate::forms::{business_draft, fsic_draft, FieldErrors, FieldSpec, FormFields, BUSINESS_FIELDS, FSIC_FIELDS};
use crate::handlers::{read_form, today};
use crate::listing::Notice;
use crate::responses::{html_response, html_response_with_status, ResultResp};
use crate::store::Resource;
use crate::templates::pages::{application_received_page, apply_page, FormVm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Application {
    Business,
    Fsic,
}

impl Application {
    fn title(self) -> &'static str {
        match self {
            Application::Business => "Business Permit Application",
            Application::Fsic => "FSIC Application",
        }
    }

    fn intro(self) -> &'static str {
        match self {
            Application::Business => {
                "Apply for a Fire Safety Evaluation Clearance for your building or establishment."
            }
            Application::Fsic => "Apply for a Fire Safety Inspection Certificate for your business.",
        }
    }

    fn action(self) -> &'static str {
        match self {
            Application::Business => "/apply/business",
            Application::Fsic => "/apply/fsic",
        }
    }

    fn fields(self) -> &'static [FieldSpec] {
        match self {
            Application::Business => BUSINESS_FIELDS,
            Application::Fsic => FSIC_FIELDS,
        }
    }

    fn resource(self) -> Resource {
        match self {
            Application::Business => Resource::Business,
            Application::Fsic => Resource::Fsic,
        }
    }

    /// New applications always start pending and unpaid.
    fn body(self, form: &FormFields) -> Result<serde_json::Result<serde_json::Value>, FieldErrors> {
        match self {
            Application::Business => business_draft(form, None, today()).map(|p| {
                serde_json::to_value(BusinessPermit {
                    status: PermitStatus::Pending,
                    payment_status_occupancy: Default::default(),
                    last_payment_date_occupancy: None,
                    ..p
                })
            }),
            Application::Fsic => fsic_draft(form, None).map(|p| {
                serde_json::to_value(FsicPermit {
                    status: PermitStatus::Pending,
                    ..p
                })
            }),
        }
    }
}

fn form_vm(app: Application, values: FormFields, errors: FieldErrors, notice: Option<Notice>) -> FormVm {
    FormVm {
        title: app.title().to_string(),
        action: app.action().to_string(),
        cancel_href: "/".to_string(),
        specs: app.fields().to_vec(),
        values,
        errors,
        notice,
        submit_label: "Submit Application",
    }
}

pub fn form(session: &SessionContext, which: Application) -> ResultResp {
    let vm = form_vm(which, FormFields::new(), FieldErrors::default(), None);
    html_response(apply_page(session, which.intro(), &vm))
}

pub fn submit(app: &App, session: &SessionContext, which: Application, req: Request) -> ResultResp {
    let form = read_form(req)?;

    let body = match which.body(&form) {
        Ok(encoded) => encoded
            .map_err(|e| ServerError::BadRequest(format!("could not encode application: {e}")))?,
        Err(errors) => {
            let vm = form_vm(which, form, errors, None);
            return html_response_with_status(422, apply_page(session, which.intro(), &vm));
        }
    };
    match app.store.create(session, which.resource(), &body) {
        Ok(()) => {
            tracing::info!(application = which.title(), "application submitted");
            app.stats.invalidate();
            html_response(application_received_page(session, which.title()))
        }
        Err(e) => {
            tracing::warn!(application = which.title(), error = %e, "application failed");
            let notice = Notice::error(format!(
                "There was an error submitting your application. {}",
                e.user_message()
            ));
            let vm = form_vm(which, form, FieldErrors::default(), Some(notice));
            html_response(apply_page(session, which.intro(), &vm))
        }
    }
}

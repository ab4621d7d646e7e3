use crate::app::App;
use crate::auth::{Role, SessionContext};
use crate::handlers::{require_admin, require_signed_in, require_staff, take_flash};
use crate::listing::{Business, KindSlug, ListController, StatusStats};
use crate::responses::{html_response, ResultResp};
use crate::templates::pages::{dashboard_page, home_page, DashboardVm};

fn business_stats(app: &App, session: &SessionContext) -> Option<StatusStats> {
    app.stats.get_or_compute(|| {
        let mut ctl = ListController::<Business>::new(app.store.as_ref(), session, &app.transitions);
        if ctl.load().is_failed() {
            None
        } else {
            Some(StatusStats::count(ctl.records()))
        }
    })
}

fn render(app: &App, session: &SessionContext, title: &'static str, admin: bool) -> ResultResp {
    let tables = KindSlug::ALL
        .into_iter()
        .filter(|k| admin || !k.admin_only())
        .collect();
    let vm = DashboardVm {
        title,
        stats: business_stats(app, session),
        tables,
        notice: take_flash(app, session)?,
    };
    html_response(dashboard_page(session, &vm))
}

pub fn admin_dashboard(app: &App, session: &SessionContext) -> ResultResp {
    require_admin(session)?;
    render(app, session, "Admin Dashboard", true)
}

pub fn staff_dashboard(app: &App, session: &SessionContext) -> ResultResp {
    let me = require_staff(session)?;
    render(app, session, "Dashboard", me.role == Role::Admin)
}

pub fn citizen_home(session: &SessionContext) -> ResultResp {
    require_signed_in(session)?;
    html_response(home_page(session))
}

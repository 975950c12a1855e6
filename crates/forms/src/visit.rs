use api_client::ApiClient;
use chrono::NaiveDate;
use shared_types::{
    AppError, Application, ApplicationStatus, ApplicationStatusUpdate, ApplicationVisit,
    VisitRequest, VisitStatus,
};

use crate::context::AppContext;
use crate::fields::{is_valid_email, non_empty, required, required_choice, CrewFields, FieldErrors};
use crate::lookups::VisitLookups;
use crate::outcome::SubmitReport;
use crate::session::{FormMode, FormPhase, FormSession};

/// Schedule a site visit for an application, or record its result.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitForm {
    pub mode: FormMode,
    application: Application,
    pub assigned_email: String,
    pub scheduled_date: Option<NaiveDate>,
    pub visit_status: Option<VisitStatus>,
    pub crew: CrewFields,
    pub visit_remarks: String,
    pub outcome: Option<ApplicationStatus>,
    lookups: VisitLookups,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisitSubmission {
    pub mode: FormMode,
    pub request: VisitRequest,
    /// Status the application moves to once the visit is saved.
    pub application_status: Option<ApplicationStatus>,
    pub application_id: i64,
    current_application_status: ApplicationStatus,
}

impl VisitForm {
    pub fn new(application: Application, lookups: VisitLookups) -> Self {
        Self {
            mode: FormMode::Create,
            application,
            assigned_email: String::new(),
            scheduled_date: None,
            visit_status: Some(VisitStatus::Scheduled),
            crew: CrewFields::default(),
            visit_remarks: String::new(),
            outcome: None,
            lookups,
        }
    }

    pub fn edit(application: Application, visit: &ApplicationVisit, lookups: VisitLookups) -> Self {
        Self {
            mode: FormMode::Edit { id: visit.id },
            application,
            assigned_email: visit.assigned_email.clone(),
            scheduled_date: visit.scheduled_date,
            visit_status: Some(visit.visit_status),
            crew: CrewFields::from_parts(
                visit.visit_by.as_deref(),
                visit.visit_with.as_deref(),
                visit.visit_with_other.as_deref(),
            ),
            visit_remarks: visit.visit_remarks.clone().unwrap_or_default(),
            outcome: visit.outcome,
            lookups,
        }
    }

    pub fn application(&self) -> &Application {
        &self.application
    }

    /// `(email, display name)` pairs for the assignee picker.
    pub fn technician_options(&self) -> Vec<(String, String)> {
        self.lookups
            .technicians
            .iter()
            .map(|t| (t.email.clone(), t.display_name()))
            .collect()
    }

    pub fn outcome_options() -> Vec<ApplicationStatus> {
        ApplicationStatus::ALL
            .iter()
            .copied()
            .filter(ApplicationStatus::is_visit_outcome)
            .collect()
    }

    pub fn validate(&self) -> Result<VisitSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();

        let assigned_email =
            required(&mut errors, "assigned_email", "Assigned technician", &self.assigned_email);
        if let Some(email) = assigned_email.as_deref() {
            let known = &self.lookups.technicians;
            if !is_valid_email(email) {
                errors.insert("assigned_email", "Enter a valid email address");
            } else if !known.is_empty() && !known.iter().any(|t| t.email == email) {
                errors.insert("assigned_email", "Select a technician from the list");
            }
        }
        let scheduled_date = required_choice(
            &mut errors,
            "scheduled_date",
            "a schedule date",
            self.scheduled_date,
        );
        let visit_status =
            required_choice(&mut errors, "visit_status", "a visit status", self.visit_status);

        let mut outcome = None;
        match visit_status {
            Some(VisitStatus::Done) => {
                self.crew.require_full(&mut errors);
                required(&mut errors, "visit_remarks", "Visit remarks", &self.visit_remarks);
                outcome = required_choice(&mut errors, "outcome", "an outcome", self.outcome);
                if outcome.is_some_and(|o| !o.is_visit_outcome()) {
                    errors.insert("outcome", "Select a valid visit outcome");
                }
            }
            Some(VisitStatus::Reschedule | VisitStatus::Failed) => {
                required(&mut errors, "visit_by", "Visit by", &self.crew.visit_by);
                required(&mut errors, "visit_remarks", "Visit remarks", &self.visit_remarks);
            }
            _ => {}
        }

        let (Some(assigned_email), Some(scheduled_date), Some(visit_status)) =
            (assigned_email, scheduled_date, visit_status)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let app = &self.application;
        let snapshot = self.mode == FormMode::Create;
        let application_status = match self.mode {
            FormMode::Create => Some(ApplicationStatus::Schedule),
            FormMode::Edit { .. } => outcome,
        };
        Ok(VisitSubmission {
            mode: self.mode,
            application_id: app.id,
            application_status,
            current_application_status: app.status,
            request: VisitRequest {
                application_id: app.id,
                assigned_email,
                scheduled_date,
                visit_status,
                visit_by: non_empty(&self.crew.visit_by),
                visit_with: non_empty(&self.crew.visit_with),
                visit_with_other: non_empty(&self.crew.visit_with_other),
                visit_remarks: non_empty(&self.visit_remarks),
                outcome,
                region: snapshot.then(|| app.region.clone()),
                city: snapshot.then(|| app.city.clone()),
                barangay: snapshot.then(|| app.barangay.clone()),
                location: snapshot.then(|| app.location.clone()).flatten(),
                full_address: snapshot.then(|| app.full_address()),
                created_by: None,
                updated_by: None,
            },
        })
    }
}

/// Save the visit, then move the application along.
///
/// Scheduling sets the application to `schedule`; a finished visit sets
/// it to the reported outcome.
#[tracing::instrument(skip(api, submission), fields(application_id = submission.application_id))]
pub async fn submit_visit(
    api: &ApiClient,
    submission: VisitSubmission,
    acting_user: &str,
) -> SubmitReport<ApplicationVisit> {
    let mut report = SubmitReport::new();
    let mut request = submission.request;

    let saved = match submission.mode {
        FormMode::Create => {
            request.created_by = Some(acting_user.to_string());
            api.create_visit(&request).await
        }
        FormMode::Edit { id } => {
            request.updated_by = Some(acting_user.to_string());
            api.update_visit(id, &request).await
        }
    };
    let visit = match saved {
        Ok(visit) => {
            report.success(match submission.mode {
                FormMode::Create => "Visit scheduled",
                FormMode::Edit { .. } => "Visit updated",
            });
            visit
        }
        Err(e) => {
            report.fail("Failed to save visit", &e);
            return report;
        }
    };

    let next = submission
        .application_status
        .filter(|s| *s != submission.current_application_status);
    if let Some(status) = next {
        let body = ApplicationStatusUpdate {
            status,
            updated_by: Some(acting_user.to_string()),
        };
        match api
            .update_application_status(submission.application_id, &body)
            .await
        {
            Ok(_) => report.success(format!("Application marked {status}")),
            Err(e) => report.fail("Visit saved but the application status was not updated", &e),
        }
    }

    report.finish(visit)
}

pub async fn open_new_visit(
    ctx: &AppContext,
    application_id: i64,
) -> Result<FormSession<VisitForm>, AppError> {
    let (application, lookups) = tokio::try_join!(
        ctx.api.get_application(application_id),
        VisitLookups::fetch(&ctx.api)
    )?;
    Ok(FormSession::open(VisitForm::new(application, lookups)))
}

pub async fn open_visit(
    ctx: &AppContext,
    application: Application,
    visit: &ApplicationVisit,
) -> Result<FormSession<VisitForm>, AppError> {
    let lookups = VisitLookups::fetch(&ctx.api).await?;
    Ok(FormSession::open(VisitForm::edit(application, visit, lookups)))
}

impl FormSession<VisitForm> {
    pub async fn save(
        &mut self,
        ctx: &AppContext,
        on_save: impl FnOnce(&ApplicationVisit),
    ) -> FormPhase {
        self.run(
            VisitForm::validate,
            |submission| submit_visit(&ctx.api, submission, ctx.acting_user()),
            on_save,
        )
        .await
    }
}

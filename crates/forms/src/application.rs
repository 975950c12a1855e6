use api_client::ApiClient;
use shared_types::{AppError, Application, ApplicationRequest, ApplicationStatus};

use crate::applicant::ApplicantFields;
use crate::context::{AppContext, ValidationContext};
use crate::fields::{required_choice, FieldErrors};
use crate::filter::option_names;
use crate::lookups::ApplicationLookups;
use crate::outcome::SubmitReport;
use crate::session::{FormMode, FormPhase, FormSession};

/// The new/edit application modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationForm {
    pub mode: FormMode,
    pub applicant: ApplicantFields,
    pub status: Option<ApplicationStatus>,
    pub terms_and_conditions: bool,
    initial_status: Option<ApplicationStatus>,
    lookups: ApplicationLookups,
}

/// A validated application, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSubmission {
    pub mode: FormMode,
    pub request: ApplicationRequest,
}

impl ApplicationForm {
    /// Blank form. New applications start as `pending`.
    pub fn new(lookups: ApplicationLookups) -> Self {
        Self {
            mode: FormMode::Create,
            applicant: ApplicantFields::default(),
            status: Some(ApplicationStatus::Pending),
            terms_and_conditions: false,
            initial_status: Some(ApplicationStatus::Pending),
            lookups,
        }
    }

    pub fn edit(app: &Application, lookups: ApplicationLookups) -> Self {
        Self {
            mode: FormMode::Edit { id: app.id },
            applicant: ApplicantFields::from_application(app),
            status: Some(app.status),
            terms_and_conditions: app.terms_and_conditions,
            initial_status: Some(app.status),
            lookups,
        }
    }

    pub fn lookups(&self) -> &ApplicationLookups {
        &self.lookups
    }

    pub fn region_options(&self) -> Vec<String> {
        option_names(&self.lookups.address.regions)
    }

    pub fn city_options(&self) -> Vec<String> {
        option_names(self.applicant.address.city_options(&self.lookups.address))
    }

    pub fn barangay_options(&self) -> Vec<String> {
        option_names(self.applicant.address.barangay_options(&self.lookups.address))
    }

    pub fn location_options(&self) -> Vec<String> {
        option_names(self.applicant.address.location_options(&self.lookups.address))
    }

    pub fn plan_options(&self) -> Vec<String> {
        option_names(&self.lookups.plans)
    }

    pub fn validate(&self, ctx: ValidationContext) -> Result<ApplicationSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();
        let applicant =
            self.applicant
                .validate(&mut errors, &self.lookups.address, &self.lookups.plans);

        let status = required_choice(&mut errors, "status", "a status", self.status);
        if status != self.initial_status && !ctx.role.can_change_status() {
            errors.insert("status", "Only office staff can change the status");
        }

        if self.mode == FormMode::Create && !self.terms_and_conditions {
            errors.insert(
                "terms_and_conditions",
                "You must accept the terms and conditions",
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        let (Some(a), Some(status)) = (applicant, status) else {
            return Err(errors);
        };
        Ok(ApplicationSubmission {
            mode: self.mode,
            request: ApplicationRequest {
                first_name: a.first_name,
                middle_initial: a.middle_initial,
                last_name: a.last_name,
                mobile_number: a.mobile_number,
                secondary_mobile_number: a.secondary_mobile_number,
                email: a.email,
                region: a.region,
                city: a.city,
                barangay: a.barangay,
                location: a.location,
                street_address: a.street_address,
                landmark: a.landmark,
                desired_plan: a.desired_plan,
                promo: a.promo,
                status,
                terms_and_conditions: self.terms_and_conditions,
                created_by: None,
                updated_by: None,
            },
        })
    }
}

/// Create sends one `POST /applications`; edit sends `PUT /applications/{id}`.
#[tracing::instrument(skip(api, submission), fields(mode = ?submission.mode))]
pub async fn submit_application(
    api: &ApiClient,
    submission: ApplicationSubmission,
    acting_user: &str,
) -> SubmitReport<Application> {
    let mut report = SubmitReport::new();
    let mut request = submission.request;

    let result = match submission.mode {
        FormMode::Create => {
            request.created_by = Some(acting_user.to_string());
            api.create_application(&request).await
        }
        FormMode::Edit { id } => {
            request.updated_by = Some(acting_user.to_string());
            api.update_application(id, &request).await
        }
    };

    match result {
        Ok(app) => {
            report.success(format!("Application for {} saved", app.full_name()));
            report.finish(app)
        }
        Err(e) => {
            report.fail("Failed to save application", &e);
            report
        }
    }
}

/// Open a blank application form with its lookups loaded.
pub async fn open_new_application(
    ctx: &AppContext,
) -> Result<FormSession<ApplicationForm>, AppError> {
    let lookups = ApplicationLookups::fetch(&ctx.api).await?;
    Ok(FormSession::open(ApplicationForm::new(lookups)))
}

/// Open an existing application for editing.
pub async fn open_application(
    ctx: &AppContext,
    id: i64,
) -> Result<FormSession<ApplicationForm>, AppError> {
    let (app, lookups) = tokio::try_join!(
        ctx.api.get_application(id),
        ApplicationLookups::fetch(&ctx.api)
    )?;
    Ok(FormSession::open(ApplicationForm::edit(&app, lookups)))
}

impl FormSession<ApplicationForm> {
    pub async fn save(&mut self, ctx: &AppContext, on_save: impl FnOnce(&Application)) -> FormPhase {
        let rules = ctx.validation();
        self.run(
            |form| form.validate(rules),
            |submission| submit_application(&ctx.api, submission, ctx.acting_user()),
            on_save,
        )
        .await
    }
}

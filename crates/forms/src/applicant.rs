use shared_types::{Application, JobOrder, Plan};

use crate::fields::{is_valid_email, is_valid_mobile, non_empty, required, FieldErrors};
use crate::filter::AddressSelection;
use crate::lookups::AddressLists;

/// Applicant block shared by the application and job order forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantFields {
    pub first_name: String,
    pub middle_initial: String,
    pub last_name: String,
    pub mobile_number: String,
    pub secondary_mobile_number: String,
    pub email: String,
    pub address: AddressSelection,
    pub street_address: String,
    pub landmark: String,
    pub desired_plan: String,
    pub promo: String,
}

/// A validated applicant block. Blank optionals are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub mobile_number: String,
    pub secondary_mobile_number: Option<String>,
    pub email: String,
    pub region: String,
    pub city: String,
    pub barangay: String,
    pub location: Option<String>,
    pub street_address: String,
    pub landmark: Option<String>,
    pub desired_plan: String,
    pub promo: Option<String>,
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

impl ApplicantFields {
    pub fn from_application(app: &Application) -> Self {
        Self {
            first_name: app.first_name.clone(),
            middle_initial: text(app.middle_initial.as_deref()),
            last_name: app.last_name.clone(),
            mobile_number: app.mobile_number.clone(),
            secondary_mobile_number: text(app.secondary_mobile_number.as_deref()),
            email: app.email.clone(),
            address: AddressSelection::new(
                &app.region,
                &app.city,
                &app.barangay,
                app.location.as_deref(),
            ),
            street_address: app.street_address.clone(),
            landmark: text(app.landmark.as_deref()),
            desired_plan: app.desired_plan.clone(),
            promo: text(app.promo.as_deref()),
        }
    }

    pub fn from_job_order(job_order: &JobOrder) -> Self {
        Self {
            first_name: job_order.first_name.clone(),
            middle_initial: text(job_order.middle_initial.as_deref()),
            last_name: job_order.last_name.clone(),
            mobile_number: job_order.mobile_number.clone(),
            secondary_mobile_number: text(job_order.secondary_mobile_number.as_deref()),
            email: job_order.email.clone(),
            address: AddressSelection::new(
                &job_order.region,
                &job_order.city,
                &job_order.barangay,
                job_order.location.as_deref(),
            ),
            street_address: job_order.street_address.clone(),
            landmark: String::new(),
            desired_plan: job_order.desired_plan.clone(),
            promo: text(job_order.promo.as_deref()),
        }
    }

    /// Record this block's errors into `errors`. Returns the validated block
    /// only when it added none.
    pub fn validate(
        &self,
        errors: &mut FieldErrors,
        address_lists: &AddressLists,
        plans: &[Plan],
    ) -> Option<Applicant> {
        let before = errors.len();

        let first_name = required(errors, "first_name", "First name", &self.first_name);
        let last_name = required(errors, "last_name", "Last name", &self.last_name);

        let mobile_number = required(errors, "mobile_number", "Mobile number", &self.mobile_number);
        // Contact rules see the value as typed, surrounding spaces included.
        if mobile_number.is_some() && !is_valid_mobile(&self.mobile_number) {
            errors.insert("mobile_number", "Enter a 10 or 11 digit mobile number");
        }
        let secondary_mobile_number = non_empty(&self.secondary_mobile_number);
        if secondary_mobile_number.is_some() && !is_valid_mobile(&self.secondary_mobile_number) {
            errors.insert(
                "secondary_mobile_number",
                "Enter a 10 or 11 digit mobile number",
            );
        }

        let email = required(errors, "email", "Email", &self.email);
        if email.is_some() && !is_valid_email(&self.email) {
            errors.insert("email", "Enter a valid email address");
        }

        let region = required(errors, "region", "Region", &self.address.region);
        let city = required(errors, "city", "City", &self.address.city);
        let barangay = required(errors, "barangay", "Barangay", &self.address.barangay);
        for field in self.address.stale_fields(address_lists) {
            errors.insert(field, format!("Select a {field} from the list"));
        }
        let street_address = required(
            errors,
            "street_address",
            "Street address",
            &self.street_address,
        );

        let desired_plan = required(errors, "desired_plan", "Desired plan", &self.desired_plan);
        if let Some(plan) = desired_plan.as_deref() {
            if !plans.is_empty() && !plans.iter().any(|p| p.name == plan) {
                errors.insert("desired_plan", "Select a plan from the list");
            }
        }

        if errors.len() != before {
            return None;
        }
        Some(Applicant {
            first_name: first_name?,
            middle_initial: non_empty(&self.middle_initial),
            last_name: last_name?,
            mobile_number: mobile_number?,
            secondary_mobile_number,
            email: email?,
            region: region?,
            city: city?,
            barangay: barangay?,
            location: non_empty(&self.address.location),
            street_address: street_address?,
            landmark: non_empty(&self.landmark),
            desired_plan: desired_plan?,
            promo: non_empty(&self.promo),
        })
    }
}

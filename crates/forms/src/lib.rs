//! Form state, validation and submit sequencing for the field-ops app.
//!
//! Each modal is a [`FormSession`] over a form record. Validators are pure
//! functions of the form; submit functions run their backend steps in
//! order through the shared [`api_client::ApiClient`].

pub mod applicant;
pub mod application;
pub mod context;
pub mod fields;
pub mod filter;
pub mod job_order;
pub mod line_items;
pub mod lookups;
pub mod network_assets;
pub mod outcome;
pub mod photos;
pub mod service_order;
pub mod session;
pub mod visit;

pub use context::{AppContext, Theme, ValidationContext};
pub use fields::FieldErrors;
pub use outcome::{Outcome, OutcomeLevel, SubmitReport};
pub use session::{FormMode, FormPhase, FormSession};

//! The job order modal: installation status, onsite results, evidence
//! photos and consumed items.
//!
//! Validation turns the loose form into a [`JobOrderStage`], where each
//! variant carries exactly the fields its status requires. The update
//! payload is built from the stage, so a field the stage does not own is
//! always sent as null.

use api_client::ApiClient;
use chrono::NaiveDate;
use shared_types::{
    AppError, AppErrorKind, ConnectionType, JobOrder, JobOrderImage, JobOrderItem, JobOrderStatus,
    JobOrderUpdate, OnsiteStatus, PhotoAttachment,
};

use crate::applicant::{Applicant, ApplicantFields};
use crate::context::{AppContext, ValidationContext};
use crate::fields::{non_empty, required, required_choice, Crew, CrewFields, FieldErrors};
use crate::filter::{option_names, NetworkSelection};
use crate::line_items::{sync_items, validate_rows, ItemRow, JobOrderItems};
use crate::lookups::JobOrderLookups;
use crate::outcome::SubmitReport;
use crate::photos::PhotoSlots;
use crate::session::{FormPhase, FormSession};

// ── Validated shape ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum JobOrderStage {
    ForConfirmation,
    Cancelled { status_remarks: Option<String> },
    Confirmed(OnsiteOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OnsiteOutcome {
    InProgress,
    Done(Box<Installation>),
    Failed {
        onsite_remarks: String,
        status_remarks: String,
    },
    Reschedule {
        crew: Crew,
        onsite_remarks: String,
        status_remarks: String,
    },
}

/// A completed install.
#[derive(Debug, Clone, PartialEq)]
pub struct Installation {
    pub date_installed: NaiveDate,
    pub usage_type: String,
    /// `"lat, lng"`
    pub coordinates: String,
    pub connection: Connection,
    pub router_model: String,
    pub modem_sn: String,
    pub crew: Crew,
    pub onsite_remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    Antenna { ip: String },
    Fiber { lcpnap: String, port: String, vlan: String },
    Local,
}

impl Connection {
    pub fn connection_type(&self) -> ConnectionType {
        match self {
            Connection::Antenna { .. } => ConnectionType::Antenna,
            Connection::Fiber { .. } => ConnectionType::Fiber,
            Connection::Local => ConnectionType::Local,
        }
    }
}

impl JobOrderStage {
    pub fn status(&self) -> JobOrderStatus {
        match self {
            JobOrderStage::ForConfirmation => JobOrderStatus::ForConfirmation,
            JobOrderStage::Cancelled { .. } => JobOrderStatus::Cancelled,
            JobOrderStage::Confirmed(_) => JobOrderStatus::Confirmed,
        }
    }

    pub fn onsite_status(&self) -> Option<OnsiteStatus> {
        match self {
            JobOrderStage::Confirmed(outcome) => Some(match outcome {
                OnsiteOutcome::InProgress => OnsiteStatus::InProgress,
                OnsiteOutcome::Done(_) => OnsiteStatus::Done,
                OnsiteOutcome::Failed { .. } => OnsiteStatus::Failed,
                OnsiteOutcome::Reschedule { .. } => OnsiteStatus::Reschedule,
            }),
            _ => None,
        }
    }

    pub fn installation(&self) -> Option<&Installation> {
        match self {
            JobOrderStage::Confirmed(OnsiteOutcome::Done(install)) => Some(install),
            _ => None,
        }
    }
}

/// A validated job order, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOrderSubmission {
    pub id: i64,
    pub applicant: Applicant,
    pub stage: JobOrderStage,
    pub group: Option<String>,
    pub items: Vec<ItemRow>,
    pub photos: Vec<PhotoAttachment>,
}

impl JobOrderSubmission {
    pub fn to_update(&self, updated_by: Option<String>) -> JobOrderUpdate {
        let a = &self.applicant;
        let mut update = JobOrderUpdate {
            first_name: a.first_name.clone(),
            middle_initial: a.middle_initial.clone(),
            last_name: a.last_name.clone(),
            mobile_number: a.mobile_number.clone(),
            secondary_mobile_number: a.secondary_mobile_number.clone(),
            email: a.email.clone(),
            region: a.region.clone(),
            city: a.city.clone(),
            barangay: a.barangay.clone(),
            location: a.location.clone(),
            street_address: a.street_address.clone(),
            desired_plan: a.desired_plan.clone(),
            promo: a.promo.clone(),
            status: Some(self.stage.status()),
            onsite_status: self.stage.onsite_status(),
            group: self.group.clone(),
            updated_by,
            ..Default::default()
        };

        match &self.stage {
            JobOrderStage::ForConfirmation => {}
            JobOrderStage::Cancelled { status_remarks } => {
                update.status_remarks = status_remarks.clone();
            }
            JobOrderStage::Confirmed(OnsiteOutcome::InProgress) => {}
            JobOrderStage::Confirmed(OnsiteOutcome::Failed {
                onsite_remarks,
                status_remarks,
            }) => {
                update.onsite_remarks = Some(onsite_remarks.clone());
                update.status_remarks = Some(status_remarks.clone());
            }
            JobOrderStage::Confirmed(OnsiteOutcome::Reschedule {
                crew,
                onsite_remarks,
                status_remarks,
            }) => {
                set_crew(&mut update, crew);
                update.onsite_remarks = Some(onsite_remarks.clone());
                update.status_remarks = Some(status_remarks.clone());
            }
            JobOrderStage::Confirmed(OnsiteOutcome::Done(install)) => {
                update.date_installed = Some(install.date_installed);
                update.usage_type = Some(install.usage_type.clone());
                update.coordinates = Some(install.coordinates.clone());
                update.connection_type = Some(install.connection.connection_type());
                update.router_model = Some(install.router_model.clone());
                update.modem_sn = Some(install.modem_sn.clone());
                set_crew(&mut update, &install.crew);
                update.onsite_remarks = Some(install.onsite_remarks.clone());
                match &install.connection {
                    Connection::Antenna { ip } => update.ip = Some(ip.clone()),
                    Connection::Fiber { lcpnap, port, vlan } => {
                        update.lcpnap = Some(lcpnap.clone());
                        update.port = Some(port.clone());
                        update.vlan = Some(vlan.clone());
                    }
                    Connection::Local => {}
                }
            }
        }
        update
    }
}

fn set_crew(update: &mut JobOrderUpdate, crew: &Crew) {
    update.visit_by = Some(crew.visit_by.clone());
    update.visit_with = Some(crew.visit_with.clone());
    update.visit_with_other = Some(crew.visit_with_other.clone());
}

/// `"lat, lng"` with both parts in range.
fn parse_coordinates(value: &str) -> Option<(f64, f64)> {
    let (lat, lng) = value.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)).then_some((lat, lng))
}

// ── Form ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct JobOrderForm {
    record: JobOrder,
    pub applicant: ApplicantFields,
    pub status: Option<JobOrderStatus>,
    pub onsite_status: Option<OnsiteStatus>,
    pub connection_type: Option<ConnectionType>,
    pub date_installed: Option<NaiveDate>,
    pub usage_type: String,
    pub coordinates: String,
    pub router_model: String,
    pub modem_sn: String,
    pub ip: String,
    pub network: NetworkSelection,
    pub crew: CrewFields,
    pub onsite_remarks: String,
    pub status_remarks: String,
    pub group: String,
    pub items: Vec<ItemRow>,
    pub photos: PhotoSlots<JobOrderImage>,
    lookups: JobOrderLookups,
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

impl JobOrderForm {
    pub fn new(record: JobOrder, items: Vec<JobOrderItem>, lookups: JobOrderLookups) -> Self {
        Self {
            applicant: ApplicantFields::from_job_order(&record),
            status: Some(record.status),
            onsite_status: record.onsite_status,
            connection_type: record.connection_type,
            date_installed: record.date_installed,
            usage_type: text(record.usage_type.as_deref()),
            coordinates: text(record.coordinates.as_deref()),
            router_model: text(record.router_model.as_deref()),
            modem_sn: text(record.modem_sn.as_deref()),
            ip: text(record.ip.as_deref()),
            network: NetworkSelection::new(
                record.lcpnap.as_deref(),
                record.port.as_deref(),
                record.vlan.as_deref(),
            ),
            crew: CrewFields::from_parts(
                record.visit_by.as_deref(),
                record.visit_with.as_deref(),
                record.visit_with_other.as_deref(),
            ),
            onsite_remarks: text(record.onsite_remarks.as_deref()),
            status_remarks: text(record.status_remarks.as_deref()),
            group: text(record.group.as_deref()),
            items: items
                .into_iter()
                .map(|i| ItemRow::new(i.item_name, i.quantity))
                .collect(),
            photos: PhotoSlots::default(),
            record,
            lookups,
        }
    }

    /// The job order as last loaded or saved.
    pub fn record(&self) -> &JobOrder {
        &self.record
    }

    pub fn lookups(&self) -> &JobOrderLookups {
        &self.lookups
    }

    pub fn usage_type_options(&self) -> Vec<String> {
        option_names(&self.lookups.usage_types)
    }

    pub fn lcpnap_options(&self) -> Vec<String> {
        option_names(&self.lookups.network.naps)
    }

    pub fn port_options(&self) -> Vec<String> {
        option_names(self.network.port_options(&self.lookups.network))
    }

    pub fn vlan_options(&self) -> Vec<String> {
        option_names(&self.lookups.network.vlans)
    }

    pub fn group_options(&self) -> Vec<String> {
        option_names(&self.lookups.groups)
    }

    pub fn item_options(&self) -> Vec<String> {
        option_names(&self.lookups.inventory_items)
    }

    pub fn technician_options(&self) -> Vec<String> {
        self.lookups
            .technicians
            .iter()
            .map(|t| t.display_name())
            .collect()
    }

    /// Whether the port label photo applies to the chosen connection.
    pub fn needs_port_label(&self) -> bool {
        matches!(
            self.connection_type,
            Some(ConnectionType::Antenna | ConnectionType::Local)
        )
    }

    pub fn validate(&self, ctx: ValidationContext) -> Result<JobOrderSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();
        let applicant =
            self.applicant
                .validate(&mut errors, &self.lookups.address, &self.lookups.plans);

        let status = required_choice(&mut errors, "status", "a status", self.status);
        if status.is_some_and(|s| s != self.record.status) && !ctx.role.can_change_status() {
            errors.insert("status", "Only office staff can change the status");
        }

        let installing = status == Some(JobOrderStatus::Confirmed)
            && self.onsite_status == Some(OnsiteStatus::Done);
        let items = validate_rows(&self.items, &mut errors, installing);

        let stage = match status {
            Some(JobOrderStatus::ForConfirmation) => Some(JobOrderStage::ForConfirmation),
            Some(JobOrderStatus::Cancelled) => Some(JobOrderStage::Cancelled {
                status_remarks: non_empty(&self.status_remarks),
            }),
            Some(JobOrderStatus::Confirmed) => self
                .onsite_outcome(&mut errors)
                .map(JobOrderStage::Confirmed),
            None => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        match (applicant, stage, items) {
            (Some(applicant), Some(stage), Some(items)) => Ok(JobOrderSubmission {
                id: self.record.id,
                applicant,
                stage,
                group: non_empty(&self.group),
                items,
                photos: self.photos.attachments(),
            }),
            _ => Err(errors),
        }
    }

    fn onsite_outcome(&self, errors: &mut FieldErrors) -> Option<OnsiteOutcome> {
        let onsite = required_choice(
            errors,
            "onsite_status",
            "an onsite status",
            self.onsite_status,
        )?;
        match onsite {
            OnsiteStatus::InProgress => Some(OnsiteOutcome::InProgress),
            OnsiteStatus::Done => self
                .installation(errors)
                .map(|install| OnsiteOutcome::Done(Box::new(install))),
            OnsiteStatus::Failed => {
                let onsite_remarks =
                    required(errors, "onsite_remarks", "Onsite remarks", &self.onsite_remarks);
                let status_remarks =
                    required(errors, "status_remarks", "Status remarks", &self.status_remarks);
                Some(OnsiteOutcome::Failed {
                    onsite_remarks: onsite_remarks?,
                    status_remarks: status_remarks?,
                })
            }
            OnsiteStatus::Reschedule => {
                let crew = self.crew.require_full(errors);
                let onsite_remarks =
                    required(errors, "onsite_remarks", "Onsite remarks", &self.onsite_remarks);
                let status_remarks =
                    required(errors, "status_remarks", "Status remarks", &self.status_remarks);
                Some(OnsiteOutcome::Reschedule {
                    crew: crew?,
                    onsite_remarks: onsite_remarks?,
                    status_remarks: status_remarks?,
                })
            }
        }
    }

    fn installation(&self, errors: &mut FieldErrors) -> Option<Installation> {
        let date_installed = required_choice(
            errors,
            "date_installed",
            "the installation date",
            self.date_installed,
        );

        let usage_type = required(errors, "usage_type", "Usage type", &self.usage_type);
        if let Some(usage) = usage_type.as_deref() {
            let known = &self.lookups.usage_types;
            if !known.is_empty() && !known.iter().any(|u| u.name == usage) {
                errors.insert("usage_type", "Select a usage type from the list");
            }
        }

        let coordinates = required(errors, "coordinates", "Coordinates", &self.coordinates);
        if coordinates
            .as_deref()
            .is_some_and(|c| parse_coordinates(c).is_none())
        {
            errors.insert("coordinates", "Enter coordinates as \"lat, lng\"");
        }

        let connection_type = required_choice(
            errors,
            "connection_type",
            "a connection type",
            self.connection_type,
        );
        let router_model = required(errors, "router_model", "Router model", &self.router_model);
        let modem_sn = required(errors, "modem_sn", "Modem SN", &self.modem_sn);

        for slot in JobOrderImage::REQUIRED_ON_DONE {
            self.photos.require(errors, slot, self.record.images.get(slot));
        }

        let crew = self.crew.require_full(errors);
        let onsite_remarks =
            required(errors, "onsite_remarks", "Onsite remarks", &self.onsite_remarks);
        let connection = connection_type.and_then(|ct| self.connection(ct, errors));

        Some(Installation {
            date_installed: date_installed?,
            usage_type: usage_type?,
            coordinates: coordinates?,
            connection: connection?,
            router_model: router_model?,
            modem_sn: modem_sn?,
            crew: crew?,
            onsite_remarks: onsite_remarks?,
        })
    }

    fn connection(&self, connection_type: ConnectionType, errors: &mut FieldErrors) -> Option<Connection> {
        match connection_type {
            ConnectionType::Antenna => {
                let ip = required(errors, "ip", "IP", &self.ip);
                self.photos.require(
                    errors,
                    JobOrderImage::PortLabel,
                    self.record.images.get(JobOrderImage::PortLabel),
                );
                Some(Connection::Antenna { ip: ip? })
            }
            ConnectionType::Fiber => {
                let lcpnap = required(errors, "lcpnap", "LCP-NAP", &self.network.lcpnap);
                let port = required(errors, "port", "Port", &self.network.port);
                let vlan = required(errors, "vlan", "VLAN", &self.network.vlan);
                for field in self.network.stale_fields(&self.lookups.network) {
                    errors.insert(field, format!("Select a {field} from the list"));
                }
                Some(Connection::Fiber {
                    lcpnap: lcpnap?,
                    port: port?,
                    vlan: vlan?,
                })
            }
            ConnectionType::Local => {
                self.photos.require(
                    errors,
                    JobOrderImage::PortLabel,
                    self.record.images.get(JobOrderImage::PortLabel),
                );
                Some(Connection::Local)
            }
        }
    }
}

// ── Submit ──────────────────────────────────────────────────────────

/// Save a job order in order: update, RADIUS account, photos, items.
/// A failed step stops the sequence; earlier steps stay applied.
#[tracing::instrument(skip(api, submission), fields(job_order_id = submission.id))]
pub async fn submit_job_order(
    api: &ApiClient,
    submission: JobOrderSubmission,
    acting_user: &str,
) -> SubmitReport<JobOrder> {
    let mut report = SubmitReport::new();
    let id = submission.id;

    let update = submission.to_update(Some(acting_user.to_string()));
    let mut job_order = match api.update_job_order(id, &update).await {
        Ok(job_order) => {
            report.success("Job order updated");
            job_order
        }
        Err(e) => {
            report.fail("Failed to update job order", &e);
            return report;
        }
    };

    if submission.stage.installation().is_some() {
        if job_order.has_radius_account() {
            let username = job_order.pppoe_username.as_deref().unwrap_or_default();
            report.warning(format!("RADIUS account already exists ({username})"));
        } else {
            match api.create_radius_account(id).await {
                Ok(account) => {
                    report.success(format!("RADIUS account created: {}", account.username));
                    job_order.pppoe_username = Some(account.username);
                    job_order.pppoe_password = account.password;
                }
                Err(e) if e.kind == AppErrorKind::Conflict => {
                    report.warning(format!("RADIUS account already exists: {}", e.message));
                }
                Err(e) => {
                    report.fail("Failed to create RADIUS account", &e);
                    return report.finish(job_order);
                }
            }
        }
    }

    if !submission.photos.is_empty() {
        match api.upload_job_order_images(id, &submission.photos).await {
            Ok(uploaded) => {
                for slot in JobOrderImage::ALL {
                    if let Some(url) = uploaded.url_for(slot) {
                        job_order.images.set(slot, url);
                    }
                }
                report.success(format!("{} photo(s) uploaded", submission.photos.len()));
            }
            Err(e) => {
                report.fail("Failed to upload photos", &e);
                return report.finish(job_order);
            }
        }
    }

    let store = JobOrderItems {
        api,
        job_order_id: id,
    };
    match sync_items(&store, &submission.items).await {
        Ok(summary) if summary.created + summary.deleted > 0 => report.success(format!(
            "Items saved ({} added, {} removed)",
            summary.created, summary.deleted
        )),
        Ok(_) => {}
        Err(e) => report.fail(&e.context(), e.source()),
    }

    tracing::info!(job_order_id = id, "Job order saved");
    report.finish(job_order)
}

/// Load a job order, its items and every lookup its form needs.
pub async fn open_job_order(ctx: &AppContext, id: i64) -> Result<FormSession<JobOrderForm>, AppError> {
    let (record, items, lookups) = tokio::try_join!(
        ctx.api.get_job_order(id),
        ctx.api.list_job_order_items(id),
        JobOrderLookups::fetch(&ctx.api),
    )?;
    Ok(FormSession::open(JobOrderForm::new(record, items, lookups)))
}

impl FormSession<JobOrderForm> {
    pub async fn save(&mut self, ctx: &AppContext, on_save: impl FnOnce(&JobOrder)) -> FormPhase {
        let rules = ctx.validation();
        self.run(
            |form| form.validate(rules),
            |submission| submit_job_order(&ctx.api, submission, ctx.acting_user()),
            on_save,
        )
        .await
    }
}

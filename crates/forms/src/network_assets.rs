//! Forms that add outside-plant inventory: LCPs, NAPs, ports and VLANs.

use api_client::ApiClient;
use shared_types::{
    AppError, CreateLcpRequest, CreateNapRequest, CreatePortRequest, CreateVlanRequest, Lcp, Nap,
    Port, Vlan,
};
use validator::Validate;

use crate::context::AppContext;
use crate::fields::FieldErrors;
use crate::filter::{filter_children, option_names, PortPlacement};
use crate::lookups::NetworkLists;
use crate::outcome::SubmitReport;
use crate::session::{FormPhase, FormSession};

const MAX_VLAN_ID: u16 = 4094;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Lcp,
    Nap,
    Port,
    Vlan,
}

impl AssetKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Lcp => "LCP",
            AssetKind::Nap => "NAP",
            AssetKind::Port => "Port",
            AssetKind::Vlan => "VLAN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkAssetForm {
    pub kind: AssetKind,
    /// LCP/NAP name, port label or VLAN number.
    pub name: String,
    pub placement: PortPlacement,
    lookups: NetworkLists,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewAsset {
    Lcp(CreateLcpRequest),
    Nap(CreateNapRequest),
    Port(CreatePortRequest),
    Vlan(CreateVlanRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreatedAsset {
    Lcp(Lcp),
    Nap(Nap),
    Port(Port),
    Vlan(Vlan),
}

impl CreatedAsset {
    pub fn display_name(&self) -> &str {
        match self {
            CreatedAsset::Lcp(lcp) => &lcp.name,
            CreatedAsset::Nap(nap) => &nap.name,
            CreatedAsset::Port(port) => &port.label,
            CreatedAsset::Vlan(vlan) => &vlan.value,
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl NetworkAssetForm {
    pub fn new(kind: AssetKind, lookups: NetworkLists) -> Self {
        Self {
            kind,
            name: String::new(),
            placement: PortPlacement::default(),
            lookups,
        }
    }

    pub fn lcp_options(&self) -> Vec<String> {
        option_names(&self.lookups.lcps)
    }

    pub fn nap_options(&self) -> Vec<String> {
        option_names(self.placement.nap_options(&self.lookups.naps))
    }

    pub fn validate(&self) -> Result<NewAsset, FieldErrors> {
        let name = self.name.trim().to_string();
        let (asset, field, taken) = match self.kind {
            AssetKind::Lcp => {
                let taken = self.lookups.lcps.iter().any(|l| same_name(&l.name, &name));
                (NewAsset::Lcp(CreateLcpRequest { name }), "name", taken)
            }
            AssetKind::Nap => {
                let lcp_id = self.placement.lcp_id.unwrap_or_default();
                let taken = filter_children(&self.lookups.naps, Some(lcp_id))
                    .iter()
                    .any(|n| same_name(&n.name, &name));
                (NewAsset::Nap(CreateNapRequest { name, lcp_id }), "name", taken)
            }
            AssetKind::Port => {
                let nap_id = self.placement.nap_id.unwrap_or_default();
                let taken = filter_children(&self.lookups.ports, Some(nap_id))
                    .iter()
                    .any(|p| same_name(&p.label, &name));
                (NewAsset::Port(CreatePortRequest { label: name, nap_id }), "label", taken)
            }
            AssetKind::Vlan => {
                let taken = self.lookups.vlans.iter().any(|v| same_name(&v.value, &name));
                (NewAsset::Vlan(CreateVlanRequest { value: name }), "value", taken)
            }
        };

        let mut errors = match asset.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        if let NewAsset::Vlan(vlan) = &asset {
            let in_range = vlan
                .value
                .parse::<u16>()
                .is_ok_and(|id| (1..=MAX_VLAN_ID).contains(&id));
            if !vlan.value.is_empty() && !in_range {
                errors.insert("value", format!("VLAN must be a number from 1 to {MAX_VLAN_ID}"));
            }
        }
        if taken {
            errors.insert(field, format!("{} already exists", self.kind.label()));
        }

        errors.into_result(|| asset)
    }
}

impl NewAsset {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            NewAsset::Lcp(req) => req.validate(),
            NewAsset::Nap(req) => req.validate(),
            NewAsset::Port(req) => req.validate(),
            NewAsset::Vlan(req) => req.validate(),
        }
    }
}

#[tracing::instrument(skip(api))]
pub async fn submit_network_asset(api: &ApiClient, asset: NewAsset) -> SubmitReport<CreatedAsset> {
    let mut report = SubmitReport::new();
    let created = match &asset {
        NewAsset::Lcp(req) => api.create_lcp(req).await.map(CreatedAsset::Lcp),
        NewAsset::Nap(req) => api.create_nap(req).await.map(CreatedAsset::Nap),
        NewAsset::Port(req) => api.create_port(req).await.map(CreatedAsset::Port),
        NewAsset::Vlan(req) => api.create_vlan(req).await.map(CreatedAsset::Vlan),
    };
    match created {
        Ok(created) => {
            report.success(format!("{} created", created.display_name()));
            report.finish(created)
        }
        Err(e) => {
            report.fail("Failed to create network asset", &e);
            report
        }
    }
}

pub async fn open_network_asset(
    ctx: &AppContext,
    kind: AssetKind,
) -> Result<FormSession<NetworkAssetForm>, AppError> {
    let lookups = NetworkLists::fetch(&ctx.api).await?;
    Ok(FormSession::open(NetworkAssetForm::new(kind, lookups)))
}

impl FormSession<NetworkAssetForm> {
    pub async fn save(&mut self, ctx: &AppContext, on_save: impl FnOnce(&CreatedAsset)) -> FormPhase {
        self.run(
            NetworkAssetForm::validate,
            |asset| submit_network_asset(&ctx.api, asset),
            on_save,
        )
        .await
    }
}

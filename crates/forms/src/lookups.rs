//! Reference lists a form needs before it can be edited. Each bundle is
//! fetched concurrently when the form opens.

use api_client::ApiClient;
use shared_types::{
    AppError, Barangay, City, Group, InventoryItem, Lcp, LocationDetail, Nap, Plan, Port, Region,
    Technician, UsageType, Vlan,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressLists {
    pub regions: Vec<Region>,
    pub cities: Vec<City>,
    pub barangays: Vec<Barangay>,
    pub locations: Vec<LocationDetail>,
}

impl AddressLists {
    #[tracing::instrument(skip(api))]
    pub async fn fetch(api: &ApiClient) -> Result<Self, AppError> {
        let (regions, cities, barangays, locations) = tokio::try_join!(
            api.list_regions(),
            api.list_cities(),
            api.list_barangays(),
            api.list_location_details(),
        )?;
        Ok(Self {
            regions,
            cities,
            barangays,
            locations,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkLists {
    pub lcps: Vec<Lcp>,
    pub naps: Vec<Nap>,
    pub ports: Vec<Port>,
    pub vlans: Vec<Vlan>,
}

impl NetworkLists {
    #[tracing::instrument(skip(api))]
    pub async fn fetch(api: &ApiClient) -> Result<Self, AppError> {
        let (lcps, naps, ports, vlans) = tokio::try_join!(
            api.list_lcps(),
            api.list_naps(),
            api.list_ports(),
            api.list_vlans(),
        )?;
        Ok(Self {
            lcps,
            naps,
            ports,
            vlans,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationLookups {
    pub address: AddressLists,
    pub plans: Vec<Plan>,
}

impl ApplicationLookups {
    pub async fn fetch(api: &ApiClient) -> Result<Self, AppError> {
        let (address, plans) = tokio::try_join!(AddressLists::fetch(api), api.list_plans())?;
        Ok(Self { address, plans })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitLookups {
    pub technicians: Vec<Technician>,
}

impl VisitLookups {
    pub async fn fetch(api: &ApiClient) -> Result<Self, AppError> {
        Ok(Self {
            technicians: api.list_technicians().await?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobOrderLookups {
    pub address: AddressLists,
    pub network: NetworkLists,
    pub plans: Vec<Plan>,
    pub usage_types: Vec<UsageType>,
    pub groups: Vec<Group>,
    pub inventory_items: Vec<InventoryItem>,
    pub technicians: Vec<Technician>,
}

impl JobOrderLookups {
    #[tracing::instrument(skip(api))]
    pub async fn fetch(api: &ApiClient) -> Result<Self, AppError> {
        let (address, network, plans, usage_types, groups, inventory_items, technicians) = tokio::try_join!(
            AddressLists::fetch(api),
            NetworkLists::fetch(api),
            api.list_plans(),
            api.list_usage_types(),
            api.list_groups(),
            api.list_inventory_items(),
            api.list_technicians(),
        )?;
        Ok(Self {
            address,
            network,
            plans,
            usage_types,
            groups,
            inventory_items,
            technicians,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOrderLookups {
    pub inventory_items: Vec<InventoryItem>,
    pub technicians: Vec<Technician>,
}

impl ServiceOrderLookups {
    pub async fn fetch(api: &ApiClient) -> Result<Self, AppError> {
        let (inventory_items, technicians) =
            tokio::try_join!(api.list_inventory_items(), api.list_technicians())?;
        Ok(Self {
            inventory_items,
            technicians,
        })
    }
}

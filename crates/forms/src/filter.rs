//! Dependent option lists.
//!
//! Every lookup list is fetched flat and narrowed here by its parent's id.
//! Address records are stored by name, so a parent may be referenced by
//! name and resolved against its own list first.

use shared_types::{
    Barangay, City, Group, InventoryItem, Lcp, LocationDetail, Nap, Plan, Port, Region, UsageType,
    Vlan,
};

use crate::lookups::{AddressLists, NetworkLists};

/// A pickable option.
pub trait Lookup {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

/// A lookup that belongs to exactly one parent.
pub trait ChildOf: Lookup {
    fn parent_id(&self) -> i64;
}

macro_rules! lookup {
    ($ty:ty, $name:ident) => {
        impl Lookup for $ty {
            fn id(&self) -> i64 {
                self.id
            }
            fn name(&self) -> &str {
                &self.$name
            }
        }
    };
    ($ty:ty, $name:ident, $parent:ident) => {
        lookup!($ty, $name);
        impl ChildOf for $ty {
            fn parent_id(&self) -> i64 {
                self.$parent
            }
        }
    };
}

lookup!(Region, name);
lookup!(City, name, region_id);
lookup!(Barangay, name, city_id);
lookup!(LocationDetail, name, barangay_id);
lookup!(Lcp, name);
lookup!(Nap, name, lcp_id);
lookup!(Port, label, nap_id);
lookup!(Vlan, value);
lookup!(Plan, name);
lookup!(UsageType, name);
lookup!(Group, name);
lookup!(InventoryItem, name);

/// How a form refers to the selected parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef<'a> {
    Id(i64),
    Name(&'a str),
}

impl ParentRef<'_> {
    /// Blank names count as "nothing selected".
    pub fn resolve<P: Lookup>(self, parents: &[P]) -> Option<i64> {
        match self {
            ParentRef::Id(id) => Some(id),
            ParentRef::Name(name) if name.trim().is_empty() => None,
            ParentRef::Name(name) => parents.iter().find(|p| p.name() == name).map(Lookup::id),
        }
    }
}

/// Children whose parent id equals `parent_id`, in their original order.
/// Nothing is offered until a parent is chosen. Duplicates are kept.
pub fn filter_children<C: ChildOf>(children: &[C], parent_id: Option<i64>) -> Vec<&C> {
    match parent_id {
        Some(parent_id) => children
            .iter()
            .filter(|c| c.parent_id() == parent_id)
            .collect(),
        None => Vec::new(),
    }
}

/// [`filter_children`] with the parent resolved first. An unknown parent
/// name yields no options.
pub fn children_of<'a, C: ChildOf, P: Lookup>(
    children: &'a [C],
    parents: &[P],
    parent: ParentRef<'_>,
) -> Vec<&'a C> {
    filter_children(children, parent.resolve(parents))
}

/// Display strings for a picker.
pub fn option_names<'a, T: Lookup + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<String> {
    items.into_iter().map(|i| i.name().to_string()).collect()
}

fn contains_name<T: Lookup>(items: &[T], name: &str) -> bool {
    items.iter().any(|i| i.name() == name)
}

// ── Cascading selections ────────────────────────────────────────────

/// Region → city → barangay → location, stored by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSelection {
    pub region: String,
    pub city: String,
    pub barangay: String,
    pub location: String,
}

impl AddressSelection {
    pub fn new(region: &str, city: &str, barangay: &str, location: Option<&str>) -> Self {
        Self {
            region: region.to_string(),
            city: city.to_string(),
            barangay: barangay.to_string(),
            location: location.unwrap_or_default().to_string(),
        }
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
        self.city.clear();
        self.barangay.clear();
        self.location.clear();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
        self.barangay.clear();
        self.location.clear();
    }

    pub fn set_barangay(&mut self, barangay: impl Into<String>) {
        self.barangay = barangay.into();
        self.location.clear();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn city_options<'a>(&self, lists: &'a AddressLists) -> Vec<&'a City> {
        children_of(&lists.cities, &lists.regions, ParentRef::Name(&self.region))
    }

    pub fn barangay_options<'a>(&self, lists: &'a AddressLists) -> Vec<&'a Barangay> {
        let cities = self.city_options(lists);
        let city_id = cities.iter().find(|c| c.name == self.city).map(|c| c.id);
        filter_children(&lists.barangays, city_id)
    }

    pub fn location_options<'a>(&self, lists: &'a AddressLists) -> Vec<&'a LocationDetail> {
        let barangays = self.barangay_options(lists);
        let barangay_id = barangays
            .iter()
            .find(|b| b.name == self.barangay)
            .map(|b| b.id);
        filter_children(&lists.locations, barangay_id)
    }

    /// Fields whose value is not offered under the selected parent. A level
    /// whose list has not been loaded is not checked.
    pub fn stale_fields(&self, lists: &AddressLists) -> Vec<&'static str> {
        let mut stale = Vec::new();
        if !self.region.is_empty()
            && !lists.regions.is_empty()
            && !contains_name(&lists.regions, &self.region)
        {
            stale.push("region");
        }
        if !self.city.is_empty()
            && !lists.cities.is_empty()
            && !self.city_options(lists).iter().any(|c| c.name == self.city)
        {
            stale.push("city");
        }
        if !self.barangay.is_empty()
            && !lists.barangays.is_empty()
            && !self
                .barangay_options(lists)
                .iter()
                .any(|b| b.name == self.barangay)
        {
            stale.push("barangay");
        }
        if !self.location.is_empty()
            && !lists.locations.is_empty()
            && !self
                .location_options(lists)
                .iter()
                .any(|l| l.name == self.location)
        {
            stale.push("location");
        }
        stale
    }
}

/// Fiber plant on a job order: LCP-NAP → port. VLAN has no parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSelection {
    pub lcpnap: String,
    pub port: String,
    pub vlan: String,
}

impl NetworkSelection {
    pub fn new(lcpnap: Option<&str>, port: Option<&str>, vlan: Option<&str>) -> Self {
        Self {
            lcpnap: lcpnap.unwrap_or_default().to_string(),
            port: port.unwrap_or_default().to_string(),
            vlan: vlan.unwrap_or_default().to_string(),
        }
    }

    pub fn set_lcpnap(&mut self, lcpnap: impl Into<String>) {
        self.lcpnap = lcpnap.into();
        self.port.clear();
    }

    pub fn set_port(&mut self, port: impl Into<String>) {
        self.port = port.into();
    }

    pub fn set_vlan(&mut self, vlan: impl Into<String>) {
        self.vlan = vlan.into();
    }

    pub fn port_options<'a>(&self, lists: &'a NetworkLists) -> Vec<&'a Port> {
        children_of(&lists.ports, &lists.naps, ParentRef::Name(&self.lcpnap))
    }

    pub fn stale_fields(&self, lists: &NetworkLists) -> Vec<&'static str> {
        let mut stale = Vec::new();
        if !self.lcpnap.is_empty() && !lists.naps.is_empty() && !contains_name(&lists.naps, &self.lcpnap)
        {
            stale.push("lcpnap");
        }
        if !self.port.is_empty()
            && !lists.ports.is_empty()
            && !self.port_options(lists).iter().any(|p| p.label == self.port)
        {
            stale.push("port");
        }
        if !self.vlan.is_empty() && !lists.vlans.is_empty() && !contains_name(&lists.vlans, &self.vlan)
        {
            stale.push("vlan");
        }
        stale
    }
}

/// Where a new NAP or port is being placed, by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortPlacement {
    pub lcp_id: Option<i64>,
    pub nap_id: Option<i64>,
}

impl PortPlacement {
    pub fn set_lcp(&mut self, lcp_id: Option<i64>) {
        self.lcp_id = lcp_id;
        self.nap_id = None;
    }

    pub fn set_nap(&mut self, nap_id: Option<i64>) {
        self.nap_id = nap_id;
    }

    pub fn nap_options<'a>(&self, naps: &'a [Nap]) -> Vec<&'a Nap> {
        filter_children(naps, self.lcp_id)
    }
}

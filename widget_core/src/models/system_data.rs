//! In-memory bag of domain collections a host screen has fetched.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::DataSource;

static EMPTY_METRICS: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// Domain collections keyed by [`DataSource`].
///
/// Every collection is an array of opaque JSON records, except `metrics`
/// which is a flat key to number map. Absent collections are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_orders: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customers: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendors: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plants: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_versions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_orders: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Vec<Value>>,
}

/// Collection selected by a widget's data source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedSource<'a> {
    Records(&'a [Value]),
    Metrics(&'a Map<String, Value>),
}

impl ResolvedSource<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            ResolvedSource::Records(records) => records.is_empty(),
            ResolvedSource::Metrics(metrics) => metrics.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResolvedSource::Records(records) => records.len(),
            ResolvedSource::Metrics(metrics) => metrics.len(),
        }
    }
}

impl SystemData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a data source to its collection.
    ///
    /// Total over every tag: a missing collection resolves to an empty slice
    /// (or an empty map for `metrics`), and unrecognized tags resolve to an
    /// empty slice.
    pub fn resolve(&self, source: &DataSource) -> ResolvedSource<'_> {
        if *source == DataSource::Metrics {
            return ResolvedSource::Metrics(self.metrics.as_ref().unwrap_or(&EMPTY_METRICS));
        }
        let records = self
            .slot(source)
            .and_then(|slot| slot.as_deref())
            .unwrap_or(&[]);
        ResolvedSource::Records(records)
    }

    /// Records for an array-valued source; `None` for `metrics`, unknown
    /// tags, and collections that were never fetched.
    pub fn collection(&self, source: &DataSource) -> Option<&[Value]> {
        self.slot(source).and_then(|slot| slot.as_deref())
    }

    /// Replace an array-valued collection. Returns `false` (and leaves the
    /// bag untouched) for `metrics` and unrecognized sources.
    pub fn set_collection(&mut self, source: &DataSource, records: Vec<Value>) -> bool {
        match self.slot_mut(source) {
            Some(slot) => {
                *slot = Some(records);
                true
            }
            None => false,
        }
    }

    pub fn set_metrics(&mut self, metrics: Map<String, Value>) {
        self.metrics = Some(metrics);
    }

    /// Number of records per populated source, in [`DataSource::ALL`] order.
    pub fn summary(&self) -> Vec<(DataSource, usize)> {
        DataSource::ALL
            .iter()
            .filter_map(|source| match source {
                DataSource::Metrics => self.metrics.as_ref().map(|m| (source.clone(), m.len())),
                _ => self.collection(source).map(|r| (source.clone(), r.len())),
            })
            .collect()
    }

    fn slot(&self, source: &DataSource) -> Option<&Option<Vec<Value>>> {
        let slot = match source {
            DataSource::ProductionOrders => &self.production_orders,
            DataSource::Operations => &self.operations,
            DataSource::Resources => &self.resources,
            DataSource::Customers => &self.customers,
            DataSource::Vendors => &self.vendors,
            DataSource::Plants => &self.plants,
            DataSource::Capabilities => &self.capabilities,
            DataSource::Recipes => &self.recipes,
            DataSource::ProductionVersions => &self.production_versions,
            DataSource::PlannedOrders => &self.planned_orders,
            DataSource::Users => &self.users,
            DataSource::Alerts => &self.alerts,
            DataSource::Optimization => &self.optimization,
            DataSource::Metrics | DataSource::Other(_) => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, source: &DataSource) -> Option<&mut Option<Vec<Value>>> {
        let slot = match source {
            DataSource::ProductionOrders => &mut self.production_orders,
            DataSource::Operations => &mut self.operations,
            DataSource::Resources => &mut self.resources,
            DataSource::Customers => &mut self.customers,
            DataSource::Vendors => &mut self.vendors,
            DataSource::Plants => &mut self.plants,
            DataSource::Capabilities => &mut self.capabilities,
            DataSource::Recipes => &mut self.recipes,
            DataSource::ProductionVersions => &mut self.production_versions,
            DataSource::PlannedOrders => &mut self.planned_orders,
            DataSource::Users => &mut self.users,
            DataSource::Alerts => &mut self.alerts,
            DataSource::Optimization => &mut self.optimization,
            DataSource::Metrics | DataSource::Other(_) => return None,
        };
        Some(slot)
    }
}

//! Typed cost document model.
//!
//! This is the normalized form every computation consumes. The schema-light
//! wire shape ([`crate::model::value::DocValue`]) is converted here by the
//! normalizer at each external boundary, so nothing deeper in the pipeline
//! has to re-check shapes or re-run quantity fallback chains. Quantities
//! are resolved into the item itself; the sibling `_quantity` convention
//! exists only on the wire.

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// A priced entry in a standard or custom category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    /// Unit cost per month
    pub unit_value: f64,
    /// Effective multiplier, already resolved from the wire shape
    pub quantity: f64,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Raw `count` field, kept separately because the CAC marketing-spend
    /// path multiplies by `count` only, not the full quantity chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_hint: Option<f64>,
}

impl CostItem {
    pub fn new(unit_value: f64, quantity: f64) -> Self {
        Self {
            unit_value,
            quantity,
            enabled: true,
            label: None,
            count_hint: None,
        }
    }

    /// Monthly contribution of this item; disabled items contribute zero.
    pub fn monthly_total(&self) -> f64 {
        if self.enabled {
            self.unit_value * self.quantity
        } else {
            0.0
        }
    }
}

/// A salaried or founder role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleItem {
    /// Cost per head per month
    pub unit_value: f64,
    /// Headcount
    pub count: f64,
    pub enabled: bool,
}

impl RoleItem {
    pub fn monthly_total(&self) -> f64 {
        if self.enabled {
            self.unit_value * self.count
        } else {
            0.0
        }
    }
}

/// An hourly contractor engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorItem {
    /// Hourly rate
    pub unit_value: f64,
    /// Hours per month
    pub hours: f64,
    pub enabled: bool,
}

impl ContractorItem {
    pub fn monthly_total(&self) -> f64 {
        if self.enabled {
            self.unit_value * self.hours
        } else {
            0.0
        }
    }
}

/// The contractor side of personnel. Contractors only count toward totals
/// when the pool itself is enabled, independent of per-item flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorPool {
    pub enabled: bool,
    pub types: OrdMap<String, ContractorItem>,
}

/// Salaried roles plus the contractor pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelCategory {
    pub roles: OrdMap<String, RoleItem>,
    pub contractors: ContractorPool,
}

/// One of operations, marketing, or technology.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardCategory {
    pub items: OrdMap<String, CostItem>,
}

/// A user-defined category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
    pub items: OrdMap<String, CostItem>,
}

impl CustomCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "custom".to_string(),
            enabled: true,
            items: OrdMap::new(),
        }
    }
}

/// The normalized cost document for one scenario. Every standard category
/// is present after normalization; absence on the wire means "not yet
/// created", never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostDocument {
    pub personnel: PersonnelCategory,
    pub operations: StandardCategory,
    pub marketing: StandardCategory,
    pub technology: StandardCategory,
    pub custom_categories: OrdMap<String, CustomCategory>,
}

impl CostDocument {
    /// The standard item categories in display order.
    pub fn standard_categories(&self) -> [(&'static str, &StandardCategory); 3] {
        [
            ("operations", &self.operations),
            ("marketing", &self.marketing),
            ("technology", &self.technology),
        ]
    }
}

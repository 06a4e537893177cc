//! Cost document model: wire shape, typed form, and the edits between them.

pub mod document;
pub mod mutate;
pub mod normalize;
pub mod resolve;
pub mod templates;
pub mod value;

pub use document::{
    ContractorItem, ContractorPool, CostDocument, CostItem, CustomCategory, PersonnelCategory,
    RoleItem, StandardCategory,
};
pub use mutate::{
    add_category, add_standard_category, apply, remove_category, remove_item, sanitize_key,
    set_item_value, Edit,
};
pub use normalize::{export, normalize};
pub use resolve::{resolve_item_quantity, resolve_quantity, ItemKind, DEFAULT_CONTRACTOR_HOURS};
pub use templates::{default_cost_structure, standard_category_template, STANDARD_CATEGORIES};
pub use value::DocValue;

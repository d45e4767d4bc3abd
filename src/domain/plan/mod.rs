//! Plan domain: the closed plan set, the static catalog, and resolution
//! from webhook payloads.

pub mod catalog;
pub mod kind;
pub mod resolver;

pub use catalog::{PlanCatalog, PlanDetails};
pub use kind::PlanKind;
pub use resolver::{identify_plan, resolve_plan};

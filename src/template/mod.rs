//! Templates: canonical, parameterized subtree shapes
//!
//! A [`Template`] is shared by every source node with the same structure. Its
//! attribute values and text children are [`Placeholder`]s, and each concrete
//! occurrence supplies literal values through its [`NodeParams`].
//!
//! Templates live in a [`TemplateRegistry`] arena and refer to each other by
//! [`TemplateId`], so flipping `inline` or renaming one is seen by every call
//! site at once.
//!
//! # Example
//!
//! ```text
//! T1: li[class="item"]{$1}
//!
//! ul{T1("first")T1("second")}
//! ```

mod model;
mod params;
mod registry;
mod render;

pub use model::{Placeholder, Template, TemplateChild, TemplateId};
pub use params::{NodeId, NodeParams, NodeRecord, ParamChild};
pub use registry::TemplateRegistry;
pub use render::TemplateRenderer;

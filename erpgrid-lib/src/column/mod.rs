//! Columns: descriptors, the validated registry, and the order controller.

mod descriptor;
mod order;
mod registry;

pub use descriptor::*;
pub use order::*;
pub use registry::*;

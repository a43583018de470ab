//! Cell selection: reference codec, set algebra and live tables.

pub mod algebra;
pub mod reference;

mod live;
mod registry;

pub use algebra::{Axis, Extreme};
pub use live::{Iter, LiveTable};
pub use reference::{
    CellRange, from_reference, range_to_reference, reference_to_cells, reference_to_cells_with_limit, to_reference,
};
pub use registry::TableRegistry;

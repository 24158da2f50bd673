mod inflection;
mod schema_build;
mod type_mapping_registry;

pub use inflection::*;
pub use schema_build::*;
pub use type_mapping_registry::*;

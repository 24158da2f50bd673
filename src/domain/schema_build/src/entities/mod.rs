mod gql_scalar;
mod pg_type_oid;
mod relation_descriptor;

pub use gql_scalar::*;
pub use pg_type_oid::*;
pub use relation_descriptor::*;

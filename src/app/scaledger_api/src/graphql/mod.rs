pub mod entity;
pub mod executor;
pub mod handlers;
pub mod prelude;
pub mod root;
pub mod scalars;
pub mod schema;
pub mod subscriptions;

pub use executor::{ApiExecutor, DeliveryErrors};
pub use handlers::router;
pub use schema::{Schema, SchemaAssemblyError, SchemaDeps, build_schema, export_sdl};
pub use subscriptions::SubscriptionTopic;

mod entity_row;
mod notification_event;
mod subject_id;
mod subscription_payload;
mod target_relation;

pub use entity_row::*;
pub use notification_event::*;
pub use subject_id::*;
pub use subscription_payload::*;
pub use target_relation::*;

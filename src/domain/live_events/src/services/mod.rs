mod event_payload_resolver;
mod notification_hub;
mod scoped_row_reader;

pub use event_payload_resolver::*;
pub use notification_hub::*;
pub use scoped_row_reader::*;

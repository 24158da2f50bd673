mod pg_catalog;
mod pg_connection;
mod pg_notification_listener;
mod pg_scoped_row_reader;
mod sql;

pub use pg_catalog::*;
pub use pg_connection::*;
pub use pg_notification_listener::*;
pub use pg_scoped_row_reader::*;
pub use sql::*;

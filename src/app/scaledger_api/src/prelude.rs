pub use crate::app::App;
pub use crate::config::Config;
pub use crate::metrics::ApiMetrics;

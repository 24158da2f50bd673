pub mod entities;
pub mod hooks;
pub mod services;

pub use entities::*;
pub use hooks::*;
pub use services::*;

mod catalog_client;
mod logger;

pub use catalog_client::init_catalog_client;
pub use logger::{Verbosity, init_logger};

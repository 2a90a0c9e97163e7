pub mod entities;
pub mod responses;

pub use entities::{ImportPolicy, ImportTarget};
pub use responses::ImportSummary;

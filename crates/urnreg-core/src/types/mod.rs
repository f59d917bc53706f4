//! Core URN registry types.
//!
//! Identifier types are deliberately unvalidated wrappers: the registry
//! service is the sole authority on URN, series, and target syntax.
//! Only the endpoint address is validated locally, at construction time.

mod registry_url;
mod series;
mod target;
mod urn;

pub use registry_url::RegistryUrl;
pub use series::SeriesCode;
pub use target::TargetUrl;
pub use urn::Urn;

#[allow(clippy::module_inception)]
mod catalog;
mod load;
mod track;

pub use catalog::Catalog;
pub use load::{load_catalog, read_tracks, CatalogLoadError};
pub use track::{AudioDescriptors, Descriptor, Track};

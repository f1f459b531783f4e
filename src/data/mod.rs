pub mod conversion;
pub mod formats;

pub use conversion::{CoordinateMapping, MappingConfig, WorldMappingConfig};
pub use formats::{ImageDescriptor, MapDefinition, MarkerRecord};

pub mod chromosome;
pub mod entity;
pub mod interval;
pub mod record;
pub mod vocab;

// re-export for cleaner imports
pub use self::chromosome::Chromosome;
pub use self::entity::{Entity, FixedCoordinates};
pub use self::interval::{ConsolidatedLine, Interval};
pub use self::record::ExternalCoordinateRecord;
pub use self::vocab::{Analysis, Class, GenomeBuild};

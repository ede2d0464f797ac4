pub mod path;
pub mod style;
pub mod grouping;
pub mod mapper;

pub use path::{connection_path, CurveClass, PathCommand, PathDescriptor, Point};
pub use style::{ConnectionStyle, StyleTable, StyleTemplate};
pub use mapper::{density_factor, ConnectionLine, ConnectionMapper, ConnectionStatistics, Position};

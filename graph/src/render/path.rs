//! Backend-agnostic path descriptors and the curve geometry for each
//! relationship type.

use crate::core::RelationshipType;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(a: Point, b: Point) -> Self {
        Self::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }
}

/// A single drawing instruction with absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadraticTo { control: Point, to: Point },
    CubicTo { control1: Point, control2: Point, to: Point },
}

impl PathCommand {
    pub fn is_curve(&self) -> bool {
        matches!(self, PathCommand::QuadraticTo { .. } | PathCommand::CubicTo { .. })
    }

    pub fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo { to }
            | PathCommand::LineTo { to }
            | PathCommand::QuadraticTo { to, .. }
            | PathCommand::CubicTo { to, .. } => to,
        }
    }
}

/// Ordered drawing commands for one connection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathDescriptor {
    commands: SmallVec<[PathCommand; 2]>,
}

impl PathDescriptor {
    pub fn straight(from: Point, to: Point) -> Self {
        Self::from_commands([PathCommand::MoveTo { to: from }, PathCommand::LineTo { to }])
    }

    pub fn quadratic(from: Point, control: Point, to: Point) -> Self {
        Self::from_commands([
            PathCommand::MoveTo { to: from },
            PathCommand::QuadraticTo { control, to },
        ])
    }

    pub fn cubic(from: Point, control1: Point, control2: Point, to: Point) -> Self {
        Self::from_commands([
            PathCommand::MoveTo { to: from },
            PathCommand::CubicTo { control1, control2, to },
        ])
    }

    pub fn from_commands(commands: impl IntoIterator<Item = PathCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_curved(&self) -> bool {
        self.commands.iter().any(PathCommand::is_curve)
    }

    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::end)
    }
}

/// SVG path data, for text output and debugging
impl fmt::Display for PathDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo { to } => write!(f, "M {} {}", to.x, to.y)?,
                PathCommand::LineTo { to } => write!(f, "L {} {}", to.x, to.y)?,
                PathCommand::QuadraticTo { control, to } => {
                    write!(f, "Q {} {} {} {}", control.x, control.y, to.x, to.y)?
                }
                PathCommand::CubicTo { control1, control2, to } => write!(
                    f,
                    "C {} {} {} {} {} {}",
                    control1.x, control1.y, control2.x, control2.y, to.x, to.y
                )?,
            }
        }
        Ok(())
    }
}

/// How strongly a connection bows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveClass {
    None,
    Gentle,
    Strong,
}

impl CurveClass {
    /// Multiplier applied to the configured intensity; `None` means no curve at all
    pub fn intensity_factor(&self) -> Option<f64> {
        match self {
            CurveClass::None => None,
            CurveClass::Gentle => Some(0.7),
            CurveClass::Strong => Some(1.5),
        }
    }
}

/// Build the path for a connection between `from` (source event) and `to` (target event).
///
/// x is time and y is lane. Vertical connections and `CurveClass::None` are
/// always straight.
pub fn connection_path(
    from: Point,
    to: Point,
    relationship_type: RelationshipType,
    curve: CurveClass,
    curve_intensity: f64,
) -> PathDescriptor {
    let Some(factor) = curve.intensity_factor() else {
        return PathDescriptor::straight(from, to);
    };
    if from.x == to.x {
        return PathDescriptor::straight(from, to);
    }

    let intensity = curve_intensity * factor;
    let dx = to.x - from.x;
    let bow = dx.abs() * intensity * 0.5;
    let mid = Point::midpoint(from, to);

    match relationship_type {
        RelationshipType::ParentChild if from.y == to.y => {
            // Bulge against the direction of travel
            let control = Point::new(mid.x, from.y - dx * intensity * 0.5);
            PathDescriptor::quadratic(from, control, to)
        }
        RelationshipType::ParentChild => {
            // S-curve: leave and enter horizontally on each lane
            let control1 = Point::new(from.x + dx * intensity, from.y);
            let control2 = Point::new(to.x - dx * intensity, to.y);
            PathDescriptor::cubic(from, control1, control2, to)
        }
        RelationshipType::MergeSource => {
            let control = Point::new(mid.x, from.y.min(to.y) - bow);
            PathDescriptor::quadratic(from, control, to)
        }
        RelationshipType::MergeTarget => {
            let control = Point::new(mid.x, from.y.max(to.y) + bow);
            PathDescriptor::quadratic(from, control, to)
        }
        RelationshipType::BranchCreation => {
            let control = Point::new(from.x + dx * intensity * 0.5, from.y + (to.y - from.y) * 0.3);
            PathDescriptor::quadratic(from, control, to)
        }
        RelationshipType::TagReference => {
            let control = Point::new(mid.x, mid.y - bow);
            PathDescriptor::quadratic(from, control, to)
        }
    }
}

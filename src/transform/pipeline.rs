//! # Transform Pipelines
//!
//! Serializable transform commands and ordered lists of them.
//!
//! A pipeline is the data form of a chain of transforms: it can be written in
//! JSON, built from compact text like `rotate:90`, and compiled into a single
//! homogeneous matrix for either 2D or 3D.

use super::{planar, spatial, Dimension};
use crate::{AngleUnit, Axis, MathResult, Matrix, PandaMathError, Transformable, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

fn one() -> f64 {
    1.0
}

/// A single transform command.
///
/// Angles are stored in degrees so hand-written JSON stays readable.
///
/// # Examples
///
/// ```
/// use panda_math::TransformOp;
///
/// let op: TransformOp = serde_json::from_str(r#"{ "op": "rotate", "degrees": 90.0 }"#).unwrap();
/// assert_eq!(op, "rotate:90".parse().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    /// Move by an offset; `z` is ignored in 2D
    Translate {
        x: f64,
        y: f64,
        #[serde(default)]
        z: f64,
    },
    /// Scale per axis; `z` is ignored in 2D
    Scale {
        x: f64,
        y: f64,
        #[serde(default = "one")]
        z: f64,
    },
    /// Rotate about a principal axis; only Z is meaningful in 2D
    Rotate {
        #[serde(default)]
        axis: Axis,
        degrees: f64,
    },
    /// 2D shear
    Shear { x: f64, y: f64 },
    /// Arbitrary homogeneous matrix given as rows
    #[serde(rename = "matrix")]
    Custom { rows: Vec<Vec<f64>> },
}

impl TransformOp {
    /// Homogeneous matrix for this command in the given dimension.
    pub fn to_matrix(&self, dimension: Dimension) -> MathResult<Matrix> {
        match (self, dimension) {
            (TransformOp::Translate { x, y, .. }, Dimension::Two) => {
                Ok(planar::translation(Vec2::new(*x, *y)))
            }
            (TransformOp::Translate { x, y, z }, Dimension::Three) => {
                Ok(spatial::translation(Vec3::new(*x, *y, *z)))
            }
            (TransformOp::Scale { x, y, .. }, Dimension::Two) => {
                Ok(planar::scaling(Vec2::new(*x, *y)))
            }
            (TransformOp::Scale { x, y, z }, Dimension::Three) => {
                Ok(spatial::scaling(Vec3::new(*x, *y, *z)))
            }
            (TransformOp::Rotate { axis: Axis::Z, degrees }, Dimension::Two) => {
                Ok(planar::rotation(degrees.to_radians()))
            }
            (TransformOp::Rotate { axis, .. }, Dimension::Two) => {
                Err(PandaMathError::InvalidArgument(format!(
                    "2D rotation must be about the z axis, got {}",
                    axis
                )))
            }
            (TransformOp::Rotate { axis, degrees }, Dimension::Three) => {
                let angle = degrees.to_radians();
                Ok(match axis {
                    Axis::X => spatial::rotation_x(angle),
                    Axis::Y => spatial::rotation_y(angle),
                    Axis::Z => spatial::rotation_z(angle),
                })
            }
            (TransformOp::Shear { x, y }, Dimension::Two) => Ok(planar::shear(*x, *y)),
            (TransformOp::Shear { .. }, Dimension::Three) => Err(PandaMathError::InvalidArgument(
                "shear is only supported in 2D".to_string(),
            )),
            (TransformOp::Custom { rows }, _) => {
                let matrix = Matrix::from_rows(rows)?;
                let size = dimension.homogeneous_size();
                matrix.require_shape(size, size, "custom transform")?;
                Ok(matrix)
            }
        }
    }

    /// Parses the compact text form, reading angles in `unit`.
    ///
    /// Accepted forms: `translate:x,y[,z]`, `scale:s`, `scale:x,y[,z]`,
    /// `rotate:a` (about Z), `rotate-x:a`, `rotate-y:a`, `rotate-z:a`,
    /// `shear:x,y`, and `matrix:a,b,c;d,e,f;...` with rows separated by `;`.
    pub fn parse_with_unit(text: &str, unit: AngleUnit) -> MathResult<Self> {
        let (name, args) = text.split_once(':').ok_or_else(|| {
            PandaMathError::Parse(format!("expected '<op>:<values>', got '{}'", text))
        })?;
        let name = name.trim().to_lowercase();
        if name == "matrix" {
            let rows = args
                .split(';')
                .map(|row| parse_numbers(row, text))
                .collect::<MathResult<Vec<_>>>()?;
            return Ok(TransformOp::Custom { rows });
        }
        let values = parse_numbers(args, text)?;
        let degrees = |value: f64| match unit {
            AngleUnit::Degrees => value,
            AngleUnit::Radians => value.to_degrees(),
        };
        let arity_error = || {
            PandaMathError::Parse(format!(
                "wrong number of values for '{}' in '{}'",
                name, text
            ))
        };

        match (name.as_str(), values.as_slice()) {
            ("translate", [x, y]) => Ok(TransformOp::Translate { x: *x, y: *y, z: 0.0 }),
            ("translate", [x, y, z]) => Ok(TransformOp::Translate { x: *x, y: *y, z: *z }),
            ("scale", [s]) => Ok(TransformOp::Scale { x: *s, y: *s, z: *s }),
            ("scale", [x, y]) => Ok(TransformOp::Scale { x: *x, y: *y, z: 1.0 }),
            ("scale", [x, y, z]) => Ok(TransformOp::Scale { x: *x, y: *y, z: *z }),
            ("rotate" | "rotate-z", [a]) => Ok(TransformOp::Rotate {
                axis: Axis::Z,
                degrees: degrees(*a),
            }),
            ("rotate-x", [a]) => Ok(TransformOp::Rotate {
                axis: Axis::X,
                degrees: degrees(*a),
            }),
            ("rotate-y", [a]) => Ok(TransformOp::Rotate {
                axis: Axis::Y,
                degrees: degrees(*a),
            }),
            ("shear", [x, y]) => Ok(TransformOp::Shear { x: *x, y: *y }),
            ("translate" | "scale" | "rotate" | "rotate-x" | "rotate-y" | "rotate-z" | "shear", _) => {
                Err(arity_error())
            }
            (other, _) => Err(PandaMathError::Parse(format!(
                "unknown transform '{}'",
                other
            ))),
        }
    }
}

/// Parses a comma-separated list of numbers; `text` is the whole op for errors.
fn parse_numbers(values: &str, text: &str) -> MathResult<Vec<f64>> {
    values
        .split(',')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|e| {
                PandaMathError::Parse(format!("invalid number '{}' in '{}': {}", part, text, e))
            })
        })
        .collect()
}

impl FromStr for TransformOp {
    type Err = PandaMathError;

    /// Parses the compact text form with angles in degrees.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_unit(s, AngleUnit::Degrees)
    }
}

impl std::fmt::Display for TransformOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformOp::Translate { x, y, z } => write!(f, "translate:{},{},{}", x, y, z),
            TransformOp::Scale { x, y, z } => write!(f, "scale:{},{},{}", x, y, z),
            TransformOp::Rotate { axis, degrees } => write!(f, "rotate-{}:{}", axis, degrees),
            TransformOp::Shear { x, y } => write!(f, "shear:{},{}", x, y),
            TransformOp::Custom { rows } => {
                let rows: Vec<String> = rows
                    .iter()
                    .map(|row| row.iter().map(f64::to_string).collect::<Vec<_>>().join(","))
                    .collect();
                write!(f, "matrix:{}", rows.join(";"))
            }
        }
    }
}

/// An ordered list of transform commands; the first command is applied first.
///
/// # Examples
///
/// ```
/// use panda_math::{Dimension, TransformPipeline, Vec2, Vector};
///
/// let pipeline = TransformPipeline::new()
///     .then("translate:1,0".parse().unwrap())
///     .then("rotate:90".parse().unwrap());
/// let points = pipeline.apply_2d(&[Vec2::ZERO]).unwrap();
/// assert!(points[0].approx_eq(Vec2::new(0.0, 1.0), 1e-12));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformPipeline {
    /// Optional label for logs and output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Commands in application order
    #[serde(default)]
    pub ops: Vec<TransformOp>,
}

impl TransformPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pipeline with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ops: Vec::new(),
        }
    }

    /// Appends a command, builder style.
    pub fn then(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn push(&mut self, op: TransformOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Compiles the pipeline into one homogeneous matrix.
    ///
    /// An empty pipeline compiles to the identity.
    pub fn to_matrix(&self, dimension: Dimension) -> MathResult<Matrix> {
        let size = dimension.homogeneous_size();
        let matrix = self
            .ops
            .iter()
            .try_fold(Matrix::identity(size), |acc, op| {
                Ok::<_, PandaMathError>(op.to_matrix(dimension)?.product(&acc))
            })?;
        log::debug!(
            "Compiled pipeline {:?} with {} ops for {:?}",
            self.name,
            self.ops.len(),
            dimension
        );
        Ok(matrix)
    }

    /// Transforms 2D points.
    pub fn apply_2d(&self, points: &[Vec2]) -> MathResult<Vec<Vec2>> {
        let matrix = self.to_matrix(Dimension::Two)?;
        points.iter().map(|p| p.transform(&matrix)).collect()
    }

    /// Transforms 3D points.
    pub fn apply_3d(&self, points: &[Vec3]) -> MathResult<Vec<Vec3>> {
        let matrix = self.to_matrix(Dimension::Three)?;
        points.iter().map(|p| p.transform(&matrix)).collect()
    }

    pub fn from_json_str(json: &str) -> MathResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a pipeline from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> MathResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> MathResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<TransformOp> for TransformPipeline {
    fn from_iter<I: IntoIterator<Item = TransformOp>>(iter: I) -> Self {
        Self {
            name: None,
            ops: iter.into_iter().collect(),
        }
    }
}

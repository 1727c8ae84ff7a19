//! # Panda Math Command Line
//!
//! Applies transform pipelines to points, runs matrix operations on JSON
//! input, and draws seeded random samples, printing JSON results.

use clap::{Parser, Subcommand, ValueEnum};
use panda_math::{
    create_rng_from_config, random_in_unit_circle, random_in_unit_sphere, random_rotation,
    random_unit_vec2, random_unit_vec3, Dimension, MathConfig, MathResult, Matrix,
    PandaMathError, TransformOp, TransformPipeline, Vec2, Vec3,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
#[cfg(not(feature = "dev-tools"))]
use log::{debug, info};
#[cfg(feature = "dev-tools")]
use tracing::{debug, info, Level};

/// Command line arguments for panda-math.
#[derive(Parser, Debug)]
#[command(name = "panda-math")]
#[command(about = "Vector, matrix, and transformation utilities for 2D/3D graphics")]
#[command(version)]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform points through a pipeline of operations
    Transform {
        /// Dimension of the points (2 or 3)
        #[arg(long, default_value = "2")]
        dim: Dimension,

        /// Transform operation, e.g. `translate:1,2` or `rotate-x:90`; applied in order
        #[arg(long = "op", allow_hyphen_values = true)]
        ops: Vec<String>,

        /// JSON pipeline file; its operations run before any `--op`
        #[arg(long)]
        pipeline: Option<PathBuf>,

        /// Point as `x,y` or `x,y,z`
        #[arg(long = "point", required = true, allow_hyphen_values = true)]
        points: Vec<String>,

        /// Include the compiled matrix in the output
        #[arg(long)]
        show_matrix: bool,
    },

    /// Run an operation on a matrix given as a JSON array of rows
    Matrix {
        /// Input file, or `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,

        #[arg(long, value_enum)]
        op: MatrixOp,
    },

    /// Draw reproducible random samples
    Sample {
        #[arg(long, value_enum)]
        kind: SampleKind,

        /// Number of samples
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Seed; overrides the configured one
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the crate version
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum MatrixOp {
    Det,
    Inverse,
    Transpose,
    Rank,
    Trace,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum SampleKind {
    /// Points on the unit circle
    UnitCircle,
    /// Points on the unit sphere
    UnitSphere,
    /// Points inside the unit disc
    InCircle,
    /// Points inside the unit ball
    InSphere,
    /// Uniform rotations as `[w, x, y, z]`
    Rotation,
}

#[derive(Serialize, Debug, PartialEq)]
struct TransformOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<Vec<Vec<f64>>>,
    points: Vec<Vec<f64>>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
enum MatrixOutput {
    Scalar { value: f64 },
    Count { value: usize },
    Matrix { matrix: Vec<Vec<f64>> },
}

#[derive(Serialize, Debug, PartialEq)]
struct SampleOutput {
    seed: u64,
    samples: Vec<Vec<f64>>,
}

fn main() -> MathResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    let config = match &args.config {
        Some(path) => MathConfig::from_json_file(path)?,
        None => MathConfig::default(),
    };
    debug!("Using configuration {:?}", config);

    match args.command {
        Command::Transform {
            dim,
            ops,
            pipeline,
            points,
            show_matrix,
        } => {
            let pipeline = build_pipeline(&config, pipeline, &ops)?;
            print_json(&run_transform(&config, dim, &pipeline, &points, show_matrix)?)
        }
        Command::Matrix { input, op } => {
            let rows = read_rows(&input)?;
            print_json(&run_matrix(&config, &rows, op)?)
        }
        Command::Sample { kind, count, seed } => {
            print_json(&run_sample(&config, kind, count, seed))
        }
        Command::Version => {
            println!("panda-math {}", panda_math::VERSION);
            Ok(())
        }
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> MathResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            other => {
                return Err(PandaMathError::InvalidArgument(format!(
                    "unknown log level '{}'",
                    other
                )))
            }
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }

    Ok(())
}

fn print_json<T: Serialize>(output: &T) -> MathResult<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

/// Loads the pipeline file, if any, then appends the `--op` operations.
fn build_pipeline(
    config: &MathConfig,
    pipeline_path: Option<PathBuf>,
    ops: &[String],
) -> MathResult<TransformPipeline> {
    let mut pipeline = match pipeline_path {
        Some(path) => TransformPipeline::from_json_file(path)?,
        None => TransformPipeline::new(),
    };
    for text in ops {
        pipeline.push(TransformOp::parse_with_unit(text, config.angle_unit)?);
    }
    Ok(pipeline)
}

fn run_transform(
    config: &MathConfig,
    dimension: Dimension,
    pipeline: &TransformPipeline,
    points: &[String],
    show_matrix: bool,
) -> MathResult<TransformOutput> {
    info!("Applying {} operations in {}", pipeline.len(), dimension);

    let coords = points
        .iter()
        .map(|text| parse_point(text, dimension))
        .collect::<MathResult<Vec<_>>>()?;

    let transformed: Vec<Vec<f64>> = match dimension {
        Dimension::Two => {
            let input: Vec<Vec2> = coords.iter().map(|c| Vec2::new(c[0], c[1])).collect();
            pipeline
                .apply_2d(&input)?
                .into_iter()
                .map(|p| p.to_array().to_vec())
                .collect()
        }
        Dimension::Three => {
            let input: Vec<Vec3> = coords
                .iter()
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect();
            pipeline
                .apply_3d(&input)?
                .into_iter()
                .map(|p| p.to_array().to_vec())
                .collect()
        }
    };

    let matrix = if show_matrix {
        Some(present_rows(config, &pipeline.to_matrix(dimension)?.to_rows()))
    } else {
        None
    };
    Ok(TransformOutput {
        matrix,
        points: present_rows(config, &transformed),
    })
}

fn read_rows(input: &str) -> MathResult<Vec<Vec<f64>>> {
    let text = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn run_matrix(config: &MathConfig, rows: &[Vec<f64>], op: MatrixOp) -> MathResult<MatrixOutput> {
    let matrix = Matrix::from_rows(rows)?;
    info!("Running {:?} on a {}x{} matrix", op, matrix.rows(), matrix.cols());

    Ok(match op {
        MatrixOp::Det => MatrixOutput::Scalar {
            value: config.present(matrix.determinant()?),
        },
        MatrixOp::Trace => MatrixOutput::Scalar {
            value: config.present(matrix.trace()?),
        },
        MatrixOp::Rank => MatrixOutput::Count {
            value: matrix.rank(),
        },
        MatrixOp::Inverse => MatrixOutput::Matrix {
            matrix: present_rows(config, &matrix.inverse()?.to_rows()),
        },
        MatrixOp::Transpose => MatrixOutput::Matrix {
            matrix: present_rows(config, &matrix.transpose().to_rows()),
        },
    })
}

fn run_sample(config: &MathConfig, kind: SampleKind, count: usize, seed: Option<u64>) -> SampleOutput {
    let config = MathConfig {
        seed: seed.unwrap_or(config.seed),
        ..config.clone()
    };
    let mut rng = create_rng_from_config(&config);
    info!("Drawing {} {:?} samples with seed {}", count, kind, config.seed);

    let samples = (0..count)
        .map(|_| match kind {
            SampleKind::UnitCircle => random_unit_vec2(&mut rng).to_array().to_vec(),
            SampleKind::UnitSphere => random_unit_vec3(&mut rng).to_array().to_vec(),
            SampleKind::InCircle => random_in_unit_circle(&mut rng).to_array().to_vec(),
            SampleKind::InSphere => random_in_unit_sphere(&mut rng).to_array().to_vec(),
            SampleKind::Rotation => {
                let q = random_rotation(&mut rng);
                vec![q.w, q.x, q.y, q.z]
            }
        })
        .collect::<Vec<_>>();

    SampleOutput {
        seed: config.seed,
        samples: present_rows(&config, &samples),
    }
}

/// Parses `x,y` or `x,y,z` and checks it against the dimension.
fn parse_point(text: &str, dimension: Dimension) -> MathResult<Vec<f64>> {
    let coords = text
        .split(',')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|e| {
                PandaMathError::Parse(format!("invalid coordinate '{}' in '{}': {}", part, text, e))
            })
        })
        .collect::<MathResult<Vec<f64>>>()?;

    let expected = match dimension {
        Dimension::Two => 2,
        Dimension::Three => 3,
    };
    if coords.len() != expected {
        return Err(PandaMathError::DimensionMismatch(format!(
            "point '{}' has {} coordinates, expected {}",
            text,
            coords.len(),
            expected
        )));
    }
    Ok(coords)
}

fn present_rows(config: &MathConfig, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| row.iter().map(|v| config.present(*v)).collect())
        .collect()
}

// src/lib.rs

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod geometry;
pub mod retained;
pub mod vertex;

pub use error::GasketError;
pub use generator::{PointGenerator, PointSequence, ScriptedSelector, SeedStrategy, UniformSelector, VertexSelector};
pub use geometry::{Bounds, Point2, Triangle};
pub use retained::{PresentationMode, RetainedPoints};
pub use vertex::Vertex;

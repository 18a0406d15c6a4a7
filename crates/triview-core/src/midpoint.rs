use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriviewError};

/// One volume axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Sagittal,
    Coronal,
    Axial,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::Sagittal, Self::Coronal, Self::Axial];

    pub fn index(self) -> usize {
        match self {
            Self::Sagittal => 0,
            Self::Coronal => 1,
            Self::Axial => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sagittal => write!(f, "Sagittal"),
            Self::Coronal => write!(f, "Coronal"),
            Self::Axial => write!(f, "Axial"),
        }
    }
}

/// Voxel dimensions of the uploaded volume, one per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeShape(pub [usize; 3]);

impl VolumeShape {
    /// Validate a raw shape list from the server.
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        let dims: [usize; 3] = dims.try_into().map_err(|_| {
            TriviewError::ShapeUnavailable(format!("expected 3 dimensions, got {}", dims.len()))
        })?;
        if dims.iter().any(|&d| d == 0) {
            return Err(TriviewError::ShapeUnavailable(format!(
                "degenerate dimensions {dims:?}"
            )));
        }
        Ok(Self(dims))
    }

    pub fn dim(&self, axis: Axis) -> usize {
        self.0[axis.index()]
    }
}

/// Slice index per axis, each within `[0, dim - 1]`.
pub type MidpointVector = [usize; 3];

/// Three-axis slice index state driving regeneration requests.
///
/// Uninitialized until a volume shape is known; midpoint-driven controls
/// stay disabled until then.
#[derive(Clone, Debug, Default)]
pub struct MidpointCoordinator {
    shape: Option<VolumeShape>,
    midpoints: MidpointVector,
}

impl MidpointCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a (possibly new) volume shape and center every axis.
    pub fn initialize(&mut self, shape: VolumeShape) {
        self.midpoints = [
            shape.dim(Axis::Sagittal) / 2,
            shape.dim(Axis::Coronal) / 2,
            shape.dim(Axis::Axial) / 2,
        ];
        self.shape = Some(shape);
    }

    pub fn is_initialized(&self) -> bool {
        self.shape.is_some()
    }

    pub fn shape(&self) -> Option<VolumeShape> {
        self.shape
    }

    /// Store a slice index for one axis, clamped into range. Out-of-range
    /// input is never rejected. Returns the stored value.
    pub fn update_axis(&mut self, axis: Axis, value: i64) -> Result<usize> {
        let shape = self.shape.ok_or_else(|| {
            TriviewError::ShapeUnavailable("no volume uploaded yet".to_string())
        })?;
        let max = shape.dim(axis) as i64 - 1;
        let clamped = value.clamp(0, max) as usize;
        self.midpoints[axis.index()] = clamped;
        Ok(clamped)
    }

    pub fn midpoint(&self, axis: Axis) -> usize {
        self.midpoints[axis.index()]
    }

    /// Snapshot of the current vector, or `None` before initialization.
    pub fn current_vector(&self) -> Option<MidpointVector> {
        self.shape.map(|_| self.midpoints)
    }
}

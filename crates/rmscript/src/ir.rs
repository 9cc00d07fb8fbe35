//! Intermediate representation and compilation results.
//!
//! The IR is a flat, ordered list of [`IrOp`] entries consumed by
//! execution adapters. Angles are radians, translations meters; head poses
//! are homogeneous 4x4 rigid transforms in column-vector convention. Every
//! entry carries the source line it was compiled from.

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Diagnostic;

/// Interpolation profile an adapter should use for a movement.
///
/// The compiler always emits [`Interp::MinJerk`]; the other variants exist
/// for adapters and future language surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interp {
    #[default]
    MinJerk,
    Linear,
    Ease,
    Cartoon,
}

/// How `play` interacts with script execution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayMode {
    /// Start playback and continue immediately.
    Async,
    /// Block until the sound finishes.
    BlockUntilDone,
    /// Block for a fixed window, then continue.
    BlockForSeconds(f64),
}

/// A merged movement driving up to three channels at once.
///
/// A `Some` field means the adapter must drive that channel; `None` leaves
/// the channel untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrMovement {
    /// Head pose, `T(x,y,z) · Rz(yaw) · Ry(pitch) · Rx(roll)`.
    pub head_pose: Option<Matrix4<f64>>,
    /// `(left, right)` antenna angles in radians.
    pub antennas: Option<(f64, f64)>,
    /// Body yaw in radians, positive to the left.
    pub body_yaw: Option<f64>,
    pub duration_sec: f64,
    pub interpolation: Interp,
    pub source_line: u32,
    pub source_text: String,
}

impl IrMovement {
    /// True when no channel is driven (dropped by the optimizer).
    pub fn is_noop(&self) -> bool {
        self.head_pose.is_none() && self.antennas.is_none() && self.body_yaw.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrWait {
    pub duration_sec: f64,
    pub source_line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrPicture {
    pub source_line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrPlaySound {
    pub name: String,
    pub mode: PlayMode,
    pub source_line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrLoopSound {
    pub name: String,
    pub duration_sec: f64,
    pub source_line: u32,
}

/// One compiler output entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrOp {
    Movement(IrMovement),
    Wait(IrWait),
    Picture(IrPicture),
    PlaySound(IrPlaySound),
    LoopSound(IrLoopSound),
}

impl IrOp {
    /// Source line this entry was compiled from.
    pub fn source_line(&self) -> u32 {
        match self {
            IrOp::Movement(op) => op.source_line,
            IrOp::Wait(op) => op.source_line,
            IrOp::Picture(op) => op.source_line,
            IrOp::PlaySound(op) => op.source_line,
            IrOp::LoopSound(op) => op.source_line,
        }
    }
}

/// Aggregated output of one compilation.
///
/// `success` is true exactly when `errors` is empty; warnings alone never
/// fail a compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationResult {
    pub name: String,
    pub description: String,
    pub success: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub source_code: String,
    pub source_file_path: Option<PathBuf>,
    pub ir: Vec<IrOp>,
}

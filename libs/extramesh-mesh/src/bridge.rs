//! # Ring Bridging
//!
//! Connects two index rings with a strip of faces. Used by both the
//! function surfaces (row to row) and any generator that stitches loops.
//!
//! ## Modes
//!
//! - **Strip**: both rings have the same length (≥ 2), one quad per step.
//! - **Fan**: one ring is a single apex vertex, one triangle per step of
//!   the other ring.

use crate::error::MeshError;
use crate::mesh::Face;

/// How the two rings relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeMode {
    Strip,
    /// The first ring is the apex.
    FanFromFirst,
    /// The second ring is the apex.
    FanFromSecond,
}

impl BridgeMode {
    fn classify(first: usize, second: usize) -> Result<Self, MeshError> {
        match (first, second) {
            (a, b) if a == b && a >= 2 => Ok(Self::Strip),
            (1, b) if b >= 2 => Ok(Self::FanFromFirst),
            (a, 1) if a >= 2 => Ok(Self::FanFromSecond),
            (a, b) => Err(MeshError::invalid_rings(a, b)),
        }
    }
}

/// Builds the faces connecting `ring1` to `ring2`.
///
/// Strip face `k` is `(R1[k], R2[k], R2[k+1], R1[k+1])`. A fan drops the
/// repeated apex from that quad. When `closed`, the face joining the last
/// index back to the first is emitted *before* the others. When `flipped`,
/// every face is reversed.
///
/// # Errors
///
/// Returns [`MeshError::InvalidRings`] for an empty ring, two single-vertex
/// rings, or two rings of different lengths.
///
/// # Example
///
/// ```rust
/// use extramesh_mesh::bridge;
///
/// let faces = bridge(&[0, 1, 2], &[3, 4, 5], false, false).unwrap();
/// assert_eq!(faces, vec![vec![0, 3, 4, 1], vec![1, 4, 5, 2]]);
///
/// let fan = bridge(&[0, 1, 2], &[9], false, false).unwrap();
/// assert_eq!(fan, vec![vec![0, 9, 1], vec![1, 9, 2]]);
/// ```
pub fn bridge(
    ring1: &[u32],
    ring2: &[u32],
    closed: bool,
    flipped: bool,
) -> Result<Vec<Face>, MeshError> {
    let mode = BridgeMode::classify(ring1.len(), ring2.len())?;
    let steps = ring1.len().max(ring2.len()) - 1;

    let mut faces = Vec::with_capacity(steps + usize::from(closed));

    if closed {
        faces.push(closing_face(mode, ring1, ring2));
    }
    for k in 0..steps {
        faces.push(step_face(mode, ring1, ring2, k));
    }

    if flipped {
        for face in &mut faces {
            face.reverse();
        }
    }

    Ok(faces)
}

fn step_face(mode: BridgeMode, r1: &[u32], r2: &[u32], k: usize) -> Face {
    match mode {
        BridgeMode::Strip => vec![r1[k], r2[k], r2[k + 1], r1[k + 1]],
        BridgeMode::FanFromFirst => vec![r1[0], r2[k], r2[k + 1]],
        BridgeMode::FanFromSecond => vec![r1[k], r2[0], r1[k + 1]],
    }
}

fn closing_face(mode: BridgeMode, r1: &[u32], r2: &[u32]) -> Face {
    match mode {
        BridgeMode::Strip => {
            let last = r1.len() - 1;
            vec![r2[0], r1[0], r1[last], r2[last]]
        }
        BridgeMode::FanFromFirst => vec![r2[0], r1[0], r2[r2.len() - 1]],
        BridgeMode::FanFromSecond => vec![r2[0], r1[0], r1[r1.len() - 1]],
    }
}

// =============================================================================
// TESTS
// =============================================================================

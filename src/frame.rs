//! Decoded thermal frames and the grid arithmetic the detectors run on.
//!
//! The sensor is mounted mirrored, so the column order of every decoded row
//! is reversed to match the physical scene.

use crate::protocol::PAYLOAD_LEN;

/// Grid edge length.
pub const GRID: usize = 8;

/// Cells per frame.
pub const CELLS: usize = GRID * GRID;

/// Row-major 8×8 grid.
pub type Grid<T> = [[T; GRID]; GRID];

/// Ambient reading from the on-board thermistor, raw device units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Thermistor(pub i16);

impl Thermistor {
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(i16::from_le_bytes(bytes))
    }

    pub fn raw(self) -> i16 {
        self.0
    }
}

/// One decoded temperature grid, in physical orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    cells: Grid<i16>,
}

impl Frame {
    /// Frame from a grid already in physical orientation.
    pub const fn from_grid(cells: Grid<i16>) -> Self {
        Self { cells }
    }

    /// Decode a raw array payload: unpack, then mirror columns.
    pub fn decode(payload: &[u8; PAYLOAD_LEN]) -> Self {
        Self {
            cells: reverse_columns(unpack(payload)),
        }
    }

    pub fn cells(&self) -> &Grid<i16> {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> i16 {
        self.cells[row][col]
    }
}

/// Unpack 64 little-endian i16 values row-major, without mirroring.
pub fn unpack(payload: &[u8; PAYLOAD_LEN]) -> Grid<i16> {
    let mut grid = [[0i16; GRID]; GRID];
    for (i, pair) in payload.chunks_exact(2).enumerate() {
        grid[i / GRID][i % GRID] = i16::from_le_bytes([pair[0], pair[1]]);
    }
    grid
}

/// Reverse the column order of every row.  Applying it twice is identity.
pub fn reverse_columns<T: Copy>(mut grid: Grid<T>) -> Grid<T> {
    for row in &mut grid {
        row.reverse();
    }
    grid
}

/// Inverse of [`Frame::decode`]: wire payload for a physical-orientation grid.
pub fn encode_payload(grid: &Grid<i16>) -> [u8; PAYLOAD_LEN] {
    let wire = reverse_columns(*grid);
    let mut payload = [0u8; PAYLOAD_LEN];
    for (i, value) in wire.iter().flatten().enumerate() {
        payload[2 * i..2 * i + 2].copy_from_slice(&value.to_le_bytes());
    }
    payload
}

// ---------------------------------------------------------------------------
// Averaged frames
// ---------------------------------------------------------------------------

/// Mean of one averaging window.  This is what the detectors and the frame
/// collaborator see.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragedFrame {
    cells: Grid<f32>,
}

impl AveragedFrame {
    pub const fn from_grid(cells: Grid<f32>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &Grid<f32> {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row][col]
    }

    /// Spatial mean over all cells.
    pub fn mean(&self) -> f32 {
        self.cells.iter().flatten().sum::<f32>() / CELLS as f32
    }

    /// Frobenius norm of the frame's deviation from its own spatial mean.
    pub fn deviation_norm(&self) -> f32 {
        let mean = self.mean();
        frobenius(self.cells.iter().flatten().map(|v| v - mean))
    }

    /// Frobenius norm of `self - other`.
    pub fn distance(&self, other: &AveragedFrame) -> f32 {
        frobenius(
            self.cells
                .iter()
                .flatten()
                .zip(other.cells.iter().flatten())
                .map(|(a, b)| a - b),
        )
    }
}

impl From<&Frame> for AveragedFrame {
    fn from(frame: &Frame) -> Self {
        let mut cells = [[0.0f32; GRID]; GRID];
        for (dst, src) in cells.iter_mut().zip(frame.cells.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = f32::from(*s);
            }
        }
        Self { cells }
    }
}

fn frobenius(values: impl Iterator<Item = f32>) -> f32 {
    values.map(|v| v * v).sum::<f32>().sqrt()
}

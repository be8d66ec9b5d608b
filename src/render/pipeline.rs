//! Turning a raw game observation into the boards shown on screen
//!
//! Each configured cropper yields one view. A single shared repainter, if
//! any, is then applied to every view. Every view the pipeline hands back is
//! an independently owned board, so display slots can be mutated without
//! affecting one another.

use std::collections::HashMap;

use crate::game::{Board, Observation, Position};

/// Produces one sub-board view of a full observation
pub trait Cropper {
    fn crop(&self, observation: &Observation) -> Observation;
}

/// Transform applied uniformly to every cropped view
pub trait Repainter {
    fn repaint(&mut self, view: &Observation) -> Observation;
}

impl<F> Repainter for F
where
    F: FnMut(&Observation) -> Observation,
{
    fn repaint(&mut self, view: &Observation) -> Observation {
        self(view)
    }
}

/// Passes the whole board through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct FullBoardCropper;

impl Cropper for FullBoardCropper {
    fn crop(&self, observation: &Observation) -> Observation {
        observation.clone()
    }
}

/// A fixed rectangular window onto the board
///
/// Cells of the window that fall outside the board are filled with `pad`.
#[derive(Debug, Clone, Copy)]
pub struct WindowCropper {
    pub top: usize,
    pub left: usize,
    pub rows: usize,
    pub cols: usize,
    pub pad: char,
}

impl WindowCropper {
    pub fn new(top: usize, left: usize, rows: usize, cols: usize, pad: char) -> Self {
        Self {
            top,
            left,
            rows,
            cols,
            pad,
        }
    }
}

impl Cropper for WindowCropper {
    fn crop(&self, observation: &Observation) -> Observation {
        let mut view = Board::filled(self.rows, self.cols, self.pad);
        for row in 0..self.rows {
            for col in 0..self.cols {
                // Offsets past usize::MAX are off the board and stay padded
                let (Some(src_row), Some(src_col)) =
                    (self.top.checked_add(row), self.left.checked_add(col))
                else {
                    continue;
                };
                if let Some(value) = observation.board.get(Position::new(src_row, src_col)) {
                    view.set(Position::new(row, col), value);
                }
            }
        }
        Observation::new(view)
    }
}

/// Substitutes characters according to a lookup table
#[derive(Debug, Clone, Default)]
pub struct CharacterRepainter {
    mapping: HashMap<char, char>,
}

impl CharacterRepainter {
    pub fn new(mapping: HashMap<char, char>) -> Self {
        Self { mapping }
    }
}

impl Repainter for CharacterRepainter {
    fn repaint(&mut self, view: &Observation) -> Observation {
        let mut painted = view.clone();
        painted
            .board
            .map_cells(|c| self.mapping.get(&c).copied().unwrap_or(c));
        painted
    }
}

/// Croppers plus an optional repainter
pub struct ObservationPipeline {
    croppers: Vec<Box<dyn Cropper>>,
    repainter: Option<Box<dyn Repainter>>,
}

impl ObservationPipeline {
    /// A pipeline that shows the whole board as a single view
    pub fn new() -> Self {
        Self {
            croppers: vec![Box::new(FullBoardCropper)],
            repainter: None,
        }
    }

    /// Replace the croppers. An empty list falls back to the full board.
    pub fn with_croppers(mut self, croppers: Vec<Box<dyn Cropper>>) -> Self {
        self.croppers = if croppers.is_empty() {
            vec![Box::new(FullBoardCropper)]
        } else {
            croppers
        };
        self
    }

    pub fn with_repainter(mut self, repainter: Box<dyn Repainter>) -> Self {
        self.repainter = Some(repainter);
        self
    }

    /// Number of views every run produces
    pub fn view_count(&self) -> usize {
        self.croppers.len()
    }

    /// Crop and repaint one observation
    pub fn run(&mut self, observation: &Observation) -> Vec<Observation> {
        let views = self.croppers.iter().map(|cropper| cropper.crop(observation));
        match self.repainter.as_mut() {
            Some(repainter) => views.map(|view| repainter.repaint(&view)).collect(),
            None => views.collect(),
        }
    }
}

impl Default for ObservationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

use crate::core::fractals::discrete::errors::DiscreteFractalError;
use std::fmt;
use std::sync::Arc;

type MembershipRule = dyn Fn(u64, u64) -> bool + Send + Sync;

#[derive(Clone)]
enum Membership {
    /// Row-major base cells, `true` where the tile is filled.
    Cells(Arc<[bool]>),
    Rule(Arc<MembershipRule>),
}

/// Self-similar tiling of the lattice `x, y >= 0` built from a small base pattern.
#[derive(Clone)]
pub struct DiscreteFractal {
    base_width: u32,
    base_height: u32,
    membership: Membership,
}

impl DiscreteFractal {
    /// Builds a fractal from a base pattern, where non-zero cells are filled.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, DiscreteFractalError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());

        if width < 1 || height < 1 {
            return Err(DiscreteFractalError::InvalidBase { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);

        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();

            if row.len() != width {
                return Err(DiscreteFractalError::RaggedRows {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }

            cells.extend(row.iter().map(|&cell| cell != 0));
        }

        Ok(Self {
            base_width: width as u32,
            base_height: height as u32,
            membership: Membership::Cells(cells.into()),
        })
    }

    /// Builds a fractal from a closed-form membership test on the full lattice.
    ///
    /// No corner correction is applied to rule-based fractals.
    pub fn from_rule<F>(base_width: u32, base_height: u32, rule: F) -> Result<Self, DiscreteFractalError>
    where
        F: Fn(u64, u64) -> bool + Send + Sync + 'static,
    {
        if base_width < 1 || base_height < 1 {
            return Err(DiscreteFractalError::InvalidBase {
                width: base_width as usize,
                height: base_height as usize,
            });
        }

        Ok(Self {
            base_width,
            base_height,
            membership: Membership::Rule(Arc::new(rule)),
        })
    }

    #[must_use]
    pub fn base_width(&self) -> u32 {
        self.base_width
    }

    #[must_use]
    pub fn base_height(&self) -> u32 {
        self.base_height
    }

    fn cell(cells: &[bool], base_width: u64, x: u64, y: u64) -> bool {
        cells[(y * base_width + x) as usize]
    }

    #[must_use]
    pub fn contains(&self, mut x: u64, mut y: u64) -> bool {
        let cells = match &self.membership {
            Membership::Rule(rule) => return rule(x, y),
            Membership::Cells(cells) => cells,
        };

        let base_width = u64::from(self.base_width);
        let base_height = u64::from(self.base_height);

        loop {
            if !Self::cell(cells, base_width, x % base_width, y % base_height) {
                return false;
            }

            // a base of one never shrinks the coordinate, so that axis is done after one step
            x = if base_width == 1 { 0 } else { x / base_width };
            y = if base_height == 1 { 0 } else { y / base_height };

            if x == 0 && y == 0 {
                return true;
            }
        }
    }

    /// [`contains`](Self::contains) for a lattice of `width`×`height` cells.
    ///
    /// When the base pattern's origin cell is empty, everything up to and including column
    /// `width / base_width` and row `height / base_height` is reported empty.
    #[must_use]
    pub fn contains_in(&self, x: u64, y: u64, width: u64, height: u64) -> bool {
        if let Membership::Cells(cells) = &self.membership {
            let corner_empty = !cells[0];

            if corner_empty
                && x <= width / u64::from(self.base_width)
                && y <= height / u64::from(self.base_height)
            {
                return false;
            }
        }

        self.contains(x, y)
    }
}

impl fmt::Debug for DiscreteFractal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.membership {
            Membership::Cells(_) => "cells",
            Membership::Rule(_) => "rule",
        };

        f.debug_struct("DiscreteFractal")
            .field("base_width", &self.base_width)
            .field("base_height", &self.base_height)
            .field("membership", &kind)
            .finish()
    }
}

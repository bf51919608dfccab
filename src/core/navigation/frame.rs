use crate::core::data::plane_point::PlanePoint;
use crate::core::data::plane_rect::{PlaneRect, PlaneRectError};
use log::debug;

/// Smallest continuous viewport extent, relative to the fractal's natural extent.
pub const CONTINUOUS_MIN_EXTENT_RATIO: f64 = 1e-15;
pub const DISCRETE_MIN_WIDTH: f64 = 1.7724454418610591e-6;
pub const DISCRETE_MIN_HEIGHT: f64 = 1.7724454423051483e-6;

/// What kind of plane the frame navigates, which decides the zoom and clamp rules.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlaneKind {
    /// Unbounded plane; `natural` is the fractal's default region.
    Continuous { natural: PlaneRect },
    /// Self-similar tiling mapped onto the unit square.
    Discrete { base_width: u32, base_height: u32 },
}

/// The pan/zoom viewport over a fractal plane.
///
/// Rejected operations leave the frame untouched and return `false`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NavigationFrame {
    bounds: PlaneRect,
    focal_point: Option<PlanePoint>,
    kind: PlaneKind,
    pub(crate) padding: (f64, f64),
}

impl NavigationFrame {
    pub fn continuous(natural: PlaneRect) -> Self {
        Self {
            bounds: natural,
            focal_point: None,
            kind: PlaneKind::Continuous { natural },
            padding: (0.0, 0.0),
        }
    }

    /// A discrete frame covering the whole unit square.
    pub fn discrete(base_width: u32, base_height: u32) -> Self {
        Self {
            bounds: PlaneRect::unit_square(),
            focal_point: None,
            kind: PlaneKind::Discrete {
                base_width,
                base_height,
            },
            padding: (0.0, 0.0),
        }
    }

    pub fn with_bounds(
        kind: PlaneKind,
        top_left: PlanePoint,
        bottom_right: PlanePoint,
    ) -> Result<Self, PlaneRectError> {
        Ok(Self {
            bounds: PlaneRect::new(top_left, bottom_right)?,
            focal_point: None,
            kind,
            padding: (0.0, 0.0),
        })
    }

    #[must_use]
    pub fn bounds(&self) -> PlaneRect {
        self.bounds
    }

    #[must_use]
    pub fn kind(&self) -> PlaneKind {
        self.kind
    }

    #[must_use]
    pub fn top_left(&self) -> PlanePoint {
        self.bounds.top_left()
    }

    #[must_use]
    pub fn bottom_right(&self) -> PlanePoint {
        self.bounds.bottom_right()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    #[must_use]
    pub fn focal_point(&self) -> Option<PlanePoint> {
        self.focal_point
    }

    pub fn set_focal_point(&mut self, focal_point: PlanePoint) {
        self.focal_point = Some(focal_point);
    }

    pub fn focus_on_centre(&mut self) {
        self.focal_point = Some(self.bounds.centre());
    }

    pub fn clear_focal_point(&mut self) {
        self.focal_point = None;
    }

    pub(crate) fn set_bounds(&mut self, bounds: PlaneRect) {
        self.bounds = bounds;
    }

    /// Zooms about `focus` (or the focal point, when one is set).
    ///
    /// Positive `scale` zooms out, negative zooms in, `0` is the identity.
    pub fn zoom(&mut self, scale: f64, focus: PlanePoint) -> bool {
        let focus = self.focal_point.unwrap_or(focus);

        let candidate = match self.kind {
            PlaneKind::Continuous { natural } => {
                let factor = 1.0 + scale;
                self.scaled(focus, factor, factor).filter(|rect| {
                    rect.width() > CONTINUOUS_MIN_EXTENT_RATIO * natural.width()
                        && rect.height() > CONTINUOUS_MIN_EXTENT_RATIO * natural.height()
                })
            }
            PlaneKind::Discrete {
                base_width,
                base_height,
            } => {
                let factor_x = 1.0 + scale * f64::from(base_width);
                let factor_y = 1.0 + scale * f64::from(base_height);
                self.scaled(focus, factor_x, factor_y)
                    .filter(|rect| {
                        rect.width() > DISCRETE_MIN_WIDTH && rect.height() > DISCRETE_MIN_HEIGHT
                    })
                    .and_then(shrink_into_unit_square)
            }
        };

        self.commit(candidate, "zoom")
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        let top_left = self.bounds.top_left().translate(dx, dy);
        let bottom_right = self.bounds.bottom_right().translate(dx, dy);
        let moved = PlaneRect::new(top_left, bottom_right).ok();

        let candidate = match self.kind {
            PlaneKind::Continuous { .. } => moved,
            PlaneKind::Discrete { .. } => moved.and_then(slide_into_unit_square),
        };

        self.commit(candidate, "translate")
    }

    fn scaled(&self, focus: PlanePoint, factor_x: f64, factor_y: f64) -> Option<PlaneRect> {
        let top_left = self.bounds.top_left().scale_about(focus, factor_x, factor_y);
        let bottom_right = self
            .bounds
            .bottom_right()
            .scale_about(focus, factor_x, factor_y);

        PlaneRect::new(top_left, bottom_right).ok()
    }

    fn commit(&mut self, candidate: Option<PlaneRect>, operation: &str) -> bool {
        match candidate {
            Some(bounds) => {
                self.bounds = bounds;
                true
            }
            None => {
                debug!("{} rejected, viewport kept at {:?}", operation, self.bounds);
                false
            }
        }
    }
}

/// Moves both bounds back inside the unit square along each axis; extents are kept.
fn slide_into_unit_square(rect: PlaneRect) -> Option<PlaneRect> {
    let (mut x0, mut y0) = (rect.top_left().x, rect.top_left().y);
    let (mut x1, mut y1) = (rect.bottom_right().x, rect.bottom_right().y);

    if x0 < 0.0 {
        x1 -= x0;
        x0 = 0.0;
    }
    if x1 > 1.0 {
        x0 += 1.0 - x1;
        x1 = 1.0;
    }
    if y0 < 0.0 {
        y1 -= y0;
        y0 = 0.0;
    }
    if y1 > 1.0 {
        y0 += 1.0 - y1;
        y1 = 1.0;
    }

    inside_unit_square(x0, y0, x1, y1)
}

/// Like [`slide_into_unit_square`], but an extent larger than the square is cut down to it.
fn shrink_into_unit_square(rect: PlaneRect) -> Option<PlaneRect> {
    let (mut x0, mut y0) = (rect.top_left().x, rect.top_left().y);
    let (mut x1, mut y1) = (rect.bottom_right().x, rect.bottom_right().y);

    if x0 < 0.0 {
        x1 = (x1 - x0).min(1.0);
        x0 = 0.0;
    }
    if x1 > 1.0 {
        x0 = (x0 + 1.0 - x1).max(0.0);
        x1 = 1.0;
    }
    if y0 < 0.0 {
        y1 = (y1 - y0).min(1.0);
        y0 = 0.0;
    }
    if y1 > 1.0 {
        y0 = (y0 + 1.0 - y1).max(0.0);
        y1 = 1.0;
    }

    inside_unit_square(x0, y0, x1, y1)
}

fn inside_unit_square(x0: f64, y0: f64, x1: f64, y1: f64) -> Option<PlaneRect> {
    if x0 >= 0.0 && x1 <= 1.0 && y0 >= 0.0 && y1 <= 1.0 {
        PlaneRect::new(PlanePoint::new(x0, y0), PlanePoint::new(x1, y1)).ok()
    } else {
        None
    }
}

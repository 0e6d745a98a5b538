//! The rectangular playfield.
//!
//! Movement is clamped to the full rectangle. Wander targets are clamped to
//! an inner rectangle inset by `margin` so minions do not hug the edges.

use vivarium_types::Position;

use crate::error::WorldError;

/// Axis-aligned world rectangle anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    width: f64,
    height: f64,
    margin: f64,
}

impl WorldBounds {
    /// Create bounds of `width` by `height` with an inner wander `margin`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if any value is not finite, the
    /// size is not positive, the margin is negative, or the margin leaves no
    /// inner area.
    pub fn new(width: f64, height: f64, margin: f64) -> Result<Self, WorldError> {
        let all_finite = width.is_finite() && height.is_finite() && margin.is_finite();
        let leaves_room = margin * 2.0 < width && margin * 2.0 < height;
        if !all_finite || width <= 0.0 || height <= 0.0 || margin < 0.0 || !leaves_room {
            return Err(WorldError::InvalidBounds {
                width,
                height,
                margin,
            });
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    /// World width.
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// World height.
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Wander margin.
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    /// Clamp `position` into the full rectangle.
    pub const fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(0.0, self.width),
            position.y.clamp(0.0, self.height),
        )
    }

    /// Clamp `position` into the inner wander rectangle.
    pub const fn clamp_inner(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(self.margin, self.width - self.margin),
            position.y.clamp(self.margin, self.height - self.margin),
        )
    }

    /// Whether `position` lies inside the full rectangle.
    pub fn contains(&self, position: Position) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

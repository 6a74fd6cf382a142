use nalgebra::Vector2;

/// An axis-aligned rectangle, spanned from its origin corner by `size`.
///
/// With screen coordinates the origin is the top-left corner,
/// which is where the quadrant names come from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vector2<f32>,
    pub size: Vector2<f32>,
}

impl Rect {
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        assert!(
            width > 0. && height > 0.,
            "rectangle needs a positive size, got {width}x{height}"
        );
        Self {
            origin: Vector2::new(left, top),
            size: Vector2::new(width, height),
        }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[must_use]
    pub fn center(&self) -> Vector2<f32> {
        self.origin + self.size / 2.
    }

    /// Half-open containment: the far edges belong to the neighbouring rectangle.
    ///
    /// Non-finite positions are never contained.
    #[must_use]
    pub fn contains(&self, position: &Vector2<f32>) -> bool {
        let far = self.origin + self.size;
        position.x >= self.origin.x
            && position.x < far.x
            && position.y >= self.origin.y
            && position.y < far.y
    }

    /// The four equal quadrants in the order top-left, top-right, bottom-left, bottom-right.
    #[must_use]
    pub fn quadrants(&self) -> [Rect; 4] {
        let half = self.size / 2.;
        let center = self.origin + half;
        [
            Rect {
                origin: self.origin,
                size: half,
            },
            Rect {
                origin: Vector2::new(center.x, self.origin.y),
                size: half,
            },
            Rect {
                origin: Vector2::new(self.origin.x, center.y),
                size: half,
            },
            Rect {
                origin: center,
                size: half,
            },
        ]
    }

    /// Index into [`Rect::quadrants`] of the quadrant `position` falls into,
    /// decided only by comparison with the center.
    #[must_use]
    pub fn choose_quadrant(&self, position: &Vector2<f32>) -> usize {
        let center = self.center();
        let mut index = 0;
        if position.x >= center.x {
            index += 1;
        }
        if position.y >= center.y {
            index += 2;
        }
        index
    }
}

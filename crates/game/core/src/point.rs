use std::fmt;

/// Discrete grid position in the shared level coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Orthogonal step count between two points.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when the two points share exactly one coordinate, i.e. the
    /// segment between them is axis-aligned and non-degenerate.
    pub fn orthogonal_to(self, other: Self) -> bool {
        (self.x == other.x) != (self.y == other.y)
    }

    /// One orthogonal unit step toward `target`.
    ///
    /// Callers guarantee `self` and `target` differ on a single axis; with
    /// both axes off this advances x first and never diagonally.
    pub fn step_toward(self, target: Self) -> Self {
        if self.x != target.x {
            Self::new(self.x + (target.x - self.x).signum(), self.y)
        } else {
            Self::new(self.x, self.y + (target.y - self.y).signum())
        }
    }

    /// The four orthogonal neighbours.
    pub fn neighbors(self) -> [Point; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x - 1, self.y),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
        ]
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive axis-aligned rectangle of grid positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Smallest rectangle covering both corner points, in any order.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Rectangle anchored at `origin` with the given extent (both ≥ 1).
    pub fn anchored(origin: Point, width: u32, height: u32) -> Self {
        Self {
            min: origin,
            max: Point::new(origin.x + width as i32 - 1, origin.y + height as i32 - 1),
        }
    }

    /// Square window of half-width `radius` centred on `center`.
    pub fn window(center: Point, radius: u32) -> Self {
        let r = radius as i32;
        Self {
            min: Point::new(center.x - r, center.y - r),
            max: Point::new(center.x + r, center.y + r),
        }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn width(&self) -> u32 {
        self.min.x.abs_diff(self.max.x) + 1
    }

    pub fn height(&self) -> u32 {
        self.min.y.abs_diff(self.max.y) + 1
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Smallest rectangle covering both operands.
    pub fn union(self, other: Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Grown to cover `p`.
    pub fn including(self, p: Point) -> Self {
        self.union(Self::spanning(p, p))
    }

    /// Row-major iteration over every contained point.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Point::new(x, y)))
    }
}

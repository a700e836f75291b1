use std::fmt;

pub const BOARD_WIDTH_CM: f32 = 30.0;
pub const BOARD_HEIGHT_CM: f32 = 20.0;
pub const PIXELS_PER_CM: f32 = 20.0;
/// logical board size in pixels
pub const BOARD_WIDTH: f32 = BOARD_WIDTH_CM * PIXELS_PER_CM;
pub const BOARD_HEIGHT: f32 = BOARD_HEIGHT_CM * PIXELS_PER_CM;
/// ink stroke width in logical pixels
pub const STROKE_WIDTH: f32 = 3.0;

/// a position on the board, in logical board pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// the line the user is currently drawing, points in temporal drawing order
///
/// out of bounds points are kept as given, they just get clipped when painted
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// start a fresh line at `point`, discarding whatever was drawn before
    pub fn begin(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// arc length of the line in centimeters
    ///
    /// sum of the euclidean distances between consecutive points, scaled by
    /// [`PIXELS_PER_CM`]; an empty or single point path has length 0
    #[must_use]
    pub fn length_cm(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum::<f64>()
            / f64::from(PIXELS_PER_CM)
    }
}

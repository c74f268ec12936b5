// src/geometry.rs
// 纯几何值类型，不依赖任何窗口库

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// 画布上的一个坐标点
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// 把点限制在 [0, max_x] x [0, max_y] 之内
    pub fn clamp(self, max_x: f64, max_y: f64) -> Self {
        Point {
            x: self.x.clamp(0.0, max_x.max(0.0)),
            y: self.y.clamp(0.0, max_y.max(0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// 由两个任意顺序的角点得到的矩形，构造时即归一化
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn from_points(start: Point, end: Point) -> Self {
        Rect {
            left: start.x.min(end.x),
            top: start.y.min(end.y),
            right: start.x.max(end.x),
            bottom: start.y.max(end.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// 四条边，顺时针：上、右、下、左
    pub fn edges(&self) -> [(Point, Point); 4] {
        let tl = self.top_left();
        let tr = Point::new(self.right, self.top);
        let br = self.bottom_right();
        let bl = Point::new(self.left, self.bottom);
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }
}

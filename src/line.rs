// src/line.rs

use crate::geometry::{Point, Rect};
use crate::surface::{Surface, BLACK, RED};

#[derive(Debug, Clone, Copy, PartialEq)]
/// 线条样式
pub struct LineStyle {
    pub color: u32,
    pub line_width: u32,
    /// 落笔前加到坐标上的偏移，0.5 让整数坐标落在像素中心
    pub offset: f64,
    /// (实线长度, 空白长度)，None 为实线
    pub dash: Option<(u32, u32)>,
}

impl LineStyle {
    /// 网格单元边框
    pub fn cell_frame() -> Self {
        LineStyle { color: BLACK, line_width: 1, offset: 0.5, dash: None }
    }

    /// 拖拽时的虚线选框
    pub fn selection_frame() -> Self {
        LineStyle { color: RED, line_width: 1, offset: 0.5, dash: Some((4, 3)) }
    }
}

/// 在某块画布上按固定样式画线段
pub struct Line<'a> {
    surface: &'a mut Surface,
    style: LineStyle,
}

impl<'a> Line<'a> {
    pub fn new(surface: &'a mut Surface, style: LineStyle) -> Self {
        Line { surface, style }
    }

    /// Bresenham 画线段，两端都包含
    pub fn draw_segment(&mut self, from: Point, to: Point) {
        let snap = |v: f64| (v + self.style.offset).floor() as i64;
        let (mut x, mut y) = (snap(from.x), snap(from.y));
        let (x1, y1) = (snap(to.x), snap(to.y));

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut step: u32 = 0;

        loop {
            if self.is_ink(step) {
                self.stamp(x, y);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step = step.wrapping_add(1);
        }
    }

    /// 画矩形边框
    pub fn draw_rect_frame(&mut self, rect: &Rect) {
        for (from, to) in rect.edges() {
            self.draw_segment(from, to);
        }
    }

    fn is_ink(&self, step: u32) -> bool {
        match self.style.dash {
            Some((on, off)) if on + off > 0 => step % (on + off) < on,
            _ => true,
        }
    }

    fn stamp(&mut self, x: i64, y: i64) {
        let w = self.style.line_width.max(1) as i64;
        let half = (w - 1) / 2;
        for oy in 0..w {
            for ox in 0..w {
                self.surface.put_pixel(x - half + ox, y - half + oy, self.style.color);
            }
        }
    }
}

// src/surface.rs
// 软件绘图表面：0RGB 的 u32 像素缓冲区，和 minifb 的 buffer 格式一致

use image::{ImageBuffer, Rgba};

use crate::geometry::Rect;

pub const WHITE: u32 = 0xFFFFFF;
pub const BLACK: u32 = 0x000000;
pub const RED: u32 = 0xFF0000;

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Surface {
    /// 新建一块白色画布
    pub fn new(width: usize, height: usize) -> Self {
        Surface { width, height, pixels: vec![WHITE; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// 越界的像素直接丢弃
    pub fn put_pixel(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(WHITE);
    }

    /// 把另一块同尺寸的画布整体拷贝过来（相当于 drawImage 背景）
    pub fn blit(&mut self, src: &Surface) {
        if src.width == self.width && src.height == self.height {
            self.pixels.copy_from_slice(&src.pixels);
            return;
        }
        // 尺寸不同时只拷贝重叠部分
        let w = self.width.min(src.width);
        for y in 0..self.height.min(src.height) {
            let dst = y * self.width;
            let from = y * src.width;
            self.pixels[dst..dst + w].copy_from_slice(&src.pixels[from..from + w]);
        }
    }

    /// 填充矩形，包含右、下边界所在的像素
    pub fn fill_rect(&mut self, rect: &Rect, color: u32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let x0 = rect.left.max(0.0).floor() as usize;
        let y0 = rect.top.max(0.0).floor() as usize;
        if rect.right < 0.0 || rect.bottom < 0.0 || x0 >= self.width || y0 >= self.height {
            return;
        }
        let x1 = (rect.right.floor() as usize).min(self.width - 1);
        let y1 = (rect.bottom.floor() as usize).min(self.height - 1);
        for y in y0..=y1 {
            let base = y * self.width;
            self.pixels[base + x0..=base + x1].fill(color);
        }
    }

    pub fn to_rgba8(&self) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let pix = self.pixels[y as usize * self.width + x as usize];
            let r = ((pix >> 16) & 0xFF) as u8;
            let g = ((pix >> 8) & 0xFF) as u8;
            let b = (pix & 0xFF) as u8;
            Rgba([r, g, b, 0xFF])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn fill_rect_is_inclusive_and_clipped() {
        let mut s = Surface::new(10, 10);
        s.fill_rect(&Rect::from_points(Point::new(8.0, 8.0), Point::new(20.0, 20.0)), BLACK);
        assert_eq!(s.pixel(8, 8), Some(BLACK));
        assert_eq!(s.pixel(9, 9), Some(BLACK));
        assert_eq!(s.pixel(7, 8), Some(WHITE));
    }

    #[test]
    fn fill_rect_outside_is_noop() {
        let mut s = Surface::new(10, 10);
        s.fill_rect(&Rect::from_points(Point::new(12.0, 0.0), Point::new(20.0, 5.0)), BLACK);
        assert!(s.pixels().iter().all(|&p| p == WHITE));
    }

    #[test]
    fn blit_copies_background() {
        let mut bg = Surface::new(4, 4);
        bg.put_pixel(1, 2, RED);
        let mut s = Surface::new(4, 4);
        s.put_pixel(0, 0, BLACK);
        s.blit(&bg);
        assert_eq!(s, bg);
    }

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let mut s = Surface::new(2, 2);
        s.put_pixel(-1, 0, BLACK);
        s.put_pixel(2, 0, BLACK);
        assert!(s.pixels().iter().all(|&p| p == WHITE));
    }

    #[test]
    fn rgba_conversion_splits_channels() {
        let mut s = Surface::new(1, 1);
        s.put_pixel(0, 0, 0x123456);
        let img = s.to_rgba8();
        assert_eq!(img.get_pixel(0, 0), &Rgba([0x12, 0x34, 0x56, 0xFF]));
    }
}

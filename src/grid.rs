// src/grid.rs
// 网格布局与“像素坐标 -> 单元格下标”的映射

use crate::error::GridError;
use crate::geometry::{Point, Rect};

pub const DEFAULT_ROWS: usize = 200;
pub const DEFAULT_COLS: usize = 200;
pub const DEFAULT_CELL_WIDTH: f64 = 15.0;
pub const DEFAULT_GAP: f64 = 10.0;
/// 激活状态数组的上限，16M 个单元格
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f64,
    pub gap: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cell_width: DEFAULT_CELL_WIDTH,
            gap: DEFAULT_GAP,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::EmptyGrid { rows: self.rows, cols: self.cols });
        }
        if self.rows.checked_mul(self.cols).is_none_or(|n| n > MAX_CELLS) {
            return Err(GridError::TooManyCells { rows: self.rows, cols: self.cols, max: MAX_CELLS });
        }
        if !self.cell_width.is_finite() || self.cell_width <= 0.0 {
            return Err(GridError::InvalidCellWidth(self.cell_width));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(GridError::InvalidGap(self.gap));
        }
        Ok(())
    }

    /// 一个单元格加一段间隙的长度
    pub fn period(&self) -> f64 {
        self.gap + self.cell_width
    }

    /// 坐标是否落在两个单元格之间的间隙里
    pub fn is_in_gap(&self, pixel: f64) -> bool {
        pixel.rem_euclid(self.period()) > self.cell_width
    }

    fn index_of(&self, pixel: f64) -> i64 {
        (pixel / self.period()).floor() as i64
    }

    /// 单元格 [row][col] 的像素范围
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let p = self.period();
        let start = Point::new(col as f64 * p, row as f64 * p);
        let end = Point::new(start.x + self.cell_width, start.y + self.cell_width);
        Rect::from_points(start, end)
    }

    /// 单轴映射：[lo, hi] 像素区间 -> 包含的单元格下标区间
    fn axis_range(&self, lo: f64, hi: f64, count: usize) -> Option<(usize, usize)> {
        let start_index = self.index_of(lo);
        let end_index = self.index_of(hi);
        if start_index == end_index && self.is_in_gap(lo) && self.is_in_gap(hi) {
            return None;
        }
        let start = if self.is_in_gap(lo) { start_index + 1 } else { start_index };
        let start = start.max(0);
        let end = end_index.min(count as i64 - 1);
        if end < 0 || start > end {
            return None;
        }
        Some((start as usize, end as usize))
    }

    /// 计算选框覆盖的单元格范围；完全落在间隙里或网格外时返回 None
    pub fn find_selection(&self, rect: &Rect) -> Option<CellRange> {
        let (col_start, col_end) = self.axis_range(rect.left, rect.right, self.cols)?;
        let (row_start, row_end) = self.axis_range(rect.top, rect.bottom, self.rows)?;
        Some(CellRange { col_start, col_end, row_start, row_end })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// 闭区间形式的单元格下标范围
pub struct CellRange {
    pub col_start: usize,
    pub col_end: usize,
    pub row_start: usize,
    pub row_end: usize,
}

impl CellRange {
    /// 与 cells() 产生的个数一致；start > end 的轴为空
    pub fn len(&self) -> usize {
        let cols = (self.col_end + 1).saturating_sub(self.col_start);
        let rows = (self.row_end + 1).saturating_sub(self.row_start);
        cols * rows
    }

    /// 按行优先依次给出 (row, col)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (cs, ce) = (self.col_start, self.col_end);
        (self.row_start..=self.row_end).flat_map(move |row| (cs..=ce).map(move |col| (row, col)))
    }
}

/// 固定大小的网格，激活状态按 row * cols + col 存放
#[derive(Debug, Clone)]
pub struct Grid {
    config: GridConfig,
    activated: Vec<bool>,
}

impl Grid {
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Grid { config, activated: vec![false; config.rows * config.cols] })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// 标记为已激活，返回此前是否未激活
    pub fn activate(&mut self, row: usize, col: usize) -> bool {
        match self.slot(row, col) {
            Some(i) => !std::mem::replace(&mut self.activated[i], true),
            None => false,
        }
    }

    pub fn is_activated(&self, row: usize, col: usize) -> bool {
        self.slot(row, col).is_some_and(|i| self.activated[i])
    }

    pub fn activated_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.config.cols;
        self.activated
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    pub fn clear_activation(&mut self) {
        self.activated.fill(false);
    }

    fn slot(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.config.rows && col < self.config.cols).then(|| row * self.config.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GridConfig {
        GridConfig::default()
    }

    fn sel(x0: f64, y0: f64, x1: f64, y1: f64) -> Option<CellRange> {
        cfg().find_selection(&Rect::from_points(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn selection_inside_gap_is_null() {
        assert_eq!(sel(17.0, 17.0, 22.0, 22.0), None);
    }

    #[test]
    fn gap_on_one_axis_discards_whole_selection() {
        // x 覆盖了单元格，y 完全落在间隙里
        assert_eq!(sel(0.0, 16.0, 60.0, 24.0), None);
        assert_eq!(sel(16.0, 0.0, 24.0, 60.0), None);
    }

    #[test]
    fn exact_cell_bounds_select_single_cell() {
        let rect = cfg().cell_rect(2, 3);
        assert_eq!(rect.left, 75.0);
        assert_eq!(rect.right, 90.0);
        let range = cfg().find_selection(&rect).unwrap();
        assert_eq!(range, CellRange { col_start: 3, col_end: 3, row_start: 2, row_end: 2 });
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn zero_to_forty_covers_first_two_cells() {
        let range = sel(0.0, 0.0, 40.0, 40.0).unwrap();
        assert_eq!((range.col_start, range.col_end), (0, 1));
        assert_eq!((range.row_start, range.row_end), (0, 1));
    }

    #[test]
    fn start_in_gap_rounds_up_end_is_inclusive() {
        // 起点 20 在第 0 格后的间隙，终点 30 在第 1 格内
        let range = sel(20.0, 0.0, 30.0, 5.0).unwrap();
        assert_eq!((range.col_start, range.col_end), (1, 1));
        // 终点 45 在第 1 格后的间隙，仍然算到第 1 格
        let range = sel(5.0, 0.0, 45.0, 5.0).unwrap();
        assert_eq!((range.col_start, range.col_end), (0, 1));
    }

    #[test]
    fn reversed_drag_maps_the_same() {
        assert_eq!(sel(40.0, 40.0, 0.0, 0.0), sel(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn selection_is_clamped_to_grid() {
        let small = GridConfig { rows: 2, cols: 3, ..cfg() };
        let range = small
            .find_selection(&Rect::from_points(Point::new(0.0, 0.0), Point::new(500.0, 500.0)))
            .unwrap();
        assert_eq!(range, CellRange { col_start: 0, col_end: 2, row_start: 0, row_end: 1 });
        let outside = small.find_selection(&Rect::from_points(Point::new(200.0, 0.0), Point::new(300.0, 10.0)));
        assert_eq!(outside, None);
    }

    #[test]
    fn zero_gap_never_reports_gap() {
        let tight = GridConfig { gap: 0.0, ..cfg() };
        assert!(!tight.is_in_gap(14.9));
        let range = tight.find_selection(&Rect::from_points(Point::new(14.0, 0.0), Point::new(16.0, 1.0))).unwrap();
        assert_eq!((range.col_start, range.col_end), (0, 1));
    }

    #[test]
    fn cell_range_iterates_row_major() {
        let range = CellRange { col_start: 1, col_end: 2, row_start: 4, row_end: 5 };
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(cells, vec![(4, 1), (4, 2), (5, 1), (5, 2)]);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = CellRange { col_start: 3, col_end: 1, row_start: 0, row_end: 2 };
        assert_eq!(range.len(), 0);
        assert_eq!(range.cells().count(), 0);
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocating() {
        let huge = GridConfig { rows: usize::MAX / 2 + 1, cols: 2, ..cfg() };
        assert_eq!(
            huge.validate(),
            Err(GridError::TooManyCells { rows: usize::MAX / 2 + 1, cols: 2, max: MAX_CELLS })
        );
        assert!(Grid::new(huge).is_err());
        let over_cap = GridConfig { rows: MAX_CELLS, cols: 2, ..cfg() };
        assert!(matches!(over_cap.validate(), Err(GridError::TooManyCells { .. })));
        assert!(GridConfig { rows: MAX_CELLS, cols: 1, ..cfg() }.validate().is_ok());
    }

    // 历史实现的逐字移植：横向判空时把 left 和自己比较
    fn historic_selection(config: &GridConfig, rect: &Rect) -> Option<CellRange> {
        let period = config.gap + config.cell_width;
        let in_gap = |pixel: f64| pixel % period > config.cell_width;
        let is_null = |start: i64, end: i64, a: f64, b: f64| start == end && in_gap(a) && in_gap(b);
        let left = (rect.left / period).floor() as i64;
        let right = (rect.right / period).floor() as i64;
        let top = (rect.top / period).floor() as i64;
        let bottom = (rect.bottom / period).floor() as i64;
        if is_null(left, right, rect.left, rect.left) || is_null(top, bottom, rect.top, rect.bottom) {
            return None;
        }
        let col_start = if in_gap(rect.left) { left + 1 } else { left };
        let row_start = if in_gap(rect.top) { top + 1 } else { top };
        Some(CellRange {
            col_start: col_start as usize,
            col_end: right as usize,
            row_start: row_start as usize,
            row_end: bottom as usize,
        })
    }

    #[test]
    fn matches_historic_mapping_on_integer_rects() {
        let config = cfg();
        let mut checked = 0;
        for x0 in 0..=100 {
            for x1 in x0..=100 {
                for y0 in (0..=60).step_by(3) {
                    for y1 in (y0..=60).step_by(3) {
                        let rect = Rect::from_points(
                            Point::new(x0 as f64, y0 as f64),
                            Point::new(x1 as f64, y1 as f64),
                        );
                        assert_eq!(
                            config.find_selection(&rect),
                            historic_selection(&config, &rect),
                            "mismatch for {rect:?}"
                        );
                        checked += 1;
                    }
                }
            }
        }
        assert!(checked > 1_000_000);
    }

    #[test]
    fn activation_is_tracked_per_cell() {
        let mut grid = Grid::new(GridConfig { rows: 3, cols: 4, ..cfg() }).unwrap();
        assert!(grid.activate(1, 2));
        assert!(!grid.activate(1, 2));
        assert!(!grid.activate(9, 9));
        assert!(grid.is_activated(1, 2));
        assert_eq!(grid.activated_cells().collect::<Vec<_>>(), vec![(1, 2)]);
        grid.clear_activation();
        assert_eq!(grid.activated_cells().count(), 0);
    }

    #[test]
    fn validate_rejects_bad_config() {
        assert_eq!(
            GridConfig { cell_width: 0.0, ..cfg() }.validate(),
            Err(GridError::InvalidCellWidth(0.0))
        );
        assert_eq!(GridConfig { gap: -1.0, ..cfg() }.validate(), Err(GridError::InvalidGap(-1.0)));
        assert_eq!(
            GridConfig { rows: 0, ..cfg() }.validate(),
            Err(GridError::EmptyGrid { rows: 0, cols: 200 })
        );
        assert!(Grid::new(GridConfig { cols: 0, ..cfg() }).is_err());
    }
}

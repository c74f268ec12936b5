// src/panel.rs
// 面板：持有可见画布、背景快照、网格以及拖拽状态

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, trace};

use crate::error::GridError;
use crate::geometry::{Point, Rect};
use crate::grid::{Grid, GridConfig};
use crate::line::{Line, LineStyle};
use crate::surface::{Surface, BLACK};

pub const DEFAULT_SURFACE_SIZE: usize = 801;

/// 被选中的单元格填充色
pub const ACTIVE_FILL: u32 = BLACK;

#[derive(Debug, Clone, PartialEq)]
/// 交互状态机：Idle -> Dragging -> Idle
pub enum Interaction {
    Idle,
    Dragging {
        anchor: Point,
        /// 本次拖拽中已经填充过的单元格，缩小选框也不会移除
        filled: BTreeSet<(usize, usize)>,
    },
}

pub struct Panel {
    visible: Surface,
    background: Surface,
    grid: Grid,
    interaction: Interaction,
}

impl Panel {
    pub fn new(width: usize, height: usize, config: GridConfig) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptySurface { width, height });
        }
        let grid = Grid::new(config)?;
        let mut background = Surface::new(width, height);
        let drawn = draw_cells(&mut background, grid.config());
        let mut visible = Surface::new(width, height);
        visible.blit(&background);
        info!(width, height, rows = config.rows, cols = config.cols, drawn, "panel ready");
        Ok(Panel { visible, background, grid, interaction: Interaction::Idle })
    }

    pub fn visible(&self) -> &Surface {
        &self.visible
    }

    pub fn background(&self) -> &Surface {
        &self.background
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging { .. })
    }

    /// 按下：记录拖拽起点
    pub fn pointer_down(&mut self, pos: Point) {
        let anchor = self.clamp(pos);
        debug!(x = anchor.x, y = anchor.y, "selection started");
        self.interaction = Interaction::Dragging { anchor, filled: BTreeSet::new() };
    }

    /// 移动：重画背景、虚线选框和被覆盖的单元格。返回是否需要重绘
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        let end = self.clamp(pos);
        let Interaction::Dragging { anchor, filled } = &mut self.interaction else {
            return false;
        };
        let frame = Rect::from_points(*anchor, end);
        trace!(w = frame.width(), h = frame.height(), "selection frame");

        self.visible.blit(&self.background);
        Line::new(&mut self.visible, LineStyle::selection_frame()).draw_rect_frame(&frame);

        if let Some(range) = self.grid.config().find_selection(&frame) {
            trace!(cells = range.len(), "cells covered");
            for (row, col) in range.cells() {
                self.grid.activate(row, col);
                filled.insert((row, col));
            }
        }
        let config = *self.grid.config();
        for &(row, col) in filled.iter() {
            self.visible.fill_rect(&config.cell_rect(row, col), ACTIVE_FILL);
        }
        true
    }

    /// 松开：画布恢复成背景
    pub fn pointer_up(&mut self) {
        if let Interaction::Dragging { filled, .. } = &self.interaction {
            debug!(cells = filled.len(), "selection finished");
        }
        self.reset();
        self.interaction = Interaction::Idle;
    }

    pub fn activated_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.grid.activated_cells()
    }

    pub fn clear_activation(&mut self) {
        self.grid.clear_activation();
        self.interaction = Interaction::Idle;
        self.reset();
        info!("activation cleared");
    }

    /// 把可见画布保存为 PNG
    pub fn snapshot_png(&self, path: &Path) -> Result<()> {
        self.visible.to_rgba8().save(path)?;
        info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    fn reset(&mut self) {
        self.visible.clear();
        self.visible.blit(&self.background);
    }

    fn clamp(&self, pos: Point) -> Point {
        pos.clamp((self.visible.width() - 1) as f64, (self.visible.height() - 1) as f64)
    }
}

/// 在背景上画出单元格边框，画到画布边缘为止
fn draw_cells(surface: &mut Surface, config: &GridConfig) -> usize {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let mut line = Line::new(surface, LineStyle::cell_frame());
    let mut drawn = 0;
    for row in 0..config.rows {
        if config.cell_rect(row, 0).top >= h {
            break;
        }
        for col in 0..config.cols {
            let rect = config.cell_rect(row, col);
            if rect.left >= w {
                break;
            }
            line.draw_rect_frame(&rect);
            drawn += 1;
        }
    }
    drawn
}

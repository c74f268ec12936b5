// src/cli.rs
// 命令行参数 -> 运行配置

use clap::{Parser, ValueEnum};

use crate::error::GridError;
use crate::grid::{GridConfig, DEFAULT_CELL_WIDTH, DEFAULT_COLS, DEFAULT_GAP, DEFAULT_ROWS};
use crate::panel::DEFAULT_SURFACE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// druid 窗口（带菜单：另存为、复制、清除）
    Druid,
    /// minifb 帧缓冲窗口
    Minifb,
}

/// Drag a lasso over a grid of cells to select them.
#[derive(Parser, Debug)]
#[command(name = "cellasso", version, about)]
pub struct CliArgs {
    /// Window front end.
    #[arg(short, long, value_enum, default_value_t = Backend::Druid)]
    pub backend: Backend,

    /// Number of grid rows.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of grid columns.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Side length of one cell in pixels.
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH, value_name = "PX")]
    pub cell_width: f64,

    /// Spacing between neighbouring cells in pixels.
    #[arg(long, default_value_t = DEFAULT_GAP, value_name = "PX")]
    pub gap: f64,

    /// Drawing surface width in pixels.
    #[arg(long, default_value_t = DEFAULT_SURFACE_SIZE, value_name = "PX")]
    pub width: usize,

    /// Drawing surface height in pixels.
    #[arg(long, default_value_t = DEFAULT_SURFACE_SIZE, value_name = "PX")]
    pub height: usize,

    /// tracing filter directive, e.g. "debug" or "cellasso=trace".
    #[arg(long, default_value = "info", value_name = "FILTER")]
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub backend: Backend,
    pub width: usize,
    pub height: usize,
    pub grid: GridConfig,
}

impl Settings {
    /// 在打开任何窗口之前校验参数
    pub fn from_args(args: &CliArgs) -> Result<Self, GridError> {
        if args.width == 0 || args.height == 0 {
            return Err(GridError::EmptySurface { width: args.width, height: args.height });
        }
        let grid = GridConfig {
            rows: args.rows,
            cols: args.cols,
            cell_width: args.cell_width,
            gap: args.gap,
        };
        grid.validate()?;
        Ok(Settings { backend: args.backend, width: args.width, height: args.height, grid })
    }
}

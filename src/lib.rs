//! 网格套索选择：在画布上拖出矩形选框，选中被覆盖的单元格。

pub mod cli;
pub mod druid_app;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod line;
pub mod panel;
pub mod surface;
pub mod window;

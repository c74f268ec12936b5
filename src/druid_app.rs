// src/druid_app.rs
// druid 前端：把鼠标事件交给 Panel，再把可见画布画出来

use anyhow::Result;
use arboard::{Clipboard, ImageData};
use druid::piet::{ImageFormat, InterpolationMode, PietImage};
use druid::{
    AppLauncher, BoxConstraints, Data, Env, Event, EventCtx, LayoutCtx, LifeCycle, LifeCycleCtx,
    Menu, MenuItem, PaintCtx, RenderContext, Selector, Size, UpdateCtx, Widget, WindowDesc,
};
use image::{ImageBuffer, Rgba};
use tracing::{error, info, warn};

use crate::cli::Settings;
use crate::geometry::Point;
use crate::panel::Panel;

const SAVE_AS: Selector = Selector::new("cellasso.save-as");
const COPY_IMAGE: Selector = Selector::new("cellasso.copy-image");
const CLEAR_SELECTION: Selector = Selector::new("cellasso.clear-selection");

#[derive(Clone, Data)]
struct AppState {
    is_selecting: bool,
    activated: usize,
}

// Clipboard helper
fn copy_image_to_clipboard(image: &ImageBuffer<Rgba<u8>, Vec<u8>>) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    let image_data = ImageData {
        width: image.width() as usize,
        height: image.height() as usize,
        bytes: image.as_raw().into(),
    };
    clipboard.set_image(image_data)?;
    Ok(())
}

fn to_point(pos: druid::Point) -> Point {
    Point::new(pos.x, pos.y)
}

// Widget implementation
struct GridWidget {
    panel: Panel,
    cached_image: Option<PietImage>,
}

impl GridWidget {
    fn invalidate(&mut self, ctx: &mut EventCtx) {
        self.cached_image = None;
        ctx.request_paint();
    }

    fn save_as(&self) {
        let Some(path) = rfd::FileDialog::new().add_filter("PNG", &["png"]).save_file() else {
            return;
        };
        if let Err(e) = self.panel.snapshot_png(&path) {
            error!(error = %e, path = %path.display(), "保存失败");
            rfd::MessageDialog::new().set_title("错误").set_description(format!("保存失败: {e}")).show();
        }
    }
}

impl Widget<AppState> for GridWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::MouseDown(e) if e.button.is_left() => {
                ctx.set_active(true);
                self.panel.pointer_down(to_point(e.pos));
                data.is_selecting = true;
            }

            Event::MouseMove(e) if data.is_selecting => {
                if self.panel.pointer_move(to_point(e.pos)) {
                    self.invalidate(ctx);
                }
            }

            Event::MouseUp(e) if e.button.is_left() => {
                ctx.set_active(false);
                self.panel.pointer_up();
                data.is_selecting = false;
                data.activated = self.panel.activated_cells().count();
                self.invalidate(ctx);
            }

            Event::Command(cmd) if cmd.is(SAVE_AS) => {
                self.save_as();
                ctx.set_handled();
            }

            Event::Command(cmd) if cmd.is(COPY_IMAGE) => {
                match copy_image_to_clipboard(&self.panel.visible().to_rgba8()) {
                    Ok(()) => info!("画布已复制到剪贴板"),
                    Err(e) => warn!(error = %e, "复制到剪贴板失败"),
                }
                ctx.set_handled();
            }

            Event::Command(cmd) if cmd.is(CLEAR_SELECTION) => {
                self.panel.clear_activation();
                data.is_selecting = false;
                data.activated = 0;
                self.invalidate(ctx);
                ctx.set_handled();
            }
            _ => {}
        }
    }

    fn lifecycle(&mut self, _ctx: &mut LifeCycleCtx, _event: &LifeCycle, _data: &AppState, _env: &Env) {
        // 不处理生命周期事件
    }

    fn update(&mut self, _ctx: &mut UpdateCtx, _old: &AppState, _data: &AppState, _env: &Env) {}

    fn layout(&mut self, _ctx: &mut LayoutCtx, _bc: &BoxConstraints, _data: &AppState, _env: &Env) -> Size {
        let surface = self.panel.visible();
        Size::new(surface.width() as f64, surface.height() as f64)
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _data: &AppState, _env: &Env) {
        let full_rect = ctx.size().to_rect();

        if self.cached_image.is_none() {
            let surface = self.panel.visible();
            let buf = surface.to_rgba8();
            self.cached_image = ctx
                .make_image(surface.width(), surface.height(), buf.as_raw(), ImageFormat::RgbaSeparate)
                .map_err(|e| error!(error = %e, "无法生成画布图像"))
                .ok();
        }
        if let Some(img) = &self.cached_image {
            ctx.draw_image(img, full_rect, InterpolationMode::NearestNeighbor);
        }
    }
}

fn make_menu() -> Menu<AppState> {
    Menu::new("cellasso").entry(
        Menu::new("文件")
            .entry(MenuItem::new("另存为...").command(SAVE_AS))
            .entry(MenuItem::new("复制").command(COPY_IMAGE))
            .entry(MenuItem::new("清除选择").command(CLEAR_SELECTION))
            .separator()
            .entry(MenuItem::new("退出").command(druid::commands::QUIT_APP)),
    )
}

pub fn run(settings: &Settings) -> Result<()> {
    let panel = Panel::new(settings.width, settings.height, settings.grid)?;
    info!(backend = "druid", "launching window");

    let init = AppState { is_selecting: false, activated: 0 };
    let window = WindowDesc::new(GridWidget { panel, cached_image: None })
        .title(|data: &AppState, _env: &Env| format!("cellasso - 已选中 {} 个单元格", data.activated))
        .menu(|_, _, _| make_menu())
        .window_size((settings.width as f64, settings.height as f64))
        .resizable(false);
    AppLauncher::with_window(window).launch(init)?;
    Ok(())
}

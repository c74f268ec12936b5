// src/window.rs
// minifb 前端：每帧轮询鼠标，把按下/移动/松开转换成 Panel 事件

use anyhow::Result;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::info;

use crate::cli::Settings;
use crate::geometry::Point;
use crate::panel::Panel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
}

/// 把逐帧的鼠标状态转换成边沿事件
#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        PointerTracker::default()
    }

    /// 每帧调用一次；同一帧最多产生一个事件
    pub fn update(&mut self, down: bool, pos: Option<(f32, f32)>) -> Option<PointerEvent> {
        let pos = pos.map(|(x, y)| Point::new(x as f64, y as f64));
        let event = match (self.was_down, down, pos) {
            (false, true, Some(p)) => Some(PointerEvent::Down(p)),
            (true, true, Some(p)) if self.last != Some(p) => Some(PointerEvent::Move(p)),
            (true, false, _) => Some(PointerEvent::Up),
            _ => None,
        };
        // 按下时拿不到坐标就当作没按下
        self.was_down = down && (self.was_down || pos.is_some());
        if pos.is_some() {
            self.last = pos;
        }
        event
    }
}

pub fn dispatch(panel: &mut Panel, event: PointerEvent) {
    match event {
        PointerEvent::Down(p) => panel.pointer_down(p),
        PointerEvent::Move(p) => {
            panel.pointer_move(p);
        }
        PointerEvent::Up => panel.pointer_up(),
    }
}

pub fn run(settings: &Settings) -> Result<()> {
    let mut panel = Panel::new(settings.width, settings.height, settings.grid)?;
    let (w, h) = (settings.width, settings.height);
    let mut window = Window::new("cellasso - Esc 退出, C 清除", w, h, WindowOptions::default())?;
    window.set_target_fps(60);
    info!(backend = "minifb", "launching window");

    let mut tracker = PointerTracker::new();
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let down = window.get_mouse_down(MouseButton::Left);
        let pos = window.get_mouse_pos(MouseMode::Clamp);
        if let Some(event) = tracker.update(down, pos) {
            dispatch(&mut panel, event);
        }
        if window.is_key_pressed(Key::C, KeyRepeat::No) {
            panel.clear_activation();
        }
        window.update_with_buffer(panel.visible().pixels(), w, h)?;
    }
    info!(activated = panel.activated_cells().count(), "window closed");
    Ok(())
}

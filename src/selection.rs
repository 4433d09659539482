use std::time::Duration;

use image::{Rgba, RgbaImage};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::SnipConfig;
use crate::crop::crop;
use crate::error::{Result, SnipError};
use crate::raster::{CapturedImage, CroppedImage};
use crate::selection_logic::{
    GestureState, Point, Region, RegionSelector, SelectorAction, SelectorEvent,
};

const POLL_INTERVAL: Duration = Duration::from_millis(4);

/// 绘制一帧：原图 + 半透明遮罩，选区内恢复原图，再画边框和四角
///
/// Pure function of its inputs; calling it twice yields identical canvases.
pub fn render_spotlight(
    image: &CapturedImage,
    gesture: Option<GestureState>,
    config: &SnipConfig,
) -> RgbaImage {
    let source = image.as_rgba();
    let mut canvas = source.clone();

    let keep = 255 - config.overlay_alpha as u32;
    for pix in canvas.pixels_mut() {
        for c in &mut pix.0[..3] {
            *c = (*c as u32 * keep / 255) as u8;
        }
    }

    let Some(gesture) = gesture else {
        return canvas;
    };
    let r = gesture.candidate();

    // 反遮罩
    let x1 = r.right().min(canvas.width() as u64) as u32;
    let y1 = r.bottom().min(canvas.height() as u64) as u32;
    for y in r.y..y1 {
        for x in r.x..x1 {
            canvas.put_pixel(x, y, *source.get_pixel(x, y));
        }
    }

    let [cr, cg, cb] = config.border_color;
    let color = Rgba([cr, cg, cb, 255]);
    stroke_rect(&mut canvas, r, config.border_width as i64, color);
    draw_corners(&mut canvas, r, config, color);
    canvas
}

/// Border centred on the rectangle's edges.
fn stroke_rect(canvas: &mut RgbaImage, r: Region, width: i64, color: Rgba<u8>) {
    if width == 0 {
        return;
    }
    let inner = width / 2;
    let outer = width - inner;
    let left = r.x as i64 - inner;
    let top = r.y as i64 - inner;
    let right = r.right() as i64 + outer;
    let bottom = r.bottom() as i64 + outer;

    fill_rect(canvas, left, top, right - left, width, color);
    fill_rect(canvas, left, bottom - width, right - left, width, color);
    fill_rect(canvas, left, top, width, bottom - top, color);
    fill_rect(canvas, right - width, top, width, bottom - top, color);
}

/// L-shaped accents poking slightly outside each corner.
fn draw_corners(canvas: &mut RgbaImage, r: Region, config: &SnipConfig, color: Rgba<u8>) {
    let size = config.corner_size as i64;
    let t = config.corner_thickness as i64;
    if size == 0 || t == 0 {
        return;
    }
    let off = t - 1;
    let (x, y) = (r.x as i64, r.y as i64);
    let (w, h) = (r.width as i64, r.height as i64);

    // top-left
    fill_rect(canvas, x - off, y - off, size, t, color);
    fill_rect(canvas, x - off, y - off, t, size, color);
    // top-right
    fill_rect(canvas, x + w - size + off, y - off, size, t, color);
    fill_rect(canvas, x + w - off, y - off, t, size, color);
    // bottom-left
    fill_rect(canvas, x - off, y + h - off, size, t, color);
    fill_rect(canvas, x - off, y + h - size + off, t, size, color);
    // bottom-right
    fill_rect(canvas, x + w - size + off, y + h - off, size, t, color);
    fill_rect(canvas, x + w - off, y + h - size + off, t, size, color);
}

fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, color: Rgba<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(canvas.width() as i64);
    let y1 = (y + h).min(canvas.height() as i64);
    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}

/// Packs RGBA into minifb's 0RGB words.
pub fn pack_frame(canvas: &RgbaImage, buffer: &mut Vec<u32>) {
    buffer.clear();
    buffer.extend(canvas.pixels().map(|p| {
        let [r, g, b, _] = p.0;
        ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
    }));
}

/// Window that shows the overlay and reports pointer gestures.
pub trait OverlaySurface {
    fn open(&mut self, width: u32, height: u32) -> Result<()>;

    fn present(&mut self, frame: &RgbaImage) -> Result<()>;

    /// Blocks until the next gesture event. `None` once the window is gone.
    fn next_event(&mut self) -> Option<SelectorEvent>;

    fn close(&mut self);
}

/// Full-screen borderless overlay on top of every other window.
#[derive(Default)]
pub struct MinifbOverlay {
    window: Option<Window>,
    buffer: Vec<u32>,
    mouse_down: bool,
    last_pos: Point,
    width: u32,
    height: u32,
}

impl MinifbOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Maps a raw pointer position onto region edge coordinates `0..=width`.
///
/// The cursor can only reach the last pixel column/row of a full-screen
/// window, so that pixel snaps to the far edge; otherwise the right-most
/// column and bottom row could never be selected.
pub fn pointer_to_point((x, y): (f32, f32), width: u32, height: u32) -> Point {
    fn axis(v: f32, extent: u32) -> u32 {
        if extent == 0 || !v.is_finite() || v <= 0.0 {
            return 0;
        }
        let px = v as u32;
        if px >= extent - 1 { extent } else { px }
    }
    Point::new(axis(x, width), axis(y, height))
}

impl OverlaySurface for MinifbOverlay {
    fn open(&mut self, width: u32, height: u32) -> Result<()> {
        let opts = WindowOptions {
            borderless: true,
            title: false,
            resize: false,
            topmost: true,
            ..WindowOptions::default()
        };
        let mut window = Window::new("snapnote", width as usize, height as usize, opts)
            .map_err(|e| SnipError::Overlay(e.to_string()))?;
        window.set_position(0, 0);
        window.set_target_fps(60);
        self.window = Some(window);
        self.width = width;
        self.height = height;
        self.mouse_down = false;
        Ok(())
    }

    fn present(&mut self, frame: &RgbaImage) -> Result<()> {
        let window = self
            .window
            .as_mut()
            .ok_or_else(|| SnipError::Overlay("overlay is not open".to_string()))?;
        pack_frame(frame, &mut self.buffer);
        window
            .update_with_buffer(&self.buffer, frame.width() as usize, frame.height() as usize)
            .map_err(|e| SnipError::Overlay(e.to_string()))
    }

    fn next_event(&mut self) -> Option<SelectorEvent> {
        loop {
            let window = self.window.as_mut()?;
            if !window.is_open() {
                return None;
            }
            if window.is_key_down(Key::Escape) {
                return Some(SelectorEvent::Cancel);
            }

            let down = window.get_mouse_down(MouseButton::Left);
            let (width, height) = (self.width, self.height);
            let pos = window
                .get_mouse_pos(MouseMode::Pass)
                .map(|raw| pointer_to_point(raw, width, height));
            match (self.mouse_down, down, pos) {
                (false, true, Some(p)) => {
                    self.mouse_down = true;
                    self.last_pos = p;
                    return Some(SelectorEvent::Press(p));
                }
                (true, true, Some(p)) if p != self.last_pos => {
                    self.last_pos = p;
                    return Some(SelectorEvent::Move(p));
                }
                (true, false, _) => {
                    self.mouse_down = false;
                    return Some(SelectorEvent::Release(pos.unwrap_or(self.last_pos)));
                }
                _ => {}
            }

            window.update();
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn close(&mut self) {
        self.window = None;
    }
}

/// Runs one selection session over `image` until a region is cropped or the
/// user cancels. The surface is closed on every exit path.
pub fn run_selection(
    image: &CapturedImage,
    surface: &mut dyn OverlaySurface,
    config: &SnipConfig,
) -> Result<Option<CroppedImage>> {
    let (w, h) = image.dimensions();
    surface.open(w, h)?;
    let result = drive(image, surface, config);
    surface.close();
    result
}

fn drive(
    image: &CapturedImage,
    surface: &mut dyn OverlaySurface,
    config: &SnipConfig,
) -> Result<Option<CroppedImage>> {
    let mut selector = RegionSelector::new(config.min_width, config.min_height);
    surface.present(&render_spotlight(image, None, config))?;

    loop {
        // A vanished window counts as cancellation.
        let event = surface.next_event().unwrap_or(SelectorEvent::Cancel);
        match selector.handle(event) {
            SelectorAction::None => {}
            SelectorAction::Redraw(gesture) => {
                surface.present(&render_spotlight(image, Some(gesture), config))?;
            }
            SelectorAction::Discard(region) => {
                log::debug!("Selection {} below minimum, discarded", region);
                surface.present(&render_spotlight(image, None, config))?;
            }
            SelectorAction::Commit(region) => match crop(image, region) {
                Ok(cropped) => {
                    log::info!("Committed selection {}", region);
                    return Ok(Some(cropped));
                }
                Err(_) => {
                    let err = SnipError::InvalidRegion {
                        region,
                        image_size: image.dimensions(),
                    };
                    log::warn!("{}", err);
                    selector.reject_commit();
                    surface.present(&render_spotlight(image, None, config))?;
                }
            },
            SelectorAction::Cancel => {
                log::info!("Selection cancelled");
                return Ok(None);
            }
        }
    }
}

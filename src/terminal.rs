// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based camera screen
//!
//! Drives the camera screen against the simulated camera. Mouse clicks on
//! the viewfinder become touches for the gesture arbiter, keys drive the
//! controls, and `+`/`-` play a synthetic two-finger pinch.

use crate::app::{CameraScreen, Message, ScreenRuntime, ScreenView, Services, Size, ViewfinderView};
use crate::backends::permission::{PermissionStatus, StaticPermission};
use crate::backends::virtual_camera::{SimulatedCatalog, SimulationSettings, default_devices};
use crate::config::Config;
use crate::gesture::{Point, PointerId, TouchEvent, TouchPhase, TouchSender};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Logical px covered by one terminal cell
const CELL_WIDTH: f32 = 8.0;
const CELL_HEIGHT: f32 = 16.0;

/// Pointer used for mouse touches
const MOUSE_POINTER: PointerId = 1;
/// Pointers used for synthetic pinches
const PINCH_POINTERS: (PointerId, PointerId) = (100, 101);

/// Exposure slider step for the arrow keys
const EXPOSURE_KEY_STEP: f32 = 0.05;

/// Terminal front-end options
#[derive(Debug, Clone, Default)]
pub struct TerminalOptions {
    /// Answer the permission prompt with "deny"
    pub deny_permission: bool,
}

/// Run the terminal camera screen until the user quits
pub fn run(
    config: Config,
    config_path: PathBuf,
    options: TerminalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = runtime.block_on(run_app(&mut terminal, config, config_path, options));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    config_path: PathBuf,
    options: TerminalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let photo_dir = config.photo_directory();
    let catalog = SimulatedCatalog::new(
        default_devices(),
        photo_dir.clone(),
        Arc::new(SimulationSettings::default()),
    );
    let answer = if options.deny_permission {
        PermissionStatus::Denied
    } else {
        PermissionStatus::Granted
    };
    let permissions = StaticPermission::new(PermissionStatus::Undetermined, answer);
    let services = Services::new(Arc::new(catalog), Arc::new(permissions));

    let (screen, initial) = CameraScreen::new(config, Some(config_path), services);
    let mut runtime = ScreenRuntime::new(screen, initial);
    let touches = runtime.spawn_input_context();
    info!(photos = %photo_dir.display(), "Terminal camera started");

    let stop = Arc::new(AtomicBool::new(false));
    let mut events = spawn_event_reader(Arc::clone(&stop));
    let mut redraw = tokio::time::interval(Duration::from_millis(50));
    let mut viewport = Size::default();
    let mut status = help_message().to_string();

    let result = loop {
        tokio::select! {
            Some(message) = runtime.recv() => runtime.dispatch(message),
            event = events.recv() => {
                let Some(event) = event else {
                    break Ok(());
                };
                match handle_event(event, &mut runtime, &touches, viewport) {
                    Input::Quit => break Ok(()),
                    Input::Status(message) => status = message,
                    Input::Handled => {}
                }
            }
            _ = redraw.tick() => {
                let view = runtime.screen().view();
                if let ScreenView::Viewfinder(vf) = &view
                    && let Some(preview) = &vf.preview
                {
                    status = format!("Saved: {}", preview.display());
                }

                let mut drawn_area = Rect::default();
                let drawn = terminal.draw(|f| {
                    let area = f.area();
                    let view_area = Rect {
                        height: area.height.saturating_sub(1),
                        ..area
                    };
                    drawn_area = view_area;
                    f.render_widget(ScreenWidget { view: &view }, view_area);
                    let status_area = Rect {
                        y: area.height.saturating_sub(1),
                        height: 1,
                        ..area
                    };
                    f.render_widget(StatusBar { message: &status }, status_area);
                });
                if let Err(e) = drawn {
                    break Err(e.into());
                }

                let size = Size::new(
                    drawn_area.width as f32 * CELL_WIDTH,
                    drawn_area.height as f32 * CELL_HEIGHT,
                );
                if size != viewport {
                    viewport = size;
                    runtime.dispatch(Message::ViewportResized(size));
                }
            }
        }
    };

    stop.store(true, Ordering::SeqCst);
    runtime.dispatch(Message::ScreenFocusChanged(false));
    result
}

/// Read crossterm events on a blocking thread
fn spawn_event_reader(stop: Arc<AtomicBool>) -> mpsc::UnboundedReceiver<Event> {
    let (sender, receiver) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            match event::poll(Duration::from_millis(16)) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }
        }
    });
    receiver
}

enum Input {
    Handled,
    Status(String),
    Quit,
}

fn handle_event(
    event: Event,
    runtime: &mut ScreenRuntime,
    touches: &TouchSender,
    viewport: Size,
) -> Input {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Input::Quit;
            }
            let message = match key.code {
                KeyCode::Char('q') => return Input::Quit,
                KeyCode::Char('h') => return Input::Status(help_message().to_string()),
                KeyCode::Char(' ') | KeyCode::Char('p') => Message::Capture,
                KeyCode::Char('f') => Message::ToggleFlash,
                KeyCode::Char('g') => Message::ToggleGrid,
                KeyCode::Char('t') => Message::CycleTimer,
                KeyCode::Char('s') => Message::FlipCamera,
                KeyCode::Char('e') => Message::ToggleExposureSlider,
                KeyCode::Char('r') => Message::RequestPermission,
                KeyCode::Char('o') => Message::OpenSettings,
                KeyCode::Char(c @ '1'..='3') => {
                    Message::SetZoomPreset(f32::from(c as u8 - b'0'))
                }
                KeyCode::Up | KeyCode::Down => {
                    let step = if key.code == KeyCode::Up {
                        EXPOSURE_KEY_STEP
                    } else {
                        -EXPOSURE_KEY_STEP
                    };
                    let current = slider_position(runtime.screen().exposure().value());
                    Message::DragExposure((current + step).clamp(0.0, 1.0))
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    synthetic_pinch(touches, center(viewport), 1.25);
                    return Input::Handled;
                }
                KeyCode::Char('-') => {
                    synthetic_pinch(touches, center(viewport), 0.8);
                    return Input::Handled;
                }
                _ => return Input::Handled,
            };
            runtime.dispatch(message);
            Input::Handled
        }
        Event::Mouse(mouse) => {
            let position = Point::new(
                (mouse.column as f32 + 0.5) * CELL_WIDTH,
                (mouse.row as f32 + 0.5) * CELL_HEIGHT,
            );
            let phase = match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => TouchPhase::Down,
                MouseEventKind::Drag(MouseButton::Left) => TouchPhase::Move,
                MouseEventKind::Up(MouseButton::Left) => TouchPhase::Up,
                _ => return Input::Handled,
            };
            touches.send(TouchEvent::now(MOUSE_POINTER, phase, position));
            Input::Handled
        }
        Event::FocusLost => {
            runtime.dispatch(Message::ScreenFocusChanged(false));
            Input::Handled
        }
        Event::FocusGained => {
            runtime.dispatch(Message::ScreenFocusChanged(true));
            Input::Handled
        }
        _ => Input::Handled,
    }
}

/// Track position (bottom = 0) for an exposure value
fn slider_position(exposure: f32) -> f32 {
    use crate::constants::{EXPOSURE_MAX, EXPOSURE_MIN};
    (exposure - EXPOSURE_MIN) / (EXPOSURE_MAX - EXPOSURE_MIN)
}

fn center(viewport: Size) -> Point {
    Point::new(viewport.width / 2.0, viewport.height / 2.0)
}

/// Two fingers land around `center` and spread (or close) to `scale`
fn synthetic_pinch(touches: &TouchSender, center: Point, scale: f32) {
    const HALF_SPAN: f32 = 60.0;
    const STEPS: u8 = 4;
    let (a, b) = PINCH_POINTERS;
    let at = |offset: f32, sign: f32| Point::new(center.x + sign * offset, center.y);

    touches.send(TouchEvent::now(a, TouchPhase::Down, at(HALF_SPAN, -1.0)));
    touches.send(TouchEvent::now(b, TouchPhase::Down, at(HALF_SPAN, 1.0)));
    for step in 1..=STEPS {
        let offset = HALF_SPAN * (1.0 + (scale - 1.0) * f32::from(step) / f32::from(STEPS));
        touches.send(TouchEvent::now(a, TouchPhase::Move, at(offset, -1.0)));
        touches.send(TouchEvent::now(b, TouchPhase::Move, at(offset, 1.0)));
    }
    let end = HALF_SPAN * scale;
    touches.send(TouchEvent::now(a, TouchPhase::Up, at(end, -1.0)));
    touches.send(TouchEvent::now(b, TouchPhase::Up, at(end, 1.0)));
}

fn help_message() -> &'static str {
    "click focus | dbl-click flip | +/- pinch | 1-3 zoom | space shoot | f flash | g grid | t timer | e/↑/↓ exposure | q quit"
}

/// Permission panel or viewfinder
struct ScreenWidget<'a> {
    view: &'a ScreenView,
}

impl Widget for ScreenWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.view {
            ScreenView::Permission(permission) => {
                let lines: Vec<&str> = if permission.waiting {
                    vec!["Waiting for camera permission..."]
                } else if permission.can_open_settings {
                    vec![
                        "Camera access was denied.",
                        "",
                        "'r' ask again | 'o' open settings",
                    ]
                } else {
                    vec!["Camera access is needed.", "", "'r' allow camera"]
                };
                render_centered(&lines, area, buf, Style::default());
            }
            ScreenView::Viewfinder(vf) => render_viewfinder(vf, area, buf),
        }
    }
}

fn render_viewfinder(vf: &ViewfinderView, area: Rect, buf: &mut Buffer) {
    // Shutter overlay covers everything
    if vf.flash_overlay.is_some() {
        fill(area, buf, Color::White);
        return;
    }

    if vf.grid {
        for third in [1, 2] {
            let x = area.x + area.width * third / 3;
            let y = area.y + area.height * third / 3;
            for row in area.y..area.y + area.height {
                if let Some(cell) = buf.cell_mut((x, row)) {
                    cell.set_char('│').set_fg(Color::DarkGray);
                }
            }
            for col in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((col, y)) {
                    let c = if cell.symbol() == "│" { '┼' } else { '─' };
                    cell.set_char(c).set_fg(Color::DarkGray);
                }
            }
        }
    }

    // Top bar
    let device = match (&vf.device_name, vf.position) {
        (Some(name), Some(position)) => format!("{} ({})", name, position),
        _ => "No camera".to_string(),
    };
    let format = vf.format.map(|f| f.to_string()).unwrap_or_default();
    let state = if !vf.ready { " | starting..." } else { "" };
    let top = format!(
        " {} {} | flash {} | timer {}{}{}",
        device,
        format,
        vf.flash.display_name(),
        vf.timer.display_name(),
        if vf.mirrored { " | mirrored" } else { "" },
        state
    );
    buf.set_string(area.x, area.y, truncate(&top, area.width), Style::default().fg(Color::Yellow));

    if let Some(point) = vf.focus_ring {
        let x = area.x + (point.x / CELL_WIDTH) as u16;
        let y = area.y + (point.y / CELL_HEIGHT) as u16;
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char('◎').set_fg(Color::Yellow);
        }
    }

    if let Some(seconds) = vf.countdown {
        render_centered(&[&seconds.to_string()], area, buf, Style::default().fg(Color::White));
    } else if vf.capturing {
        render_centered(&["●"], area, buf, Style::default().fg(Color::Red));
    }

    if vf.zoom_indicator {
        let label = format!("{:.1}x", vf.zoom);
        let x = area.x + area.width.saturating_sub(label.len() as u16) / 2;
        let y = area.y + area.height.saturating_sub(3);
        buf.set_string(x, y, label, Style::default().fg(Color::Yellow));
    }

    // Zoom presets row
    let presets: Vec<String> = vf
        .zoom_presets
        .iter()
        .map(|p| {
            if p.selected {
                format!("[{}x]", p.level)
            } else {
                format!(" {}x ", p.level)
            }
        })
        .collect();
    let presets = presets.join(" ");
    let x = area.x + area.width.saturating_sub(presets.len() as u16) / 2;
    let y = area.y + area.height.saturating_sub(2);
    buf.set_string(x, y, presets, Style::default());

    if vf.exposure_slider {
        let label = format!("EV {:+.1}", vf.exposure);
        let x = area.x + area.width.saturating_sub(label.len() as u16 + 1);
        let y = area.y + area.height / 2;
        buf.set_string(x, y, label, Style::default().fg(Color::Cyan));
    }
}

fn render_centered(lines: &[&str], area: Rect, buf: &mut Buffer, style: Style) {
    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let x = area.x + area.width.saturating_sub(line.chars().count() as u16) / 2;
        let y = top + i as u16;
        if y < area.y + area.height {
            buf.set_string(x, y, truncate(line, area.width), style);
        }
    }
}

fn fill(area: Rect, buf: &mut Buffer, color: Color) {
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }
}

fn truncate(text: &str, width: u16) -> String {
    text.chars().take(width as usize).collect()
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        fill(area, buf, Color::DarkGray);
        buf.set_string(
            area.x,
            area.y,
            truncate(self.message, area.width),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}

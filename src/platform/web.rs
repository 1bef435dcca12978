//! Browser glue: websocket transport and canvas sizing

use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, WebSocket, Window};

use crate::error::TransportError;
use crate::field::FieldConfig;
use crate::protocol::Transport;
use crate::transform::fit_surface;

/// Sends outbound frames over a browser websocket
pub struct WsTransport {
    socket: WebSocket,
}

impl WsTransport {
    pub fn connect(url: &str) -> Result<Self, JsValue> {
        let socket = WebSocket::new(url)?;
        log::info!("Connecting to {}", url);
        Ok(Self { socket })
    }

    pub fn socket(&self) -> &WebSocket {
        &self.socket
    }
}

impl Transport for WsTransport {
    fn send_text(&mut self, text: &str) -> Result<(), TransportError> {
        if self.socket.ready_state() != WebSocket::OPEN {
            return Err(TransportError::Closed);
        }
        self.socket
            .send_with_str(text)
            .map_err(|e| TransportError::Send(format!("{:?}", e)))
    }
}

/// Canvas dimensions after a fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// CSS pixels; what pointer events and the transform use
    pub logical: (f32, f32),
    /// Backing store pixels; what the surface is configured with
    pub physical: (u32, u32),
}

/// Inner window size in CSS pixels
pub fn window_size(window: &Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

/// Size the canvas to fill the window, shrunk to the field's aspect ratio
/// once a config is known
pub fn fit_canvas(
    window: &Window,
    canvas: &HtmlCanvasElement,
    config: Option<&FieldConfig>,
) -> CanvasSize {
    let (ww, wh) = window_size(window);
    let (w, h) = match config {
        Some(config) => fit_surface(config, ww, wh),
        None => (ww, wh),
    };

    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", w));
    let _ = style.set_property("height", &format!("{}px", h));

    let dpr = window.device_pixel_ratio();
    let physical = (
        ((w as f64 * dpr) as u32).max(1),
        ((h as f64 * dpr) as u32).max(1),
    );
    canvas.set_width(physical.0);
    canvas.set_height(physical.1);

    CanvasSize {
        logical: (w, h),
        physical,
    }
}

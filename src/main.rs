//! Pitchside entry point
//!
//! On the web this wires the canvas, WebGPU and the server socket into a
//! session. Natively it replays a recorded transcript through the same
//! session and prints the input messages it would have sent.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_client {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CloseEvent, HtmlCanvasElement, MessageEvent, PointerEvent, Window};

    use pitchside::Settings;
    use pitchside::platform::web::{WsTransport, fit_canvas};
    use pitchside::protocol::{Outcome, Session};
    use pitchside::renderer::RenderState;

    type ClientSession = Session<RenderState, WsTransport>;

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let settings = Settings::load();
        if let Some(level) = settings.log_level_filter().to_level() {
            console_log::init_with_level(level).map_err(|e| JsValue::from_str(&e.to_string()))?;
        }

        log::info!("Pitchside starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Full window until the field's aspect ratio is known
        let size = fit_canvas(&window, &canvas, None);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            size.physical.0,
            size.physical.1,
            settings.circle_segments(),
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let location = window.location();
        let secure = location.protocol()? == "https:";
        let url = settings.socket_url(&location.host()?, secure);
        let transport = WsTransport::connect(&url)?;
        let socket = transport.socket().clone();

        let session = Rc::new(RefCell::new(Session::new(render_state, transport)));
        session.borrow_mut().on_resize(size.logical.0, size.logical.1);

        setup_socket_handlers(&socket, &window, &canvas, session.clone());
        setup_input_handlers(&window, &canvas, session);

        log::info!("Pitchside running!");
        Ok(())
    }

    /// Refit the canvas and push the new size through the session
    fn refit(window: &Window, canvas: &HtmlCanvasElement, session: &mut ClientSession) {
        let size = fit_canvas(window, canvas, session.config());
        session.sink_mut().resize(size.physical.0, size.physical.1);
        session.on_resize(size.logical.0, size.logical.1);
    }

    fn setup_socket_handlers(
        socket: &web_sys::WebSocket,
        window: &Window,
        canvas: &HtmlCanvasElement,
        session: Rc<RefCell<ClientSession>>,
    ) {
        // Every state message drives one frame and one reply
        {
            let window = window.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    log::warn!("Ignoring non-text frame");
                    return;
                };
                let mut s = session.borrow_mut();
                if let Outcome::Configured | Outcome::Reconfigured = s.on_message(&text) {
                    refit(&window, &canvas, &mut s);
                }
            });
            socket.set_onmessage(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::info!("Connected");
            });
            socket.set_onopen(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        // No reconnect; the page has to be reloaded
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: CloseEvent| {
                log::warn!("Connection closed ({}): {}", event.code(), event.reason());
            });
            socket.set_onclose(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::error!("WebSocket error");
            });
            socket.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
    }

    fn setup_input_handlers(
        window: &Window,
        canvas: &HtmlCanvasElement,
        session: Rc<RefCell<ClientSession>>,
    ) {
        // Pointer position relative to the canvas, tracked even outside it
        {
            let session = session.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let rect = canvas.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                session.borrow_mut().on_pointer(x, y);
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let window_clone = window.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                refit(&window_clone, &canvas, &mut session.borrow_mut());
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_client::run().await {
        log::error!("Startup failed: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    use pitchside::platform::native::{LineTransport, LogSink};
    use pitchside::protocol::{Outcome, Session};
    use pitchside::transform::fit_surface;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: pitchside <transcript.jsonl> [width height]")?;
    let width: f32 = match args.next() {
        Some(w) => w.parse().context("invalid width")?,
        None => 800.0,
    };
    let height: f32 = match args.next() {
        Some(h) => h.parse().context("invalid height")?,
        None => 600.0,
    };

    let file = File::open(&path).with_context(|| format!("failed to open {}", path))?;
    log::info!("Replaying {} at {}x{}", path, width, height);

    let stdout = std::io::stdout().lock();
    let mut session = Session::new(LogSink::default(), LineTransport::new(stdout));
    session.on_resize(width, height);

    let mut rejected = 0usize;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        match session.on_message(&line) {
            Outcome::Configured | Outcome::Reconfigured => {
                // Same shrink-to-aspect the browser canvas gets
                if let Some(config) = session.config() {
                    let (w, h) = fit_surface(config, width, height);
                    session.on_resize(w, h);
                }
            }
            Outcome::Rejected(e) => {
                log::warn!("Line {}: {}", index + 1, e);
                rejected += 1;
            }
            Outcome::Frame(_) | Outcome::Ignored(_) => {}
        }
    }

    log::info!(
        "Replay finished: {} frames ({} draw commands in the last), {} messages sent, {} rejected",
        session.sink().frames,
        session.sink().last_command_count,
        session.transport().sent,
        rejected
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

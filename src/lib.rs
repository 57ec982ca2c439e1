#![cfg(target_arch = "wasm32")]
use crate::core::{PageConfig, SceneController};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod generation;
mod input;
mod overlay;
mod render;
mod reveal;
mod viewport;

/// Everything the mounted page holds on to. Dropping it tears the scene down:
/// the frame loop stops, listeners are removed and the observer disconnects.
struct App {
    _frame_loop: Option<frame::LoopHandle>,
    _listeners: Vec<events::ListenerGuard>,
    _observer: Option<reveal::ObserverGuard>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    // Bumped on every mount/unmount so a pending init can tell it was superseded.
    static GENERATION: generation::Generation = const { generation::Generation::new() };
}

fn is_current(token: u64) -> bool {
    GENERATION.with(|g| g.is_current(token))
}

fn next_generation() -> u64 {
    GENERATION.with(|g| g.advance())
}

fn read_page_config(canvas: &web::HtmlCanvasElement) -> PageConfig {
    match PageConfig::from_attributes(
        canvas.get_attribute("data-variant").as_deref(),
        canvas.get_attribute("data-seed").as_deref(),
        canvas.get_attribute("data-reveal-once").as_deref(),
    ) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            PageConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mnemosyne-web starting");
    mount();
    Ok(())
}

/// Build the scene for the current page, replacing any mounted one.
#[wasm_bindgen]
pub fn mount() {
    unmount();
    let generation = next_generation();
    spawn_local(async move {
        if let Err(e) = init(generation).await {
            log::error!("init error: {:?}", e);
        }
    });
}

/// Tear the scene down. Safe to call repeatedly or before init has finished.
#[wasm_bindgen]
pub fn unmount() {
    next_generation();
    if let Some(app) = APP.with(|a| a.borrow_mut().take()) {
        drop(app);
        log::info!("[scene] unmounted");
    }
}

async fn init(generation: u64) -> anyhow::Result<()> {
    // A later mount() owns the page; attaching here would release its sections.
    if !is_current(generation) {
        log::info!("[scene] init superseded before start; skipping");
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = read_page_config(&canvas);
    let params = config.scene_params();
    let seed = config.seed.unwrap_or_else(rand::random);
    let reveal_pin_once = params.reveal_pin_once;

    // Content reveal does not depend on the 3D layer; attach it first.
    let observer = reveal::attach(&document, reveal_pin_once);

    // Maintain canvas internal pixel size to match CSS size * clamped devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let scene = Rc::new(RefCell::new(SceneController::new(params, seed)));
    {
        let m = dom::scroll_metrics(&window);
        scene
            .borrow_mut()
            .on_scroll(m.scroll_y, m.document_height, m.viewport_height);
    }
    let listeners = events::wire_scene_input(&window, &canvas, &scene);
    APP.with(|a| {
        *a.borrow_mut() = Some(App {
            _frame_loop: None,
            _listeners: listeners,
            _observer: observer,
        })
    });

    let (scene_params, sprites, lines) = {
        let s = scene.borrow();
        let (sprites, lines) = frame::gpu_capacities(&s);
        (s.params().clone(), sprites, lines)
    };
    let gpu = frame::init_gpu(canvas.clone(), &scene_params, sprites, lines).await;
    if !is_current(generation) {
        log::info!("[scene] init superseded; discarding");
        return Ok(());
    }
    let Some(gpu) = gpu else {
        log::warn!("[gpu] 3D layer unavailable; content only");
        return Ok(());
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        gpu: Some(gpu),
        canvas,
        last_instant: Instant::now(),
    }));
    let handle = frame::start_loop(frame_ctx);
    APP.with(|a| {
        if let Some(app) = a.borrow_mut().as_mut() {
            app._frame_loop = Some(handle);
        }
    });
    Ok(())
}

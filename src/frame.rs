use crate::core::connector::LINE_VERTEX_FLOATS;
use crate::core::{SceneController, SceneParams};
use crate::dom;
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<SceneController>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // Handlers only touch rig targets, so the whole tick runs under one borrow.
        let mut scene = self.scene.borrow_mut();
        scene.tick(dt_sec);

        let Some(g) = &mut self.gpu else {
            return;
        };
        dom::sync_canvas_backing_size(&self.canvas);
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        match g.render(&scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = g.size();
                log::warn!("[gpu] surface lost; reconfiguring at {}x{}", w, h);
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

/// Sprite instance and line vertex capacities the renderer needs for `scene`.
pub fn gpu_capacities(scene: &SceneController) -> (usize, usize) {
    let sprites = scene.sprites().len();
    let lines = (scene.ring_vertices().len() + scene.connector().buffer().raw().len())
        / LINE_VERTEX_FLOATS;
    (sprites, lines)
}

pub async fn init_gpu(
    canvas: web::HtmlCanvasElement,
    params: &SceneParams,
    sprite_capacity: usize,
    line_vertex_capacity: usize,
) -> Option<render::GpuState<'static>> {
    match render::GpuState::new(canvas, params, sprite_capacity, line_vertex_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Keeps the requestAnimationFrame loop alive. Dropping the handle cancels
/// the pending frame and frees the loop closure.
pub struct LoopHandle {
    tick: FrameCallback,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &FrameCallback, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    // The closure holds weak links back to the loop state so dropping the
    // handle is enough to end it.
    let tick_weak = Rc::downgrade(&tick);
    let raf_weak = Rc::downgrade(&raf_id);
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(tick), Some(raf_id)) = (tick_weak.upgrade(), raf_weak.upgrade()) {
            request_frame(&tick, &raf_id);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    LoopHandle { tick, raf_id }
}

use crate::core::SceneController;
use crate::dom;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener. Dropping the guard removes the listener and
/// frees its closure.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::warn!("[events] could not listen for '{}': {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Scroll, pointer and resize listeners feeding the scene.
pub fn wire_scene_input(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<SceneController>>,
) -> Vec<ListenerGuard> {
    let mut guards = Vec::with_capacity(3);

    let scene_scroll = scene.clone();
    let win_scroll = window.clone();
    guards.extend(ListenerGuard::new(window, "scroll", move |_| {
        let m = dom::scroll_metrics(&win_scroll);
        scene_scroll
            .borrow_mut()
            .on_scroll(m.scroll_y, m.document_height, m.viewport_height);
    }));

    let scene_pointer = scene.clone();
    let win_pointer = window.clone();
    guards.extend(ListenerGuard::new(window, "pointermove", move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            let x = input::pointer_ndc_x(ev.client_x() as f32, dom::viewport_width(&win_pointer));
            scene_pointer.borrow_mut().on_pointer(x);
        }
    }));

    // The canvas backing store follows its CSS size; the renderer picks the
    // new size up on the next frame.
    let canvas_resize = canvas.clone();
    let scene_resize = scene.clone();
    let win_resize = window.clone();
    guards.extend(ListenerGuard::new(window, "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas_resize);
        let m = dom::scroll_metrics(&win_resize);
        scene_resize
            .borrow_mut()
            .on_scroll(m.scroll_y, m.document_height, m.viewport_height);
    }));

    guards
}

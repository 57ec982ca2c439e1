use crate::constants::{REVEAL_FALLBACK_SELECTOR, REVEAL_SELECTOR};
use crate::core::reveal::{RevealController, RevealPolicy, Transition};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const KEY_ATTR: &str = "data-reveal-key";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

/// The page's intersection observer. Dropping the guard disconnects it and
/// hands every observed section back to the page in its visible state.
pub struct ObserverGuard {
    observer: web::IntersectionObserver,
    _callback: ObserverCallback,
    sections: Vec<web::Element>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
        for el in &self.sections {
            overlay::release(el);
        }
        log::info!("[reveal] observer released ({} sections)", self.sections.len());
    }
}

fn section_key(el: &web::Element) -> Option<String> {
    let id = el.id();
    if !id.is_empty() {
        return Some(id);
    }
    el.get_attribute(KEY_ATTR)
}

fn collect_sections(document: &web::Document) -> Vec<web::Element> {
    let query = |selector: &str| -> Vec<web::Element> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<web::Element>().ok())
            .collect()
    };
    let tagged = query(REVEAL_SELECTOR);
    if tagged.is_empty() {
        query(REVEAL_FALLBACK_SELECTOR)
    } else {
        tagged
    }
}

/// Observe every reveal section in `document`. Returns `None` when there is
/// nothing to observe or the observer cannot be created; the content is left
/// visible in that case.
pub fn attach(document: &web::Document, default_pin_once: bool) -> Option<ObserverGuard> {
    let sections = collect_sections(document);
    if sections.is_empty() {
        log::info!("[reveal] no sections to observe");
        return None;
    }

    let mut controller = RevealController::new();
    let mut thresholds: Vec<f32> = Vec::new();
    let mut observed = Vec::with_capacity(sections.len());
    for (i, el) in sections.into_iter().enumerate() {
        if el.id().is_empty() && el.get_attribute(KEY_ATTR).is_none() {
            _ = el.set_attribute(KEY_ATTR, &format!("reveal-{}", i));
        }
        let Some(key) = section_key(&el) else {
            continue;
        };
        let policy = match RevealPolicy::from_attributes(
            default_pin_once,
            el.get_attribute("data-reveal-once").as_deref(),
            el.get_attribute("data-reveal-amount").as_deref(),
        ) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[config] section '{}': {}; using defaults", key, e);
                RevealPolicy {
                    pin_once: default_pin_once,
                    ..RevealPolicy::default()
                }
            }
        };
        if !thresholds.iter().any(|t| (t - policy.amount).abs() < 1e-6) {
            thresholds.push(policy.amount);
        }
        controller.register(&key, policy);
        observed.push(el);
    }
    let controller = Rc::new(RefCell::new(controller));

    let state = controller.clone();
    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                let el = entry.target();
                let Some(key) = section_key(&el) else {
                    continue;
                };
                let mut c = state.borrow_mut();
                let Some(policy) = c.policy(&key) else {
                    continue;
                };
                let visible =
                    entry.is_intersecting() && entry.intersection_ratio() >= policy.amount as f64;
                match c.on_intersection(&key, visible) {
                    Some(Transition::Reveal) => {
                        overlay::apply(&el, true);
                        if policy.pin_once {
                            observer.unobserve(&el);
                        }
                    }
                    Some(Transition::Hide) => overlay::apply(&el, false),
                    None => {}
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let threshold_list: js_sys::Array = thresholds
        .iter()
        .map(|t| JsValue::from_f64(*t as f64))
        .collect();
    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&threshold_list);
    let observer = match web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("[reveal] IntersectionObserver unavailable: {:?}", e);
            return None;
        }
    };

    // Hide only once the observer exists, so a failure never strands content.
    for el in &observed {
        overlay::apply(el, false);
        observer.observe(el);
    }
    log::info!(
        "[reveal] observing {} sections (pin_once default={})",
        controller.borrow().len(),
        default_pin_once
    );

    Some(ObserverGuard {
        observer,
        _callback: callback,
        sections: observed,
    })
}

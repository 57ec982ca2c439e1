use crate::constants::{REVEAL_HIDDEN_CLASS, REVEAL_VISIBLE_CLASS};
use crate::core::reveal::SectionStyle;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Put a section into its hidden or visible state.
#[inline]
pub fn apply(el: &web::Element, visible: bool) {
    let cl = el.class_list();
    let (on, off) = if visible {
        (REVEAL_VISIBLE_CLASS, REVEAL_HIDDEN_CLASS)
    } else {
        (REVEAL_HIDDEN_CLASS, REVEAL_VISIBLE_CLASS)
    };
    _ = cl.remove_1(off);
    _ = cl.add_1(on);
    // fallback for pages without the reveal classes in their CSS
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        let style = html.style();
        for (name, value) in SectionStyle::for_visibility(visible).properties() {
            _ = style.set_property(name, &value);
        }
    }
}

/// Hand a section back to the page visible, with its own inline styles intact.
#[inline]
pub fn release(el: &web::Element) {
    let cl = el.class_list();
    _ = cl.remove_2(REVEAL_HIDDEN_CLASS, REVEAL_VISIBLE_CLASS);
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        let style = html.style();
        for name in SectionStyle::PROPERTIES {
            _ = style.remove_property(name);
        }
    }
}

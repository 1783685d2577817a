use gloo_timers::callback::Timeout;
use t20_core::nav::Transition;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::api::describe;

/// Turns every `.card` into a fade-out link to its `data-cat` category.
pub fn install(document: &Document) -> Result<(), JsValue> {
    let cards = document.query_selector_all(".card")?;

    for index in 0..cards.length() {
        let Some(card) = cards
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        let target = card.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let category = target.get_attribute("data-cat");
            if let Some(transition) = Transition::to_category(category.as_deref()) {
                start(&transition);
            }
        });
        card.set_onclick(Some(on_click.as_ref().unchecked_ref()));
        on_click.forget();
    }

    Ok(())
}

/// Fades the page, then navigates once the delay has passed. The timer is
/// never cancelled.
fn start(transition: &Transition) {
    let Some(window) = web_sys::window() else {
        return;
    };

    if let Some(body) = window.document().and_then(|document| document.body()) {
        if let Err(error) = body.style().set_property("opacity", transition.opacity) {
            log::debug!("fade skipped: {}", describe(&error));
        }
    }

    let href = transition.href.clone();
    Timeout::new(transition.delay_ms, move || {
        if let Err(error) = window.location().set_href(&href) {
            log::warn!("navigation to {href} failed: {}", describe(&error));
        }
    })
    .forget();
}

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use t20_core::hover::{ancestors, clamp_to_viewport, HoverState, Point, PopupContent, PopupUpdate, Size};
use t20_core::PlayerCache;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlImageElement, MouseEvent};

use crate::api::describe;
use crate::dom::{placeholder_handler, PLAYER_NAME_ATTR};

pub type SharedHover = Rc<RefCell<HoverState<Element>>>;

const HIDDEN_CLASS: &str = "hidden";

/// The floating panel: `#player-hover` holding `#player-info` and
/// `#player-photo`.
#[derive(Clone)]
struct Popup {
    document: Document,
    root: HtmlElement,
    info: Element,
    photo: HtmlImageElement,
}

impl Popup {
    fn find(document: &Document) -> Option<Self> {
        let root = document
            .get_element_by_id("player-hover")?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let info = document.get_element_by_id("player-info")?;
        let photo = document
            .get_element_by_id("player-photo")?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        Some(Self {
            document: document.clone(),
            root,
            info,
            photo,
        })
    }

    fn show(&self, update: &PopupUpdate) -> Result<(), JsValue> {
        let content = &update.content;
        self.info.set_inner_html("");

        self.line("font-weight:700;font-size:1.1em;color:#e4007a;", &content.name)?;
        self.line("color:#5a00b8;", &content.team)?;
        self.line("color:#00bfae;", &content.role)?;

        let stats = self.line("margin-top:0.3em;font-size:0.95em;", "")?;
        for (prefix, value) in stat_segments(content) {
            stats.append_with_str_1(prefix)?;
            let bold = self.document.create_element("b")?;
            bold.set_text_content(Some(value));
            stats.append_with_node_1(&bold)?;
        }

        self.photo.set_src(&content.image_src);
        self.root.class_list().remove_1(HIDDEN_CLASS)?;

        self.place_after_layout(update.anchor);
        Ok(())
    }

    fn line(&self, style: &str, text: &str) -> Result<Element, JsValue> {
        let div = self.document.create_element("div")?;
        div.set_attribute("style", style)?;
        if !text.is_empty() {
            div.set_text_content(Some(text));
        }
        self.info.append_child(&div)?;
        Ok(div)
    }

    /// The popup's size is only known once the browser has laid it out.
    fn place_after_layout(&self, anchor: Point) {
        let root = self.root.clone();
        Timeout::new(0, move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let rect = root.get_bounding_client_rect();
            let viewport = Size {
                width: window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(f64::INFINITY),
                height: window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(f64::INFINITY),
            };
            let popup = Size {
                width: rect.width(),
                height: rect.height(),
            };
            let position = clamp_to_viewport(anchor, popup, viewport);
            let style = root.style();
            let placed = style
                .set_property("left", &format!("{}px", position.x))
                .and_then(|()| style.set_property("top", &format!("{}px", position.y)));
            if let Err(error) = placed {
                log::warn!("could not place player popup: {}", describe(&error));
            }
        })
        .forget();
    }

    fn hide(&self) {
        if let Err(error) = self.root.class_list().add_1(HIDDEN_CLASS) {
            log::warn!("could not hide player popup: {}", describe(&error));
        }
    }
}

/// `Runs: 151 | SR: 112.68 | Avg: 0` as (text prefix, bold value) pairs.
fn stat_segments(content: &PopupContent) -> [(&'static str, &str); 3] {
    [
        ("Runs: ", content.runs.as_str()),
        (" | SR: ", content.strike_rate.as_str()),
        (" | Avg: ", content.bat_avg.as_str()),
    ]
}

/// Target element and its ancestors, innermost first.
fn event_path(target: Option<EventTarget>) -> Vec<Element> {
    ancestors(
        target.and_then(|target| target.dyn_into::<Element>().ok()),
        |element: &Element| element.parent_element(),
    )
}

/// Player name from server-rendered markup.
fn player_name_attr(element: &Element) -> Option<String> {
    element.get_attribute(PLAYER_NAME_ATTR)
}

/// Wires the body-level pointer listeners and the popup's own leave
/// handler. Pages without the popup markup get no listeners.
pub fn install(
    document: &Document,
    cache: Rc<PlayerCache>,
    hover: SharedHover,
) -> Result<(), JsValue> {
    let Some(popup) = Popup::find(document) else {
        log::debug!("no player popup on this page");
        return Ok(());
    };
    let Some(body) = document.body() else {
        return Ok(());
    };

    let on_enter = {
        let popup = popup.clone();
        let hover = hover.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let path = event_path(event.target());
            let Some((target, name)) = hover.borrow_mut().pointer_enter(&path, player_name_attr) else {
                return;
            };
            let pointer = Point {
                x: f64::from(event.client_x()),
                y: f64::from(event.client_y()),
            };

            let cache = cache.clone();
            let hover = hover.clone();
            let popup = popup.clone();
            spawn_local(async move {
                let players = match cache.get().await {
                    Ok(players) => players,
                    Err(error) => {
                        log::warn!("player lookup failed: {error}");
                        return;
                    }
                };
                let update = hover
                    .borrow_mut()
                    .lookup_resolved(&target, &name, &players, pointer);
                if let Some(update) = update {
                    if let Err(error) = popup.show(&update) {
                        log::warn!("could not show player popup: {}", describe(&error));
                    }
                }
            });
        })
    };

    let on_leave = {
        let popup = popup.clone();
        let hover = hover.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let path = event_path(event.target());
            if hover.borrow_mut().pointer_leave(&path, player_name_attr) {
                popup.hide();
            }
        })
    };

    let on_popup_leave = {
        let popup = popup.clone();
        Closure::<dyn FnMut()>::new(move || {
            hover.borrow_mut().popup_leave();
            popup.hide();
        })
    };

    // enter/leave do not bubble, so listen in the capture phase
    body.add_event_listener_with_callback_and_bool(
        "mouseenter",
        on_enter.as_ref().unchecked_ref(),
        true,
    )?;
    body.add_event_listener_with_callback_and_bool(
        "mouseleave",
        on_leave.as_ref().unchecked_ref(),
        true,
    )?;
    popup
        .root
        .add_event_listener_with_callback("mouseleave", on_popup_leave.as_ref().unchecked_ref())?;

    // one handler for the popup photo, swapped in once per failed source
    popup.photo.set_onerror(Some(&placeholder_handler()));

    on_enter.forget();
    on_leave.forget();
    on_popup_leave.forget();
    Ok(())
}

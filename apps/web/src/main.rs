mod api;
mod chartjs;
mod dom;
mod hover;
mod nav;

use std::rc::Rc;

use js_sys::Reflect;
use t20_core::charts::{build_charts, plans_for, render_charts};
use t20_core::{Page, PlayerCache};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::api::{describe, BeaconSink, HttpClient};
use crate::chartjs::CanvasSurface;
use crate::hover::SharedHover;

fn main() {
    // Better panic messages in browser console
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(error) = start() {
        log::error!("dashboard failed to start: {}", describe(&error));
    }
}

fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let client = Rc::new(HttpClient);
    let cache = Rc::new(PlayerCache::new(client.clone()));
    let hover = SharedHover::default();

    nav::install(&document)?;
    hover::install(&document, cache, hover.clone())?;

    match page_context(&document) {
        Some(page) => {
            log::info!("loading {page:?}");
            spawn_local(load_page(document, page, client, hover));
        }
        None => log::debug!("no team or category on this page"),
    }

    Ok(())
}

/// Team/category the server template put on the page, either as a global
/// (`TEAM`, `CATEGORY`) or as `data-team`/`data-category` on `<body>`.
fn page_context(document: &Document) -> Option<Page> {
    let body = document.body();
    let lookup = |global: &str, attribute: &str| {
        read_global(global).or_else(|| {
            body.as_ref()
                .and_then(|body| body.get_attribute(attribute))
        })
    };

    let team = lookup("TEAM", "data-team");
    let category = lookup("CATEGORY", "data-category");
    Page::from_context(team.as_deref(), category.as_deref())
}

fn read_global(key: &str) -> Option<String> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_string())
}

/// Fetches once, then feeds the same records to the table/card renderer
/// and the charts.
async fn load_page(document: Document, page: Page, client: Rc<HttpClient>, hover: SharedHover) {
    if let Some(category) = page.category_id() {
        dom::fill_category_title(&document, category);
    }

    let records = match client.fetch_json(&page.endpoint().path()).await {
        Ok(records) => records,
        Err(error) => {
            log::error!("{error}");
            return;
        }
    };

    let rendered = dom::render_page(&document, &page, &records, &mut hover.borrow_mut().registry);
    if let Err(error) = rendered {
        log::warn!("could not render players: {}", describe(&error));
    }

    let specs = build_charts(plans_for(&page), &records);
    let mut surface = CanvasSurface::new(document);
    let report = render_charts(&mut surface, &specs, &BeaconSink);
    log::info!(
        "rendered {} players, {} of {} charts",
        records.len(),
        report.rendered.len(),
        specs.len()
    );
}

use t20_core::hover::HoverRegistry;
use t20_core::image::{needs_placeholder, PLACEHOLDER_IMAGE};
use t20_core::page::{category_title, Page};
use t20_core::render::{fill_container, PlayerContainer};
use t20_core::view::{PlayerCard, TableRow};
use t20_core::PlayerRecord;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlImageElement};

/// Attribute carried by elements the hover popup reacts to.
pub const PLAYER_NAME_ATTR: &str = "data-player-name";

/// Clears the page's container and fills it from `records`, in API order.
///
/// Missing containers are a silent no-op.
pub fn render_page(
    document: &Document,
    page: &Page,
    records: &[PlayerRecord],
    registry: &mut HoverRegistry<Element>,
) -> Result<(), JsValue> {
    let Some(root) = document.query_selector(page.container_selector())? else {
        log::debug!("no {} on this page", page.container_selector());
        return Ok(());
    };

    let mut container = DomContainer {
        document,
        root,
        on_image_error: placeholder_handler(),
    };
    let rendered = fill_container(&mut container, page, records, registry)?;
    log::debug!("rendered {rendered} players into {}", page.container_selector());
    Ok(())
}

struct DomContainer<'a> {
    document: &'a Document,
    root: Element,
    /// Shared by every card image of this render.
    on_image_error: js_sys::Function,
}

impl PlayerContainer for DomContainer<'_> {
    type Node = Element;
    type Error = JsValue;

    fn clear(&mut self) -> Result<(), JsValue> {
        self.root.set_inner_html("");
        Ok(())
    }

    fn append_row(&mut self, row: &TableRow) -> Result<Element, JsValue> {
        let tr = self.document.create_element("tr")?;
        let mut name_cell = None;
        for (index, text) in row.cells.iter().enumerate() {
            let td = self.document.create_element("td")?;
            td.set_text_content(Some(text.as_str()));
            if index == 0 {
                td.set_attribute(PLAYER_NAME_ATTR, &row.player_name)?;
                name_cell = Some(td.clone());
            }
            tr.append_child(&td)?;
        }
        self.root.append_child(&tr)?;
        Ok(name_cell.unwrap_or(tr))
    }

    fn append_card(&mut self, card: &PlayerCard) -> Result<Element, JsValue> {
        let document = self.document;
        let root = document.create_element("div")?;
        root.set_class_name("player-card");
        root.set_attribute(PLAYER_NAME_ATTR, &card.name)?;

        let img = document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(JsValue::from)?;
        img.set_alt(&card.name);
        img.set_onerror(Some(&self.on_image_error));
        img.set_src(&card.image_src);
        root.append_child(&img)?;

        let info = append(document, &root, "div", Some("info"), None)?;
        append(document, &info, "h3", None, Some(card.name.as_str()))?;
        append(document, &info, "div", Some("role"), Some(card.role_line.as_str()))?;

        let stats = append(document, &info, "div", Some("stats"), None)?;
        for tile in &card.tiles {
            let stat = append(document, &stats, "div", Some("stat"), None)?;
            append(document, &stat, "div", Some("value"), Some(tile.value.as_str()))?;
            append(document, &stat, "div", Some("label"), Some(tile.label))?;
        }

        self.root.append_child(&root)?;
        Ok(root)
    }
}

pub fn append(
    document: &Document,
    parent: &Element,
    tag: &str,
    class: Option<&str>,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    if text.is_some() {
        element.set_text_content(text);
    }
    parent.append_child(&element)?;
    Ok(element)
}

/// One `onerror` handler for any number of images: swaps the failing image
/// to the placeholder unless it already shows it. The closure lives for the
/// rest of the page.
pub fn placeholder_handler() -> js_sys::Function {
    let handler = Closure::<dyn FnMut(Event)>::new(|event: Event| {
        let Some(img) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlImageElement>().ok())
        else {
            return;
        };
        if needs_placeholder(&img.src()) {
            img.set_src(PLACEHOLDER_IMAGE);
        }
    });
    let function = handler.as_ref().unchecked_ref::<js_sys::Function>().clone();
    handler.forget();
    function
}

pub fn fill_category_title(document: &Document, category: &str) {
    if let Some(title) = document.get_element_by_id("cat-title") {
        let current = title.text_content().unwrap_or_default();
        title.set_text_content(Some(&category_title(&current, category)));
    }
}

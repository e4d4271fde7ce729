//! Browser bindings for the showcase site.
//!
//! # Responsibility
//! - Expose one `boot` entry for the page's script tag.
//! - Forward DOM events and animation frames into `SitePage`.
//!
//! # Invariants
//! - Exported functions never panic across the wasm boundary.
//! - Page state lives in one `Rc<RefCell<_>>`; handlers borrow it only for
//!   the duration of a single event or frame.
//! - Frame timestamps and the startup clock share `performance.now()` as
//!   their time base.

mod console;
mod dom;

pub use console::init_console_logging;
pub use dom::WebDom;

use canopy_core::{FormKind, PageClock, PageEvent, SiteConfig, SitePage};
use log::{debug, error, info, LevelFilter};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, Window};

struct App {
    dom: WebDom,
    page: SitePage<Element>,
}

type SharedApp = Rc<RefCell<App>>;

/// Runs page startup against `window.document` and wires every handler.
///
/// Call once the document is parsed. `config_json` overrides the built-in
/// sample data.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> Result<(), JsValue> {
    init_console_logging(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let config = match config_json {
        Some(raw) => SiteConfig::from_json_str(&raw).map_err(to_js)?,
        None => SiteConfig::default(),
    };
    let window = window()?;
    let mut dom = WebDom::from_window().map_err(to_js)?;
    let clock = PageClock {
        year: js_sys::Date::new_0().get_full_year() as i32,
        now_ms: now_ms(&window),
    };
    let page = SitePage::init(&mut dom, &config, clock).map_err(to_js)?;
    info!("event=boot module=web status=ok report={:?}", page.report());

    let clickable: Vec<Element> = page
        .nav()
        .buttons()
        .iter()
        .chain(page.filters().controls())
        .cloned()
        .collect();
    let forms: Vec<Element> = [FormKind::Newsletter, FormKind::Contact]
        .into_iter()
        .filter_map(|kind| page.forms().form(kind).cloned())
        .collect();
    let pending_frames = page.has_pending_frames();

    let app: SharedApp = Rc::new(RefCell::new(App { dom, page }));
    for node in clickable {
        listen(&app, &node, "click", false)?;
    }
    for form in forms {
        listen(&app, &form, "submit", true)?;
    }
    if pending_frames {
        schedule_frames(&window, app)?;
    }
    Ok(())
}

fn listen(app: &SharedApp, node: &Element, event_name: &str, submit: bool) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let target = node.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let page_event = if submit {
            event.prevent_default();
            PageEvent::Submit(target.clone())
        } else {
            PageEvent::Click(target.clone())
        };
        dispatch(&app, page_event);
    });
    node.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    handler.forget();
    Ok(())
}

fn dispatch(app: &SharedApp, event: PageEvent<Element>) {
    let Ok(mut guard) = app.try_borrow_mut() else {
        error!("event=dispatch module=web status=error reason=reentrant_event");
        return;
    };
    let App { dom, page } = &mut *guard;
    match page.handle(dom, event) {
        Ok(outcome) => debug!("event=dispatch module=web status=ok outcome={outcome:?}"),
        Err(err) => error!("event=dispatch module=web status=error error={err}"),
    }
}

fn schedule_frames(window: &Window, app: SharedApp) -> Result<(), JsValue> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);

    *slot.borrow_mut() = Some(Closure::new(move |now: f64| {
        let pending = match app.try_borrow_mut() {
            Ok(mut guard) => {
                let App { dom, page } = &mut *guard;
                match page.frame(dom, now) {
                    Ok(_) => page.has_pending_frames(),
                    Err(err) => {
                        error!("event=frame module=web status=error error={err}");
                        false
                    }
                }
            }
            Err(_) => true,
        };

        if !pending {
            // Drops this closure; nothing else references the frame loop.
            let _ = next.borrow_mut().take();
            return;
        }
        let requested = match (web_sys::window(), next.borrow().as_ref()) {
            (Some(window), Some(callback)) => window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .is_ok(),
            _ => false,
        };
        if !requested {
            error!("event=frame module=web status=error reason=request_animation_frame_failed");
        }
    }));

    let borrowed = slot.borrow();
    let callback = borrowed
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

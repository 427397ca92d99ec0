#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

use js_sys::Function;
use sunflower_core::console_layer::ConsoleLayer;
use sunflower_core::{
    DebounceAction, Element, Garden, GardenConfig, GardenContainer, GardenError, GardenSession,
    GardenStats,
};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, DocumentFragment, HtmlElement, NodeList, Window};
use web_time::Instant;

use crate::console::BrowserConsole;
use crate::is_loading;

const ROW_SELECTOR: &str = ".row";

static LOGGING: Once = Once::new();

/// Route `tracing` events at INFO and above to the browser console.
fn install_console_logging() {
    LOGGING.call_once(|| {
        let layer = ConsoleLayer::new(BrowserConsole).with_filter(LevelFilter::INFO);
        let _ = tracing_subscriber::registry().with(layer).try_init();
    });
}

fn to_js(err: GardenError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// DOM failure carried through [`GardenContainer::Error`].
#[derive(Debug)]
struct DomError(String);

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl core::fmt::Display for DomError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The live container element.
struct DomContainer {
    document: Document,
    root: web_sys::Element,
}

impl DomContainer {
    fn find(document: &Document, selector: &str) -> Option<Self> {
        match document.query_selector(selector) {
            Ok(Some(root)) => Some(Self {
                document: document.clone(),
                root,
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(selector, error = %DomError::from(err), "container query failed");
                None
            }
        }
    }

    fn rows(&self) -> Result<NodeList, DomError> {
        Ok(self.root.query_selector_all(ROW_SELECTOR)?)
    }

    fn materialize(&self, element: &Element) -> Result<web_sys::Element, JsValue> {
        let node = self.document.create_element(element.tag())?;
        node.set_class_name(&element.class_name());
        if !element.style().is_empty() {
            let html = node
                .dyn_ref::<HtmlElement>()
                .ok_or_else(|| JsValue::from_str("styled element is not an HtmlElement"))?;
            let style = html.style();
            for (name, value) in element.style() {
                style.set_property(name, value)?;
            }
        }
        for (name, value) in element.attributes() {
            node.set_attribute(name, value)?;
        }
        for child in element.children() {
            node.append_child(&self.materialize(child)?)?;
        }
        Ok(node)
    }
}

/// Detach every element in a static `querySelectorAll` result.
fn remove_all(rows: &NodeList) -> usize {
    let mut removed = 0;
    for i in 0..rows.length() {
        if let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
            row.remove();
            removed += 1;
        }
    }
    removed
}

impl GardenContainer for DomContainer {
    type Error = DomError;
    type Batch = DocumentFragment;

    fn prepare_rows(&mut self, rows: &[Element]) -> Result<DocumentFragment, Self::Error> {
        let fragment = self.document.create_document_fragment();
        for row in rows {
            fragment.append_child(&self.materialize(row)?)?;
        }
        Ok(fragment)
    }

    fn swap_rows(&mut self, batch: DocumentFragment) -> Result<usize, Self::Error> {
        // Collected before the append so the new rows are not in the list.
        let stale = self.rows()?;
        self.root.append_child(&batch)?;
        Ok(remove_all(&stale))
    }

    fn clear_rows(&mut self) -> Result<usize, Self::Error> {
        Ok(remove_all(&self.rows()?))
    }
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

/// State shared between the JS handle and its DOM callbacks.
struct GardenInner {
    window: Window,
    document: Document,
    session: GardenSession,
    origin: Instant,
    timer: Option<i32>,
    resize_fn: Option<Function>,
    timer_fn: Option<Function>,
    ready_fn: Option<Function>,
    listening: bool,
    waiting_for_ready: bool,
    mounted: bool,
}

impl GardenInner {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn container(&self) -> Option<DomContainer> {
        let selector = &self.session.garden().config().container_selector;
        DomContainer::find(&self.document, selector)
    }

    fn complete_mount(&mut self) -> Option<GardenStats> {
        self.waiting_for_ready = false;
        self.mounted = true;
        let width = viewport_width(&self.window);
        let mut container = self.container();
        let stats = self.session.mount(container.as_mut(), width);
        self.start_listening();
        stats
    }

    fn rebuild_now(&mut self) -> Option<GardenStats> {
        self.clear_timer();
        let width = viewport_width(&self.window);
        let mut container = self.container();
        self.session.rebuild_now(container.as_mut(), width)
    }

    fn handle_resize(&mut self) {
        let now = self.now();
        let delay = self.session.on_resize(now);
        self.arm_timer(delay);
    }

    fn handle_timer(&mut self) {
        self.timer = None;
        let now = self.now();
        let width = viewport_width(&self.window);
        let mut container = self.container();
        let (action, _) = self.session.on_timer(now, container.as_mut(), width);
        if let DebounceAction::Wait(remaining) = action {
            self.arm_timer(remaining);
        }
    }

    fn arm_timer(&mut self, delay: Duration) {
        self.clear_timer();
        let Some(callback) = &self.timer_fn else {
            return;
        };
        // Round up so the timer never lands before the debounce deadline.
        let ms = i32::try_from(delay.as_micros().div_ceil(1000)).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback, ms)
        {
            Ok(handle) => self.timer = Some(handle),
            Err(err) => {
                tracing::warn!(error = %DomError::from(err), "failed to arm resize timer");
            }
        }
    }

    fn clear_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn start_listening(&mut self) {
        if self.listening {
            return;
        }
        let Some(callback) = &self.resize_fn else {
            return;
        };
        match self
            .window
            .add_event_listener_with_callback("resize", callback)
        {
            Ok(()) => self.listening = true,
            Err(err) => {
                tracing::warn!(error = %DomError::from(err), "failed to add resize listener");
            }
        }
    }

    /// Detach listeners and cancel pending work. Rows are removed when
    /// `remove_rows` is set.
    fn teardown(&mut self, remove_rows: bool) {
        if self.listening {
            if let Some(callback) = &self.resize_fn
                && let Err(err) = self
                    .window
                    .remove_event_listener_with_callback("resize", callback)
            {
                tracing::warn!(error = %DomError::from(err), "failed to remove resize listener");
            }
            self.listening = false;
        }
        if self.waiting_for_ready {
            if let Some(callback) = &self.ready_fn
                && let Err(err) = self
                    .document
                    .remove_event_listener_with_callback("DOMContentLoaded", callback)
            {
                tracing::warn!(error = %DomError::from(err), "failed to remove ready listener");
            }
            self.waiting_for_ready = false;
        }
        self.clear_timer();
        self.session.cancel_pending();
        self.mounted = false;

        if remove_rows && let Some(mut container) = self.container() {
            if let Err(err) = container.clear_rows() {
                tracing::warn!(error = %err, "failed to remove garden rows");
            }
        }
    }
}

/// Web garden handle.
///
/// Owns the DOM callbacks; dropping the handle (or calling `free()` from JS)
/// detaches them.
#[wasm_bindgen]
pub struct SunflowerGarden {
    inner: Rc<RefCell<GardenInner>>,
    on_ready: Closure<dyn FnMut()>,
    _on_resize: Closure<dyn FnMut()>,
    _on_timer: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl SunflowerGarden {
    /// Create a garden handle.
    ///
    /// `options` is an optional plain object overriding any config field
    /// (camelCase). Throws on unknown fields or invalid values.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<JsValue>) -> Result<SunflowerGarden, JsValue> {
        install_console_logging();

        let config = match options {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                let json = String::from(js_sys::JSON::stringify(&value)?);
                GardenConfig::from_json(&json).map_err(to_js)?
            }
            _ => GardenConfig::default(),
        };
        let garden = Garden::new(config).map_err(to_js)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let inner = Rc::new(RefCell::new(GardenInner {
            window,
            document,
            session: GardenSession::new(garden),
            origin: Instant::now(),
            timer: None,
            resize_fn: None,
            timer_fn: None,
            ready_fn: None,
            listening: false,
            waiting_for_ready: false,
            mounted: false,
        }));

        let on_resize = {
            let inner = Rc::clone(&inner);
            Closure::<dyn FnMut()>::wrap(Box::new(move || {
                inner.borrow_mut().handle_resize();
            }))
        };
        let on_timer = {
            let inner = Rc::clone(&inner);
            Closure::<dyn FnMut()>::wrap(Box::new(move || {
                inner.borrow_mut().handle_timer();
            }))
        };
        let on_ready = {
            let inner = Rc::clone(&inner);
            Closure::<dyn FnMut()>::wrap(Box::new(move || {
                inner.borrow_mut().complete_mount();
            }))
        };

        {
            let mut state = inner.borrow_mut();
            state.resize_fn = Some(on_resize.as_ref().unchecked_ref::<Function>().clone());
            state.timer_fn = Some(on_timer.as_ref().unchecked_ref::<Function>().clone());
            state.ready_fn = Some(on_ready.as_ref().unchecked_ref::<Function>().clone());
        }

        Ok(Self {
            inner,
            on_ready,
            _on_resize: on_resize,
            _on_timer: on_timer,
        })
    }

    /// Build once the page is ready and start rebuilding on resize.
    ///
    /// Builds immediately unless the document is still loading, in which case
    /// the build waits for `DOMContentLoaded`. Calling again is a no-op.
    pub fn mount(&self) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        if inner.mounted || inner.waiting_for_ready {
            return Ok(());
        }
        if is_loading(&inner.document.ready_state()) {
            inner.document.add_event_listener_with_callback(
                "DOMContentLoaded",
                self.on_ready.as_ref().unchecked_ref(),
            )?;
            inner.waiting_for_ready = true;
        } else {
            inner.complete_mount();
        }
        Ok(())
    }

    /// Tear down and rebuild now. Returns the number of flowers built, or `0`
    /// when the container is missing.
    pub fn rebuild(&self) -> u32 {
        self.inner
            .borrow_mut()
            .rebuild_now()
            .map_or(0, |stats| stats.total_flowers())
    }

    /// Counts the current viewport produces, as a plain array
    /// `[farBack, back, front]`.
    #[wasm_bindgen(js_name = rowCounts)]
    pub fn row_counts(&self) -> js_sys::Array {
        let inner = self.inner.borrow();
        let width = viewport_width(&inner.window);
        inner
            .session
            .garden()
            .row_configs(width)
            .iter()
            .map(|row| JsValue::from(row.count))
            .collect()
    }

    /// Remove listeners, cancel a pending rebuild, and remove the rows.
    pub fn destroy(&self) {
        self.inner.borrow_mut().teardown(true);
    }
}

impl Drop for SunflowerGarden {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.teardown(false);
        }
    }
}

/// Page entry point: mount a default garden for the lifetime of the page.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let garden = SunflowerGarden::new(None)?;
    garden.mount()?;
    // Callbacks must outlive this call; the page never frees the garden.
    std::mem::forget(garden);
    Ok(())
}

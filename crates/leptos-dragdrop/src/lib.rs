//! Leptos DragDrop Utilities
//!
//! Mouse plumbing for drag gestures: a press handler factory, document-level
//! move/release tracking that removes its listeners on release, and a guard
//! for the click the browser fires right after a drop.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Body class that disables text selection while dragging
const NOSELECT_CLASS: &str = "noselect";

/// How long a finished drag swallows clicks
const CLICK_GUARD_MS: u32 = 100;

/// Pointer coordinates in viewport (`client`) and document (`page`) space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerSample {
    pub fn from_event(ev: &web_sys::MouseEvent) -> Self {
        Self {
            client_x: ev.client_x() as f64,
            client_y: ev.client_y() as f64,
            page_x: ev.page_x() as f64,
            page_y: ev.page_y() as f64,
        }
    }
}

/// A left-button press
#[derive(Clone, Debug, PartialEq)]
pub struct PointerPress {
    pub sample: PointerSample,
    /// Press landed on a button, input or `[data-action]` element
    pub on_control: bool,
    /// `data-drag-handle` of the closest marked ancestor, if any
    pub handle: Option<String>,
}

/// Whether the event started on an embedded control
pub fn is_control_target(ev: &web_sys::Event) -> bool {
    closest_from_target(ev, "button, input, textarea, [data-action]").is_some()
}

fn closest_from_target(ev: &web_sys::Event, selector: &str) -> Option<web_sys::Element> {
    let target = ev.target()?;
    let element = target.dyn_ref::<web_sys::Element>()?;
    element.closest(selector).ok().flatten()
}

/// Create mousedown handler for draggable elements.
///
/// With `isolate` the event stops here, so an enclosing draggable never
/// sees presses meant for this one (controls included).
pub fn make_on_mousedown(on_press: Callback<PointerPress>, isolate: bool) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if isolate {
            ev.stop_propagation();
        }
        let on_control = is_control_target(&ev);
        let handle = closest_from_target(&ev, "[data-drag-handle]")
            .and_then(|el| el.get_attribute("data-drag-handle"));
        on_press.run(PointerPress {
            sample: PointerSample::from_event(&ev),
            on_control,
            handle,
        });
    }
}

struct Listeners {
    on_move: Closure<dyn FnMut(web_sys::MouseEvent)>,
    on_up: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

impl Listeners {
    fn detach(&self, document: &web_sys::Document) {
        let _ = document.remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
        let _ = document.remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref());
    }
}

/// Follows the pointer on the document until the next mouseup.
///
/// Both listeners are removed before `on_release` runs. Returns false when
/// there is no document to listen on.
pub fn track_pointer(on_move: Callback<PointerSample>, on_release: Callback<PointerSample>) -> bool {
    let Some(document) = web_sys::window().and_then(|win| win.document()) else {
        return false;
    };

    let slot: Rc<RefCell<Option<Listeners>>> = Rc::new(RefCell::new(None));

    let move_closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        on_move.run(PointerSample::from_event(&ev));
    });

    let release_slot = Rc::clone(&slot);
    let release_document = document.clone();
    let up_closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if let Some(listeners) = release_slot.borrow_mut().take() {
            listeners.detach(&release_document);
            // Can't free a closure while it runs; release it on the next tick
            Timeout::new(0, move || drop(listeners)).forget();
        }
        on_release.run(PointerSample::from_event(&ev));
    });

    let _ = document.add_event_listener_with_callback("mousemove", move_closure.as_ref().unchecked_ref());
    let _ = document.add_event_listener_with_callback("mouseup", up_closure.as_ref().unchecked_ref());
    *slot.borrow_mut() = Some(Listeners {
        on_move: move_closure,
        on_up: up_closure,
    });
    true
}

/// Toggles page-wide text selection
pub fn set_text_selection(enabled: bool) {
    let Some(body) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.body())
    else {
        return;
    };
    let classes = body.class_list();
    let _ = if enabled {
        classes.remove_1(NOSELECT_CLASS)
    } else {
        classes.add_1(NOSELECT_CLASS)
    };
}

/// Swallows the click that follows a drop
#[derive(Clone, Copy)]
pub struct ClickGuard {
    just_dropped_read: ReadSignal<bool>,
    just_dropped_write: WriteSignal<bool>,
}

impl ClickGuard {
    pub fn new() -> Self {
        let (just_dropped_read, just_dropped_write) = signal(false);
        Self {
            just_dropped_read,
            just_dropped_write,
        }
    }

    /// Call when a drag ends with a drop
    pub fn arm(&self) {
        self.just_dropped_write.set(true);
        let clear = self.just_dropped_write;
        Timeout::new(CLICK_GUARD_MS, move || {
            let _ = clear.try_set(false);
        })
        .forget();
    }

    pub fn is_armed(&self) -> bool {
        self.just_dropped_read.get_untracked()
    }
}

impl Default for ClickGuard {
    fn default() -> Self {
        Self::new()
    }
}

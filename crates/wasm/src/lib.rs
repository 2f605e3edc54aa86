use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use dimscale_core::{
    DisplayHost, OrientationObserver, Responsive, ScaleConfig, Subscription, observe_orientation,
};
use dimscale_protocol::{Orientation, ScreenMetrics};
use log::warn;
use wasm_bindgen::prelude::*;

struct OrientationWatch {
    observer: OrientationObserver,
    _callback: Subscription,
}

thread_local! {
    static RESPONSIVE: RefCell<Responsive<DisplayHost>> =
        RefCell::new(Responsive::new(DisplayHost::new(ScreenMetrics::ZERO)));
    static WATCHES: RefCell<HashMap<u32, OrientationWatch>> = RefCell::new(HashMap::new());
    static NEXT_HANDLE: Cell<u32> = const { Cell::new(1) };
}

fn with_responsive<R>(f: impl FnOnce(&Responsive<DisplayHost>) -> R) -> R {
    RESPONSIVE.with(|r| f(&r.borrow()))
}

fn host() -> DisplayHost {
    with_responsive(|r| r.provider().clone())
}

/// Replace the scaling config with one parsed from JSON.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsError> {
    let config =
        ScaleConfig::from_json(json.as_bytes()).map_err(|e| JsError::new(&e.to_string()))?;
    RESPONSIVE.with(|r| r.borrow_mut().set_config(config));
    Ok(())
}

/// Report the current window size. Notifies orientation subscribers.
#[wasm_bindgen]
pub fn set_metrics(width: f64, height: f64, pixel_ratio: f64) {
    // Update outside the borrow so callbacks can call back into this module.
    host().update(ScreenMetrics::new(width, height, pixel_ratio));
}

#[wasm_bindgen]
pub fn wp(percent: f64) -> f64 {
    with_responsive(|r| r.wp(percent))
}

#[wasm_bindgen]
pub fn hp(percent: f64) -> f64 {
    with_responsive(|r| r.hp(percent))
}

#[wasm_bindgen]
pub fn px_to_dp_width(px: f64) -> f64 {
    with_responsive(|r| r.px_to_dp_width(px))
}

#[wasm_bindgen]
pub fn px_to_dp_height(px: f64) -> f64 {
    with_responsive(|r| r.px_to_dp_height(px))
}

/// `unit` is `"percent"` or `"pixel"`.
#[wasm_bindgen]
pub fn responsive_width(value: f64, unit: &str) -> Result<f64, JsError> {
    with_responsive(|r| r.responsive_width_str(value, unit))
        .map_err(|e| JsError::new(&e.to_string()))
}

/// `unit` is `"percent"` or `"pixel"`.
#[wasm_bindgen]
pub fn responsive_height(value: f64, unit: &str) -> Result<f64, JsError> {
    with_responsive(|r| r.responsive_height_str(value, unit))
        .map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
pub fn scale_font(size: f64) -> f64 {
    with_responsive(|r| r.scale_font(size))
}

#[wasm_bindgen]
pub fn is_tablet() -> bool {
    with_responsive(Responsive::is_tablet)
}

/// Name of the breakpoint containing `width`.
#[wasm_bindgen]
pub fn get_breakpoint(width: f64) -> Result<String, JsError> {
    with_responsive(|r| r.breakpoint(width).map(|b| b.name.to_string()))
        .map_err(|e| JsError::new(&e.to_string()))
}

/// The active breakpoint table as JSON.
#[wasm_bindgen]
pub fn breakpoints() -> Result<String, JsError> {
    with_responsive(|r| serde_json::to_string(r.config().breakpoints.ranges()))
        .map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
pub fn orientation() -> String {
    with_responsive(|r| r.orientation().to_string())
}

/// Call `callback("portrait" | "landscape")` whenever the orientation
/// changes. Returns a handle for [`unsubscribe_orientation`].
#[wasm_bindgen]
pub fn subscribe_orientation(callback: js_sys::Function) -> u32 {
    watch_orientation(move |o| {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&o.to_string())) {
            warn!("orientation callback threw: {err:?}");
        }
    })
}

fn watch_orientation(notify: impl FnMut(&Orientation) + 'static) -> u32 {
    let observer = observe_orientation(&host());
    let consumer = observer.subscribe(notify);

    let handle = NEXT_HANDLE.with(|n| {
        let h = n.get();
        n.set(h.wrapping_add(1));
        h
    });
    WATCHES.with(|w| {
        w.borrow_mut().insert(
            handle,
            OrientationWatch {
                observer,
                _callback: consumer,
            },
        )
    });
    handle
}

/// Stop a subscription made with [`subscribe_orientation`]. Returns `false`
/// for an unknown or already released handle.
#[wasm_bindgen]
pub fn unsubscribe_orientation(handle: u32) -> bool {
    let watch = WATCHES.with(|w| w.borrow_mut().remove(&handle));
    match watch {
        Some(watch) => {
            watch.observer.dispose();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn conversions_follow_set_metrics() {
        set_metrics(375.0, 812.0, 3.0);
        assert!((wp(80.0) - 300.0).abs() < 1e-9);
        assert!((px_to_dp_width(120.0) - 120.0).abs() < 1e-9);
        assert_eq!(orientation(), "portrait");
        assert!(!is_tablet());

        set_metrics(1024.0, 768.0, 2.0);
        assert_eq!(orientation(), "landscape");
        assert!(is_tablet());
    }

    #[test]
    fn configure_replaces_breakpoints() {
        assert!(configure(r#"{ "breakpoints": [{ "name": "only", "minWidth": 0 }] }"#).is_ok());
        assert_eq!(
            breakpoints().ok().as_deref(),
            Some(r#"[{"name":"only","minWidth":0.0}]"#)
        );
        assert_eq!(get_breakpoint(5000.0).ok().as_deref(), Some("only"));
    }

    #[test]
    fn unknown_handle_is_rejected() {
        assert!(!unsubscribe_orientation(u32::MAX));
    }

    #[test]
    fn watch_handle_lifecycle() {
        set_metrics(400.0, 800.0, 2.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handle = watch_orientation(move |o| sink.borrow_mut().push(*o));
        assert_eq!(host().listener_count(), 1);

        set_metrics(800.0, 400.0, 2.0);
        assert_eq!(*seen.borrow(), vec![Orientation::Landscape]);

        assert!(unsubscribe_orientation(handle));
        assert!(!unsubscribe_orientation(handle));
        assert_eq!(host().listener_count(), 0);

        set_metrics(400.0, 800.0, 2.0);
        assert_eq!(*seen.borrow(), vec![Orientation::Landscape]);
    }
}

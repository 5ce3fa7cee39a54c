//! Device class detection: mobile vs everything else.
//!
//! SYSTEM CONTEXT
//! ==============
//! The layout selector mounts the mobile shell when either the user agent
//! names a handheld platform or the viewport is narrower than the mobile
//! breakpoint. The class is always derived from live signals and never
//! stored, so rotation and window resizes are picked up immediately.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use leptos::prelude::*;

/// Viewports narrower than this (in CSS pixels) are mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Lowercase user-agent fragments that mark a mobile client.
pub const MOBILE_UA_KEYWORDS: [&str; 7] =
    ["android", "webos", "iphone", "ipad", "ipod", "blackberry", "windows phone"];

/// Whether `user_agent` names a mobile platform (case-insensitive).
#[must_use]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_UA_KEYWORDS.iter().any(|kw| ua.contains(kw))
}

/// Classify a client from its ambient signals. Missing signals count as
/// "not mobile".
#[must_use]
pub fn classify(user_agent: Option<&str>, viewport_width: Option<f64>) -> bool {
    let keyword_match = user_agent.is_some_and(is_mobile_user_agent);
    let narrow = viewport_width.is_some_and(|w| w < MOBILE_BREAKPOINT_PX);
    keyword_match || narrow
}

/// Read the current user agent and viewport width and classify them.
///
/// Always `false` outside the browser.
pub fn detect() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let user_agent = window.navigator().user_agent().ok();
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        classify(user_agent.as_deref(), width)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Reactive device class, re-evaluated on every window resize.
///
/// The initial value is read synchronously so the first mounted render already
/// sees the real device class.
pub fn use_device_class() -> ReadSignal<bool> {
    let (is_mobile, set_is_mobile) = signal(detect());

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::resize, move |_| {
            let next = detect();
            if next != is_mobile.get_untracked() {
                set_is_mobile.set(next);
            }
        });
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = set_is_mobile;
    }

    is_mobile
}

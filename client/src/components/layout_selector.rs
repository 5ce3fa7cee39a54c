//! Picks the mobile or desktop shell for routed content.
//!
//! ARCHITECTURE
//! ============
//! The selector starts `Unmounted` and renders nothing, both during SSR and
//! during the hydration pass, so neither shell can flash before the device
//! class is known. The first client effect mounts it; from then on the same
//! effect re-picks the shell whenever the device class changes. Only the
//! memoized shell kind drives rendering, so repeated observations of the same
//! class do not rebuild the shell.

use leptos::prelude::*;

use crate::components::desktop_shell::DesktopShell;
use crate::components::mobile_shell::MobileShell;
use crate::state::layout::{SelectorState, ShellKind};
use crate::util::device::use_device_class;

#[component]
pub fn LayoutSelector(children: ChildrenFn) -> impl IntoView {
    let is_mobile = use_device_class();
    let selector = RwSignal::new(SelectorState::Unmounted);

    // Effects only run on the client, after the first render pass.
    Effect::new(move || {
        let mobile = is_mobile.get();
        selector.update(|state| *state = state.mount().observe(mobile));
    });

    let shell = Memo::new(move |_| selector.get().shell());

    move || {
        let children = children.clone();
        match shell.get() {
            None => ().into_any(),
            Some(ShellKind::Mobile) => view! { <MobileShell>{children()}</MobileShell> }.into_any(),
            Some(ShellKind::Desktop) => view! { <DesktopShell>{children()}</DesktopShell> }.into_any(),
        }
    }
}

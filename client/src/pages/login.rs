//! Login page: two-step email access-code sign-in.
//!
//! Step one asks for an email and requests a code; step two takes the code.
//! A successful sign-in does a full page load of `/` so the server guard sees
//! the fresh session cookie on the first dashboard request.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

const CODE_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoginStep {
    Email,
    Code,
}

/// Keep only code characters, uppercased and capped at the code length.
fn normalize_code_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(CODE_LEN)
        .collect()
}

fn validate_email_input(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_owned()),
        _ if email.is_empty() => Err("Enter your email address."),
        _ => Err("That email address looks incomplete."),
    }
}

fn validate_code_input(code: &str) -> Result<String, &'static str> {
    let code = normalize_code_input(code);
    if code.len() == CODE_LEN {
        Ok(code)
    } else {
        Err("Codes are 6 characters long.")
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let step = RwSignal::new(LoginStep::Email);
    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let status = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);
    let dev_code = RwSignal::new(None::<String>);

    let send_code = move || {
        if pending.get_untracked() {
            return;
        }
        let address = match validate_email_input(&email.get_untracked()) {
            Ok(address) => address,
            Err(message) => {
                status.set(Some(message.to_owned()));
                return;
            }
        };
        pending.set(true);
        status.set(None);
        dev_code.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::auth_client::client().request_code(&address).await {
                Ok(echoed) => {
                    dev_code.set(echoed);
                    code.set(String::new());
                    step.set(LoginStep::Code);
                    status.set(Some(format!("We sent a code to {address}.")));
                }
                Err(e) => {
                    log::warn!("access code request failed: {e}");
                    status.set(Some("Could not send a code. Try again.".to_owned()));
                }
            }
            pending.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = address;
    };

    let verify = move || {
        if pending.get_untracked() {
            return;
        }
        let entered = match validate_code_input(&code.get_untracked()) {
            Ok(entered) => entered,
            Err(message) => {
                status.set(Some(message.to_owned()));
                return;
            }
        };
        let address = email.get_untracked().trim().to_owned();
        pending.set(true);
        status.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::auth_client::client().sign_in_with_code(&address, &entered).await {
                Ok(_) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
                Err(e) => {
                    log::warn!("access code rejected: {e}");
                    status.set(Some("That code is wrong or has expired.".to_owned()));
                    pending.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (address, entered);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match step.get_untracked() {
            LoginStep::Email => send_code(),
            LoginStep::Code => verify(),
        }
    };

    let change_email = move |_| {
        step.set(LoginStep::Email);
        code.set(String::new());
        dev_code.set(None);
        status.set(None);
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Finboard"</h1>
                {move || match step.get() {
                    LoginStep::Email => view! {
                        <label class="login-label" for="login-email">"Email"</label>
                        <input
                            id="login-email"
                            class="login-input"
                            type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || pending.get()>
                            "Email me a code"
                        </button>
                    }
                    .into_any(),
                    LoginStep::Code => view! {
                        <label class="login-label" for="login-code">"Access code"</label>
                        <input
                            id="login-code"
                            class="login-input login-input--code"
                            type="text"
                            inputmode="text"
                            autocomplete="one-time-code"
                            maxlength="6"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(normalize_code_input(&event_target_value(&ev)))
                        />
                        <button class="login-button" type="submit" disabled=move || pending.get()>
                            "Sign in"
                        </button>
                        <button class="login-link" type="button" on:click=change_email>
                            "Use a different email"
                        </button>
                    }
                    .into_any(),
                }}
                {move || status.get().map(|text| view! { <p class="login-message">{text}</p> })}
                {move || {
                    dev_code
                        .get()
                        .map(|c| view! { <p class="login-message login-message--code">"Dev code: " <code>{c}</code></p> })
                }}
            </form>
        </div>
    }
}

//! Navbar UI composition: tab strip, pin menu, account menu, and the one-time pin hint.

use leptos::*;

use crate::{
    dom::TAB_STRIP_ID,
    dropdown::dismiss_on_key,
    model::NavMenu,
    reducer::NavAction,
    render::{AccountAction, NavbarView, PinMenuItem, TabView},
    runtime_context::{use_navbar_runtime, NavbarRuntimeContext},
};

const SETTINGS_URL: &str = "settings.html";

fn menu_dom_id(menu: NavMenu) -> String {
    format!("navbar-{}-menu", menu.as_str())
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
fn NavTab(tab: TabView) -> impl IntoView {
    let class = match (tab.active, tab.pinned) {
        (true, true) => "navbar-tab active pinned",
        (true, false) => "navbar-tab active",
        (false, true) => "navbar-tab pinned",
        (false, false) => "navbar-tab",
    };
    view! {
        <a
            class=class
            href=tab.url
            aria-current=if tab.active { Some("page") } else { None }
        >
            <i class=format!("fa-solid {}", tab.icon) aria-hidden="true"></i>
            <span class="navbar-tab-label">{tab.title}</span>
        </a>
    }
}

#[component]
fn PinMenu(runtime: NavbarRuntimeContext, items: Vec<PinMenuItem>, show_clear: bool) -> impl IntoView {
    view! {
        <div
            id=menu_dom_id(NavMenu::Pin)
            class="navbar-menu"
            role="menu"
            aria-label="Pinned pages"
            on:mousedown=move |ev| ev.stop_propagation()
            on:click=move |ev| ev.stop_propagation()
        >
            {items
                .into_iter()
                .map(|item| {
                    let title = item.title.clone();
                    view! {
                        <button
                            class="navbar-menu-item"
                            role="menuitemcheckbox"
                            aria-checked=item.checked
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_action(NavAction::TogglePin {
                                    title: title.clone(),
                                });
                            }
                        >
                            <i class=format!("fa-solid {}", item.icon) aria-hidden="true"></i>
                            <span>{item.title}</span>
                            {item.checked.then(|| view! { <i class="fa-solid fa-thumbtack" aria-hidden="true"></i> })}
                        </button>
                    }
                })
                .collect_view()}
            {show_clear.then(|| view! {
                <div class="navbar-menu-separator" role="separator" aria-hidden="true"></div>
                <button
                    class="navbar-menu-item"
                    role="menuitem"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        runtime.dispatch_action(NavAction::ClearPins);
                    }
                >
                    "Clear pins"
                </button>
            })}
        </div>
    }
}

#[component]
fn AccountMenu(runtime: NavbarRuntimeContext, action: AccountAction) -> impl IntoView {
    let (label, next) = match action {
        AccountAction::SignIn => ("Sign in as guest", NavAction::RequestSignIn),
        AccountAction::SignOut => ("Sign out", NavAction::RequestSignOut),
    };
    view! {
        <div
            id=menu_dom_id(NavMenu::Account)
            class="navbar-menu"
            role="menu"
            aria-label="Account"
            on:mousedown=move |ev| ev.stop_propagation()
            on:click=move |ev| ev.stop_propagation()
        >
            <button
                class="navbar-menu-item"
                role="menuitem"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(next.clone());
                }
            >
                {label}
            </button>
        </div>
    }
}

#[component]
fn MenuTrigger(
    runtime: NavbarRuntimeContext,
    menu: NavMenu,
    open: bool,
    icon: &'static str,
    label: String,
) -> impl IntoView {
    view! {
        <button
            class="navbar-menu-trigger"
            aria-haspopup="menu"
            aria-expanded=open
            aria-controls=menu_dom_id(menu)
            on:mousedown=move |ev| ev.stop_propagation()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(NavAction::ToggleMenu { menu });
            }
        >
            <i class=format!("fa-solid {icon}") aria-hidden="true"></i>
            <span class="navbar-menu-trigger-label">{label}</span>
        </button>
    }
}

fn navbar_body(runtime: NavbarRuntimeContext, view: NavbarView) -> View {
    let fades = runtime.fades;
    let pin_open = view.open_menu == Some(NavMenu::Pin);
    let account_open = view.open_menu == Some(NavMenu::Account);

    view! {
        <div class="navbar-strip-wrap">
            <div class="navbar-fade navbar-fade-left" class:visible=move || fades.get().left></div>
            <div
                id=TAB_STRIP_ID
                class="navbar-tab-strip"
                on:scroll=move |_| runtime.on_tab_strip_scroll()
            >
                {view
                    .tabs
                    .into_iter()
                    .map(|tab| view! { <NavTab tab=tab /> })
                    .collect_view()}
            </div>
            <div class="navbar-fade navbar-fade-right" class:visible=move || fades.get().right></div>
        </div>
        <div class="navbar-actions">
            <div class="navbar-menu-anchor">
                <MenuTrigger
                    runtime=runtime
                    menu=NavMenu::Pin
                    open=pin_open
                    icon="fa-thumbtack"
                    label="Pins".to_string()
                />
                {view.hint_visible.then(|| view! {
                    <div class="navbar-pin-hint" role="status">
                        "Pinned pages stay in front of the tab strip."
                    </div>
                })}
                {pin_open.then(|| view! {
                    <PinMenu
                        runtime=runtime
                        items=view.pin_menu
                        show_clear=view.show_clear_pins
                    />
                })}
            </div>
            {view.show_settings.then(|| view! {
                <a class="navbar-settings-link" href=SETTINGS_URL aria-label="Settings">
                    <i class="fa-solid fa-cog" aria-hidden="true"></i>
                </a>
            })}
            <div class="navbar-menu-anchor">
                <MenuTrigger
                    runtime=runtime
                    menu=NavMenu::Account
                    open=account_open
                    icon="fa-user"
                    label=view.account.label
                />
                {account_open.then(|| view! {
                    <AccountMenu runtime=runtime action=view.account.action />
                })}
            </div>
        </div>
    }
    .into_view()
}

#[component]
/// Navigation bar bound to the surrounding [`crate::NavbarProvider`].
pub fn Navbar() -> impl IntoView {
    let runtime = use_navbar_runtime();

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        runtime.dispatch_action(NavAction::DismissMenus);
    });
    on_cleanup(move || outside_click_listener.remove());

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        let open = runtime.view.get_untracked().and_then(|view| view.open_menu);
        if dismiss_on_key(&ev.key(), open) {
            ev.prevent_default();
            runtime.dispatch_action(NavAction::DismissMenus);
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <nav class="navbar" aria-label="Site">
            {move || match runtime.view.get() {
                Some(view) => navbar_body(runtime, view),
                None => view! { <div class="navbar-loading" aria-busy="true"></div> }.into_view(),
            }}
        </nav>
    }
}

use leptos::*;
use leptos_meta::*;
use nav_host_web::{build_host_services, host_strategy_name};
use nav_runtime::{Navbar, NavbarProvider};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Arcade Hub" />
        <Meta name="description" content="Session-aware navigation bar for the arcade hub pages." />

        <NavbarEntry />
    }
}

#[component]
pub fn NavbarEntry() -> impl IntoView {
    logging::log!("navbar host strategy: {}", host_strategy_name());

    view! {
        <NavbarProvider host_services=build_host_services()>
            <header class="site-header">
                <Navbar />
            </header>
        </NavbarProvider>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod animation;
mod config;
mod components {
    pub mod button;
    pub mod footer;
}
mod hero {
    pub mod carousel;
    pub mod pool;
    pub mod preload;
    pub mod sequencer;
}
mod pages {
    pub mod landing;
    pub mod not_found;
}

use pages::{
    landing::Landing,
    not_found::NotFound,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::get_log_level()).expect("error initializing log");

    // Scroll-linked animations need the shared listener before anything mounts
    animation::init();

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

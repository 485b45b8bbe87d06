use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found" style="display: flex; flex-direction: column; align-items: center; justify-content: center; height: 100vh; gap: 1rem;">
            <h1>{"404"}</h1>
            <p>{"Nothing to see here."}</p>
            <Link<Route> to={Route::Home}>
                {"Back to the start"}
            </Link<Route>>
        </div>
    }
}

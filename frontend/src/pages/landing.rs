use yew::prelude::*;

use crate::components::footer::Footer;
use crate::hero::carousel::Hero;

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <main class="landing-page" style="position: relative; min-height: 100vh; width: 100vw; overflow-x: hidden;">
            <Hero />
            <section id="privacy-policy" class="privacy-policy" style="padding: 4rem 1.25rem; max-width: 48rem; margin: 0 auto;">
                <h2>{"Privacy Policy"}</h2>
                <p>
                    {"This page does not use cookies, does not track visitors and does not collect personal data. "}
                    {"Videos are streamed from this site only; outbound links open in a new tab without sharing this page with the destination."}
                </p>
            </section>
            <Footer />
        </main>
    }
}

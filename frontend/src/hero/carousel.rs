use log::{debug, info, warn};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlElement, HtmlVideoElement};
use yew::prelude::*;

use crate::animation::{self, lerp, ClipPolygon, Ease, ScrollBand, Tween, TweenHandle};
use crate::components::button::Button;
use crate::config;
use crate::hero::pool::{HandlePool, ObjectUrlRevoker};
use crate::hero::preload::{preload_videos, BrowserFetcher, LoadAction, LoadProgress};
use crate::hero::sequencer::{handoff_src, Effect, Sequencer, SequencerEvent};

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        warn!("Failed to set {} on element: {:?}", property, e);
    }
}

fn clear_style(element: &HtmlElement, property: &str) {
    if let Err(e) = element.style().remove_property(property) {
        warn!("Failed to clear {} on element: {:?}", property, e);
    }
}

fn play_video(video: &HtmlVideoElement) {
    match video.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!("Next video refused to play: {:?}", e);
            }
        }),
        Err(e) => warn!("Next video refused to play: {:?}", e),
    }
}

#[function_component(Hero)]
pub fn hero() -> Html {
    let total = config::TOTAL_VIDEOS;
    // The machine is the source of truth; `sequencer` is the snapshot rendered from it.
    let machine = use_mut_ref(|| Sequencer::new(total));
    let sequencer = use_state_eq(|| Sequencer::new(total));
    let drive: Callback<SequencerEvent, Option<Effect>> = {
        let machine = machine.clone();
        let sequencer = sequencer.clone();
        Callback::from(move |event: SequencerEvent| {
            let effect = machine.borrow_mut().handle(event);
            if effect.is_some() {
                sequencer.set(machine.borrow().clone());
            }
            effect
        })
    };
    let progress = use_reducer(|| LoadProgress::new(total));
    let pool = use_mut_ref(|| HandlePool::<ObjectUrlRevoker>::new());

    let frame_ref = use_node_ref();
    let preview_ref = use_node_ref();
    let next_ref = use_node_ref();
    let main_ref = use_node_ref();

    // Preload every clip once on mount, release whatever was loaded on unmount.
    {
        let pool = pool.clone();
        let progress = progress.clone();
        use_effect_with_deps(
            move |_| {
                let loader_pool = pool.clone();
                spawn_local(async move {
                    let report = preload_videos(total, config::get_video_src, &BrowserFetcher, &*loader_pool, |index| {
                        debug!("Hero video {} ready", index);
                        progress.dispatch(LoadAction::Loaded);
                    })
                    .await;
                    info!("Preloaded {} of {} hero videos", report.loaded, total);
                });

                move || {
                    pool.borrow_mut().release_all();
                }
            },
            (),
        );
    }

    // Scroll-scrubbed clip path on the frame.
    {
        let frame_ref = frame_ref.clone();
        use_effect_with_deps(
            move |_| {
                let full = ClipPolygon(config::FRAME_CLIP_FULL);
                let target = ClipPolygon(config::FRAME_CLIP_TARGET);
                let update = move || {
                    let Some(frame) = frame_ref.cast::<HtmlElement>() else {
                        return;
                    };
                    let viewport_height = web_sys::window()
                        .and_then(|w| w.inner_height().ok())
                        .and_then(|h| h.as_f64())
                        .unwrap_or(0.0);
                    let rect = frame.get_bounding_client_rect();
                    let t = Ease::Power1InOut.apply(ScrollBand::CENTER_TO_BOTTOM.progress(
                        rect.top(),
                        rect.height(),
                        viewport_height,
                    ));
                    set_style(&frame, "clip-path", &full.lerp(&target, t).to_css());
                };
                update();
                let subscription = animation::subscribe_scroll(update);

                move || drop(subscription)
            },
            (),
        );
    }

    // Swap animation, re-run on every accepted click.
    {
        let drive = drive.clone();
        let pool = pool.clone();
        let frame_ref = frame_ref.clone();
        let preview_ref = preview_ref.clone();
        let next_ref = next_ref.clone();
        let main_ref = main_ref.clone();
        use_effect_with_deps(
            move |(generation, cursor)| {
                let mut tweens: Vec<TweenHandle> = Vec::new();
                let next = next_ref.cast::<HtmlVideoElement>();
                let preview = preview_ref.cast::<HtmlVideoElement>();

                if *generation > 0 {
                    if let Some(next) = next.clone() {
                        let (frame_width, frame_height) = frame_ref
                            .cast::<Element>()
                            .map(|frame| {
                                let rect = frame.get_bounding_client_rect();
                                (rect.width(), rect.height())
                            })
                            .unwrap_or((config::PREVIEW_SIZE_PX, config::PREVIEW_SIZE_PX));
                        set_style(&next, "visibility", "visible");

                        let on_start = {
                            let drive = drive.clone();
                            let next = next.clone();
                            move || {
                                if drive.emit(SequencerEvent::AnimationStarted) == Some(Effect::PlayNext) {
                                    play_video(&next);
                                }
                            }
                        };
                        let on_update = {
                            let next = next.clone();
                            move |t: f64| {
                                let size = config::PREVIEW_SIZE_PX;
                                set_style(&next, "width", &format!("{}px", lerp(size, frame_width, t)));
                                set_style(&next, "height", &format!("{}px", lerp(size, frame_height, t)));
                            }
                        };
                        let on_complete = {
                            let drive = drive.clone();
                            let next = next.clone();
                            let main_ref = main_ref.clone();
                            let pool = pool.clone();
                            let cursor = *cursor;
                            move || {
                                set_style(&next, "width", "100%");
                                set_style(&next, "height", "100%");
                                if drive.emit(SequencerEvent::AnimationCompleted) != Some(Effect::Handoff) {
                                    return;
                                }

                                let Some(main) = main_ref.cast::<HtmlVideoElement>() else {
                                    return;
                                };
                                match handoff_src(&*pool.borrow(), cursor, next.current_time()) {
                                    Some(src) => main.set_src(&src),
                                    None => debug!("Video {} not loaded yet, skipping handoff", cursor),
                                }
                            }
                        };
                        tweens.push(TweenHandle::run(
                            Tween::new(config::NEXT_VIDEO_EXPAND_MS, Ease::Power1InOut),
                            on_start,
                            on_update,
                            on_complete,
                        ));
                    }

                    if let Some(preview) = preview.clone() {
                        set_style(&preview, "transform", "scale(0)");
                        let grow = preview.clone();
                        let settle = preview.clone();
                        tweens.push(TweenHandle::run(
                            Tween::new(config::CURRENT_VIDEO_GROW_MS, Ease::Power1InOut),
                            || (),
                            move |t: f64| set_style(&grow, "transform", &format!("scale({})", lerp(0.0, 1.5, t))),
                            move || clear_style(&settle, "transform"),
                        ));
                    }
                }

                move || {
                    // Cancel anything still running and put the elements back
                    // before the next swap starts from scratch.
                    drop(tweens);
                    if let Some(next) = next {
                        for property in ["visibility", "width", "height"] {
                            clear_style(&next, property);
                        }
                    }
                    if let Some(preview) = preview {
                        clear_style(&preview, "transform");
                    }
                }
            },
            (sequencer.generation, sequencer.cursor),
        );
    }

    let on_preview_click = Callback::from(move |_: MouseEvent| {
        // The swap itself runs from the effect keyed on the new generation.
        if drive.emit(SequencerEvent::ClickAdvance) == Some(Effect::StartSwap) {
            debug!("Swapping hero video");
        }
    });

    let source_for = |index: usize| -> Option<String> { pool.borrow().get(index).map(str::to_string) };
    let is_loading = progress.is_loading();

    html! {
        <div class="hero">
            <style>
                {r#"
                    .hero {
                        position: relative;
                        height: 100dvh;
                        width: 100vw;
                        overflow-x: hidden;
                    }
                    .hero .loading-overlay {
                        position: absolute;
                        z-index: 100;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        height: 100dvh;
                        width: 100vw;
                        overflow: hidden;
                        background-color: #f0f2fa;
                    }
                    .three-body {
                        --uib-size: 35px;
                        --uib-speed: 0.8s;
                        --uib-color: #5d3fd3;
                        position: relative;
                        display: inline-block;
                        height: var(--uib-size);
                        width: var(--uib-size);
                        animation: spin78236 calc(var(--uib-speed) * 2.5) infinite linear;
                    }
                    .three-body__dot {
                        position: absolute;
                        height: 100%;
                        width: 30%;
                    }
                    .three-body__dot:after {
                        content: "";
                        position: absolute;
                        height: 0%;
                        width: 100%;
                        padding-bottom: 100%;
                        background-color: var(--uib-color);
                        border-radius: 50%;
                    }
                    .three-body__dot:nth-child(1) {
                        bottom: 5%;
                        left: 0;
                        transform: rotate(60deg);
                        transform-origin: 50% 85%;
                    }
                    .three-body__dot:nth-child(1)::after {
                        bottom: 0;
                        left: 0;
                        animation: wobble1 var(--uib-speed) infinite ease-in-out;
                        animation-delay: calc(var(--uib-speed) * -0.3);
                    }
                    .three-body__dot:nth-child(2) {
                        bottom: 5%;
                        right: 0;
                        transform: rotate(-60deg);
                        transform-origin: 50% 85%;
                    }
                    .three-body__dot:nth-child(2)::after {
                        bottom: 0;
                        left: 0;
                        animation: wobble1 var(--uib-speed) infinite calc(var(--uib-speed) * -0.15) ease-in-out;
                    }
                    .three-body__dot:nth-child(3) {
                        bottom: -5%;
                        left: 0;
                        transform: translateX(116.666%);
                    }
                    .three-body__dot:nth-child(3)::after {
                        top: 0;
                        left: 0;
                        animation: wobble2 var(--uib-speed) infinite ease-in-out;
                    }
                    @keyframes spin78236 {
                        0% { transform: rotate(0deg); }
                        100% { transform: rotate(360deg); }
                    }
                    @keyframes wobble1 {
                        0%, 100% { transform: translateY(0%) scale(1); opacity: 1; }
                        50% { transform: translateY(-66%) scale(0.65); opacity: 0.8; }
                    }
                    @keyframes wobble2 {
                        0%, 100% { transform: translateY(0%) scale(1); opacity: 1; }
                        50% { transform: translateY(66%) scale(0.65); opacity: 0.8; }
                    }
                    .hero .video-frame {
                        position: relative;
                        z-index: 10;
                        height: 100dvh;
                        width: 100vw;
                        overflow: hidden;
                        border-radius: 0.5rem;
                        background-color: #dfdff0;
                    }
                    .hero .absolute-center {
                        position: absolute;
                        top: 50%;
                        left: 50%;
                        transform: translate(-50%, -50%);
                    }
                    .hero .preview-mask {
                        z-index: 50;
                        width: 16rem;
                        height: 16rem;
                        cursor: pointer;
                        overflow: hidden;
                        border-radius: 0.5rem;
                    }
                    .hero .preview-mask.is-swapping {
                        cursor: progress;
                    }
                    .hero .preview-trigger {
                        transform-origin: center;
                        transform: scale(0.5);
                        opacity: 0;
                        transition: all 500ms ease-in;
                    }
                    .hero .preview-trigger:hover {
                        transform: scale(1);
                        opacity: 1;
                    }
                    .hero .preview-video {
                        width: 16rem;
                        height: 16rem;
                        transform-origin: center;
                        transform: scale(1.5);
                        object-fit: cover;
                        object-position: center;
                    }
                    .hero .next-video {
                        visibility: hidden;
                        z-index: 20;
                        width: 16rem;
                        height: 16rem;
                        object-fit: cover;
                        object-position: center;
                    }
                    .hero .main-video {
                        position: absolute;
                        left: 0;
                        top: 0;
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        object-position: center;
                    }
                    .hero .hero-heading {
                        text-transform: uppercase;
                        font-weight: 900;
                        font-size: 5rem;
                        line-height: 0.8;
                        margin: 0;
                    }
                    .hero .hero-wordmark {
                        position: absolute;
                        bottom: 1.25rem;
                        right: 1.25rem;
                        z-index: 40;
                    }
                    .hero .hero-copy {
                        position: absolute;
                        left: 0;
                        top: 0;
                        z-index: 40;
                        width: 100%;
                        height: 100%;
                        pointer-events: none;
                    }
                    .hero .hero-copy-inner {
                        margin-top: 6rem;
                        padding: 0 1.25rem;
                        color: #f0f2fa;
                        pointer-events: auto;
                    }
                    .hero .hero-copy-inner p {
                        margin-bottom: 1.25rem;
                        max-width: 16rem;
                    }
                    .pill-button {
                        display: inline-flex;
                        align-items: center;
                        justify-content: center;
                        gap: 0.25rem;
                        border: none;
                        border-radius: 9999px;
                        padding: 0.75rem 1.75rem;
                        font-size: 0.75rem;
                        text-transform: uppercase;
                        cursor: pointer;
                        background-color: #edff66;
                        color: #000;
                    }
                    @media (min-width: 640px) {
                        .hero .hero-copy-inner {
                            padding: 0 2.5rem;
                        }
                    }
                    @media (min-width: 768px) {
                        .hero .hero-heading {
                            font-size: 9rem;
                        }
                    }
                "#}
            </style>
            {
                if is_loading {
                    html! {
                        <div class="loading-overlay">
                            <div class="three-body">
                                <div class="three-body__dot" />
                                <div class="three-body__dot" />
                                <div class="three-body__dot" />
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <div id="video-frame" class="video-frame" ref={frame_ref}>
                <div>
                    <div class={classes!("preview-mask", "absolute-center", sequencer.is_transitioning().then(|| "is-swapping"))}>
                        <div class="preview-trigger" onclick={on_preview_click}>
                            <video
                                ref={preview_ref}
                                src={source_for(sequencer.upcoming())}
                                loop=true
                                muted=true
                                id="current-video"
                                class="preview-video"
                            />
                        </div>
                    </div>
                    <video
                        ref={next_ref}
                        src={source_for(sequencer.cursor)}
                        loop=true
                        muted=true
                        id="next-video"
                        class="next-video absolute-center"
                    />
                    <video
                        ref={main_ref}
                        src={source_for(1)}
                        autoplay=true
                        loop=true
                        muted=true
                        class="main-video"
                    />
                </div>
                <h1 class="hero-heading hero-wordmark" style="color: #dfdff0;">
                    {"G"}<b>{"a"}</b>{"ming"}
                </h1>
                <div class="hero-copy">
                    <div class="hero-copy-inner">
                        <h1 class="hero-heading">{"redefi"}<b>{"n"}</b>{"e"}</h1>
                        <p>{"Enter the Metagame layer"}<br />{"Unleash the Play Economy"}</p>
                        <Button
                            id="watch-trailer"
                            title="Watch Trailer"
                            left_icon={html! { <i class="fa-solid fa-location-arrow"></i> }}
                            container_class={classes!("watch-trailer")}
                        />
                    </div>
                </div>
            </div>
            <h1 class="hero-heading hero-wordmark" style="color: #000; z-index: 0;">
                {"G"}<b>{"a"}</b>{"ming"}
            </h1>
        </div>
    }
}

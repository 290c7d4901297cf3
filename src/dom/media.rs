//! Best-effort sounds and images. Nothing here returns an error: failures are
//! logged and the game carries on as if the effect never happened.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, HtmlAudioElement, HtmlImageElement, HtmlMediaElement};

/// Rewind and play an `<audio>` element already on the page.
pub fn play_element(doc: &Document, id: &str) {
    let Some(media) = doc.get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlMediaElement>().ok()) else {
        log::debug!("no #{id} element, skipping sound");
        return;
    };
    media.set_current_time(0.0);
    play_logged(&media, id);
}

/// Play a one-off sound from `url`.
pub fn play_url(url: &str, volume: f64, what: &str) {
    match HtmlAudioElement::new_with_src(url) {
        Ok(audio) => {
            audio.set_volume(volume);
            play_logged(&audio, what);
        }
        Err(err) => log::warn!("could not create {what} audio: {err:?}"),
    }
}

fn play_logged(media: &HtmlMediaElement, what: &str) {
    match media.play() {
        Ok(promise) => {
            let what = what.to_string();
            // Autoplay policies reject the promise rather than throwing.
            spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::warn!("{what} sound did not play: {err:?}");
                }
            });
        }
        Err(err) => log::warn!("{what} sound failed: {err:?}"),
    }
}

/// Swap to `fallback` on the first load error. The handler clears itself, so
/// a failing fallback is left alone.
pub fn fallback_once(img: &HtmlImageElement, fallback: &str) {
    let target = img.clone();
    let fallback = fallback.to_string();
    let handler = Closure::once_into_js(move || {
        log::error!("failed to load image {}, trying {fallback}", target.src());
        target.set_onerror(None);
        target.set_src(&fallback);
    });
    img.set_onerror(Some(handler.unchecked_ref()));
}

/// Startup check for the success image: fade it in once loaded, swap in the
/// placeholder if it is broken.
pub fn check_image(doc: &Document, placeholder: &str) {
    let Some(img) = success_image(doc) else {
        return;
    };
    let shown = img.clone();
    let on_load = Closure::wrap(Box::new(move || {
        log::debug!("success image loaded");
        shown.style().set_property("opacity", "1").ok();
    }) as Box<dyn FnMut()>);
    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();
    fallback_once(&img, placeholder);
    if img.complete() {
        log::debug!("success image already loaded");
        img.style().set_property("opacity", "1").ok();
    }
}

/// Show the success image with a cache-busting query string.
pub fn reveal_image(doc: &Document, src: &str, fallback: &str) {
    let Some(img) = success_image(doc) else {
        return;
    };
    let style = img.style();
    style.set_property("display", "block").ok();
    style.set_property("max-width", "100%").ok();
    style.set_property("height", "auto").ok();
    fallback_once(&img, fallback);
    img.set_src(&cache_busted(src, js_sys::Date::now()));
}

fn success_image(doc: &Document) -> Option<HtmlImageElement> {
    doc.get_element_by_id("success-image")?.dyn_into().ok()
}

pub(crate) fn cache_busted(src: &str, stamp_ms: f64) -> String {
    let sep = if src.contains('?') { '&' } else { '?' };
    format!("{src}{sep}t={}", stamp_ms as u64)
}

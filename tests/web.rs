// Browser tests, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

// Comfortably past the 50 ms reveal delay, well short of the 5 s confetti lifetime.
const AFTER_REVEAL_MS: u32 = 150;

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount() {
    let doc = document();
    if doc.get_element_by_id("game-area").is_some() {
        return;
    }
    let body = doc.body().unwrap();
    body.set_inner_html(
        "<div class='game-container'>\
           <div id='game-area' style='position:relative;width:600px;height:400px;'></div>\
           <span id='clicks'>0</span>\
           <div id='success-message'><img id='success-image'></div>\
         </div>",
    );
}

fn current_button() -> Option<HtmlElement> {
    document()
        .query_selector("#game-area .annoying-button")
        .unwrap()
        .map(|el| el.dyn_into().unwrap())
}

fn clicks_text() -> String {
    document().get_element_by_id("clicks").unwrap().text_content().unwrap()
}

fn panel_visible() -> bool {
    document()
        .get_element_by_id("success-message")
        .unwrap()
        .class_list()
        .contains("visible")
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

fn win_round() {
    for _ in 0..5 {
        current_button().expect("button present before win").click();
    }
}

#[wasm_bindgen_test]
fn five_clicks_remove_the_button() {
    mount();
    evasive_button::start_game().unwrap();
    for n in 1..=5 {
        let btn = current_button().expect("button present before win");
        btn.click();
        assert_eq!(clicks_text(), n.to_string());
    }
    assert!(current_button().is_none());

    evasive_button::reset_game();
    assert!(current_button().is_some());
    assert_eq!(clicks_text(), "0");
}

#[wasm_bindgen_test]
fn button_is_placed_inside_the_area() {
    mount();
    evasive_button::start_game().unwrap();
    let area: HtmlElement = document().get_element_by_id("game-area").unwrap().dyn_into().unwrap();
    let btn = current_button().unwrap();
    let left = btn.style().get_property_value("left").unwrap();
    let x: f64 = left.trim_end_matches("px").parse().unwrap();
    assert!(x >= 0.0);
    assert!(x <= (area.client_width() - btn.offset_width()).max(0) as f64 + 0.1);
}

#[wasm_bindgen_test]
async fn win_reveals_panel_and_celebration() {
    mount();
    evasive_button::start_game().unwrap();
    win_round();
    assert!(!panel_visible(), "panel is revealed after the delay, not synchronously");

    TimeoutFuture::new(AFTER_REVEAL_MS).await;
    assert!(panel_visible());
    assert_eq!(count(".game-container .balloon"), 10);
    assert_eq!(count(".game-container .confetti"), 100);
    assert_eq!(count(".balloon .balloon-string"), 10);
}

#[wasm_bindgen_test]
async fn reset_before_reveal_drops_the_pending_reveal() {
    mount();
    evasive_button::start_game().unwrap();
    win_round();
    evasive_button::reset_game();

    TimeoutFuture::new(AFTER_REVEAL_MS).await;
    assert!(!panel_visible());
    assert_eq!(count(".balloon, .confetti"), 0);
    assert!(current_button().is_some());
    assert_eq!(clicks_text(), "0");
}

#[wasm_bindgen_test]
async fn restarting_after_a_win_clears_the_celebration() {
    mount();
    evasive_button::start_game().unwrap();
    win_round();
    TimeoutFuture::new(AFTER_REVEAL_MS).await;
    assert!(panel_visible());

    evasive_button::start_game().unwrap();
    assert!(!panel_visible());
    assert_eq!(count(".balloon, .confetti"), 0);
    assert!(current_button().is_some());
}

//! Browser binding for the evasive-control loop.
//!
//! The session lives in a thread-local cell. Pointer listeners are installed
//! once on `#game-area` and resolve the event target to the active control
//! through its `data-control-id` attribute, so replacing the button never
//! leaves stale handlers behind. Deferred work goes through `setTimeout` with
//! the session generation captured; callbacks from an older generation are
//! dropped.

use std::cell::RefCell;

use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, HtmlElement, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::session::{Activation, Control, EffectInstance, EffectKind, Extent, Phase, Session, Stage};

pub mod media;

const CONTROL_CLASS: &str = "annoying-button";
const CONTROL_ID_ATTR: &str = "data-control-id";

struct Game {
    session: Session,
    rng: SmallRng,
    doc: Document,
    area: HtmlElement,
    button: Option<HtmlElement>,
}

thread_local! {
    static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
}

/// `Stage` backed by the real game area. The button is created lazily on the
/// first `measure` so an activation that wins never builds one.
struct DomStage<'a> {
    doc: &'a Document,
    area: &'a HtmlElement,
    button: Option<HtmlElement>,
}

impl DomStage<'_> {
    fn button(&mut self) -> Option<&HtmlElement> {
        if self.button.is_none() {
            match create_button(self.doc, self.area) {
                Ok(btn) => self.button = Some(btn),
                Err(err) => log::warn!("could not create control: {err:?}"),
            }
        }
        self.button.as_ref()
    }
}

impl Stage for DomStage<'_> {
    fn container(&self) -> Extent {
        Extent::new(self.area.client_width() as f64, self.area.client_height() as f64)
    }

    fn measure(&mut self, label: &str) -> Extent {
        match self.button() {
            Some(btn) => {
                btn.set_text_content(Some(label));
                Extent::new(btn.offset_width() as f64, btn.offset_height() as f64)
            }
            None => Extent::default(),
        }
    }
}

fn create_button(doc: &Document, area: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let btn: HtmlElement = doc.create_element("button")?.dyn_into()?;
    btn.set_class_name(CONTROL_CLASS);
    area.append_child(&btn)?;
    Ok(btn)
}

fn render_control(btn: &HtmlElement, control: &Control) {
    btn.set_attribute(CONTROL_ID_ATTR, &control.id.to_string()).ok();
    btn.set_text_content(Some(&control.label));
    let p = control.placement;
    btn.set_attribute(
        "style",
        &format!(
            "position:absolute; left:{:.1}px; top:{:.1}px; transition:all 0.3s ease; transform:rotate({:.2}deg);",
            p.x, p.y, p.rotation_deg
        ),
    )
    .ok();
}

fn effect_dom_id(id: u64) -> String {
    format!("effect-{id}")
}

impl Game {
    fn start(&mut self) {
        self.area.set_inner_html("");
        self.button = None;
        let mut stage = DomStage { doc: &self.doc, area: &self.area, button: None };
        let control = self.session.start(&mut self.rng, &mut stage).clone();
        let button = stage.button;
        self.adopt(button, &control);
        set_counter(&self.doc, 0);
        log::info!("game started (generation {})", self.session.generation());
    }

    fn adopt(&mut self, button: Option<HtmlElement>, control: &Control) {
        if let Some(btn) = &button {
            render_control(btn, control);
        }
        self.button = button;
    }

    fn is_current(&self, id: u64) -> bool {
        self.session.control().is_some_and(|c| c.id == id)
    }

    fn hover(&mut self, id: u64) {
        if !self.is_current(id) {
            return;
        }
        let mut stage = DomStage { doc: &self.doc, area: &self.area, button: self.button.clone() };
        let Some(control) = self.session.on_hover(&mut self.rng, &mut stage).cloned() else {
            return;
        };
        let button = stage.button;
        self.adopt(button, &control);
    }

    fn activate(&mut self, id: u64) {
        if !self.is_current(id) {
            return;
        }
        media::play_element(&self.doc, "click-sound");

        if let Some(old) = self.button.take() {
            old.class_list().add_1("clicked").ok();
            let generation = self.session.generation();
            let pressed = old.clone();
            schedule(self.session.config().timing.clicked_class_ms, move || {
                // The pressed button is normally gone by now.
                if pressed.is_connected() && current_generation() == Some(generation) {
                    pressed.class_list().remove_1("clicked").ok();
                }
            });
            old.remove();
        }

        let mut stage = DomStage { doc: &self.doc, area: &self.area, button: None };
        let outcome = self.session.on_activate(&mut self.rng, &mut stage);
        let button = stage.button;
        log::debug!("activation {outcome:?}, needed {}", self.session.target_count());
        match outcome {
            Activation::Advanced { count } => {
                set_counter(&self.doc, count);
                if let Some(control) = self.session.control().cloned() {
                    self.adopt(button, &control);
                }
            }
            Activation::Won { count } => {
                set_counter(&self.doc, count);
                log::info!("win condition met after {count} activations");
                self.show_success();
            }
            Activation::Ignored => {}
        }
    }

    fn show_success(&mut self) {
        let Some(panel) = self.doc.get_element_by_id("success-message") else {
            log::error!("success message element not found");
            return;
        };
        panel.remove_attribute("style").ok();
        let generation = self.session.generation();
        schedule_guarded(self.session.config().timing.reveal_delay_ms, generation, |game| {
            if game.session.phase() == Phase::Won {
                game.reveal();
            }
        });
    }

    fn reveal(&mut self) {
        if let Some(panel) = self.doc.get_element_by_id("success-message") {
            panel.class_list().add_1("visible").ok();
        }
        let media_cfg = self.session.config().media.clone();
        media::reveal_image(&self.doc, &media_cfg.success_image, &media_cfg.success_image_fallback);
        media::play_url(&media_cfg.success_sound, media_cfg.success_volume, "success");

        let generation = self.session.generation();
        let spawned = self.session.celebrate(&mut self.rng, crate::performance_now()).to_vec();
        log::debug!("spawning {} celebration effects", spawned.len());
        let container = self.doc.query_selector(".game-container").ok().flatten();
        for effect in &spawned {
            match render_effect(&self.doc, effect) {
                Ok(el) => {
                    if let Some(parent) = &container {
                        parent.append_child(&el).ok();
                    }
                    schedule(effect.lifetime_ms() as u32, move || {
                        el.remove();
                        with_game(|game| {
                            if game.session.generation() == generation {
                                game.sweep_effects();
                            }
                        });
                    });
                }
                Err(err) => log::warn!("could not create {:?}: {err:?}", effect.kind),
            }
        }
    }

    fn sweep_effects(&mut self) {
        for id in self.session.sweep_effects(crate::performance_now()) {
            if let Some(el) = self.doc.get_element_by_id(&effect_dom_id(id)) {
                el.remove();
            }
        }
    }

    /// Take down the win presentation: panel hidden, balloons and confetti gone.
    fn clear_celebration(&self) {
        if let Some(panel) = self.doc.get_element_by_id("success-message") {
            panel.class_list().remove_1("visible").ok();
            panel.set_attribute("style", "opacity:0;").ok();
        }
        if let Ok(stale) = self.doc.query_selector_all(".balloon, .confetti") {
            for i in 0..stale.length() {
                if let Some(el) = stale.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    el.remove();
                }
            }
        }
    }

    /// New round from any state, with the success panel folded away.
    fn restart(&mut self) {
        self.clear_celebration();
        self.start();

        let generation = self.session.generation();
        schedule_guarded(self.session.config().timing.hide_delay_ms, generation, |game| {
            if game.session.phase() == Phase::Playing {
                if let Some(panel) = game.doc.get_element_by_id("success-message") {
                    panel.set_attribute("style", "opacity:0; display:none;").ok();
                }
            }
        });
    }

    fn reset(&mut self) {
        log::info!("resetting game");
        self.restart();
        let media_cfg = &self.session.config().media;
        media::play_url(&media_cfg.reset_sound, media_cfg.reset_volume, "reset");
    }
}

fn render_effect(doc: &Document, effect: &EffectInstance) -> Result<Element, JsValue> {
    let el = doc.create_element("div")?;
    el.set_class_name(effect.kind.class_name());
    el.set_id(&effect_dom_id(effect.id));
    el.set_attribute(
        "style",
        &format!(
            "background:{}; left:{:.2}vw; animation-duration:{:.3}s; animation-delay:{:.3}s;",
            effect.color, effect.left_vw, effect.duration_s, effect.delay_s
        ),
    )?;
    if effect.kind == EffectKind::Balloon {
        let string = doc.create_element("div")?;
        string.set_class_name("balloon-string");
        el.append_child(&string)?;
    }
    Ok(el)
}

fn set_counter(doc: &Document, count: u32) {
    if let Some(el) = doc.get_element_by_id("clicks") {
        el.set_text_content(Some(&count.to_string()));
    }
}

// --- Timers & state access ---------------------------------------------------

fn schedule(delay_ms: u32, f: impl FnOnce() + 'static) {
    let Some(win) = window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    if let Err(err) =
        win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms.min(i32::MAX as u32) as i32)
    {
        log::warn!("setTimeout failed: {err:?}");
    }
}

/// Run `f` after `delay_ms` only if the session is still on `generation`.
fn schedule_guarded(delay_ms: u32, generation: u64, f: impl FnOnce(&mut Game) + 'static) {
    schedule(delay_ms, move || {
        with_game(|game| {
            if game.session.generation() == generation {
                f(game);
            } else {
                log::debug!("dropping timer from generation {generation}");
            }
        })
    });
}

fn with_game(f: impl FnOnce(&mut Game)) {
    GAME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => {
            if let Some(game) = guard.as_mut() {
                f(game);
            }
        }
        Err(_) => log::warn!("game state busy, event dropped"),
    });
}

fn current_generation() -> Option<u64> {
    GAME.with(|cell| cell.try_borrow().ok()?.as_ref().map(|g| g.session.generation()))
}

// --- Entry points ------------------------------------------------------------

pub fn start(config: GameConfig) -> Result<(), GameError> {
    config.validate()?;
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let restarted = GAME.with(|cell| -> bool {
        let mut guard = cell.borrow_mut();
        match guard.as_mut() {
            Some(game) => {
                game.session.replace_config(config.clone());
                game.restart();
                true
            }
            None => false,
        }
    });
    if restarted {
        return Ok(());
    }

    let Some(area) = doc.get_element_by_id("game-area").and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
        log::warn!("#game-area not found, game not started");
        return Ok(());
    };
    log::info!("page ready, starting game");

    if let Some(panel) = doc.get_element_by_id("success-message") {
        panel.set_attribute("style", "opacity:0;").ok();
    }
    media::check_image(&doc, &config.media.placeholder_image);
    install_listeners(&doc, &area)?;

    let mut game = Game {
        session: Session::new(config),
        rng: crate::rng::fresh_rng(),
        doc,
        area,
        button: None,
    };
    game.start();
    GAME.with(|cell| *cell.borrow_mut() = Some(game));
    Ok(())
}

pub fn reset() {
    with_game(Game::reset);
}

/// Resolve an event to the control id it landed on, if any.
fn control_id(evt: &Event) -> Option<u64> {
    let target: Element = evt.target()?.dyn_into().ok()?;
    let control = target.closest(&format!(".{CONTROL_CLASS}")).ok()??;
    control.get_attribute(CONTROL_ID_ATTR)?.parse().ok()
}

fn install_listeners(doc: &Document, area: &HtmlElement) -> Result<(), JsValue> {
    // Hover: relocate and relabel.
    {
        let closure = Closure::wrap(Box::new(move |evt: Event| {
            if let Some(id) = control_id(&evt) {
                with_game(|game| game.hover(id));
            }
        }) as Box<dyn FnMut(_)>);
        area.add_event_listener_with_callback("mouseover", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Click and touch-start both count as an activation.
    {
        let closure = Closure::wrap(Box::new(move |evt: Event| {
            if let Some(id) = control_id(&evt) {
                evt.prevent_default();
                evt.stop_propagation();
                with_game(|game| game.activate(id));
            }
        }) as Box<dyn FnMut(_)>);
        area.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        let opts = AddEventListenerOptions::new();
        // Non-passive so prevent_default suppresses the synthetic click.
        opts.set_passive(false);
        area.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        closure.forget();
    }

    if let Some(play_again) = doc.get_element_by_id("play-again") {
        let closure = Closure::wrap(Box::new(move |_evt: Event| reset()) as Box<dyn FnMut(_)>);
        play_again.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

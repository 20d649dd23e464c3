//! Promo Arcade entry point
//!
//! Browser: wires the page widgets (game launcher, pricing calculator,
//! scratch card, reward overlay) to the simulation core and drives each open
//! game with interval timers. Native: runs a short headless demo of the sims.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_arcade {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement,
        HtmlSelectElement, KeyboardEvent, MouseEvent,
    };

    use promo_arcade::consts::*;
    use promo_arcade::platform::clock_seed;
    use promo_arcade::platform::web::{LocalKv, TimerRegistry};
    use promo_arcade::pricing::{self, AddonSelection, Tier};
    use promo_arcade::render::{self, DrawCmd};
    use promo_arcade::sim::reward::{RewardIssuer, RewardSink};
    use promo_arcade::sim::serving::ServingConfig;
    use promo_arcade::sim::{Heading, ScratchCard, ServingGame, SlotMachine, SnakeGame};

    /// The game the dispatcher currently has open. One at a time.
    enum ActiveGame {
        Snake(Rc<RefCell<SnakeGame>>),
        Serving(Rc<RefCell<ServingGame>>),
        Slots(Rc<RefCell<SlotMachine>>),
    }

    /// An open game view and the timers it owns.
    struct Session {
        game: ActiveGame,
        timers: Rc<RefCell<TimerRegistry>>,
    }

    thread_local! {
        static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
        static SCRATCH: RefCell<Option<Rc<RefCell<ScratchCard>>>> = const { RefCell::new(None) };
        static PAGE_TIMERS: RefCell<TimerRegistry> = RefCell::new(TimerRegistry::new());
    }

    /// Reward sink that reveals the DOM overlay after a short delay. The
    /// timeout lives in the session registry, so closing the view also
    /// cancels a pending reveal.
    struct OverlaySink {
        timers: Rc<RefCell<TimerRegistry>>,
    }

    impl RewardSink for OverlaySink {
        fn display(&mut self, code: &str) {
            let code = code.to_string();
            self.timers
                .borrow_mut()
                .after(REWARD_REVEAL_DELAY_MS, move || show_reward_overlay(&code));
        }
    }

    pub fn boot() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        wire_launcher(&document);
        wire_keyboard();
        wire_serving_pointer(&document);
        wire_slot_buttons(&document);
        wire_reward_overlay(&document);
        wire_pricing(&document);
        wire_scratch(&document);
        log::info!("promo arcade ready");
    }

    pub fn open(name: &str) {
        match name {
            "snake" => open_snake(),
            "serving" => open_serving(),
            "slots" => open_slots(),
            other => log::warn!("unknown game '{other}'"),
        }
    }

    /// Tear the open view down: every session timer is cleared synchronously
    /// before the game is marked closed.
    pub fn close() {
        SESSION.with(|s| {
            if let Some(session) = s.borrow_mut().take() {
                session.timers.borrow_mut().clear_all();
                match session.game {
                    ActiveGame::Snake(g) => g.borrow_mut().close(),
                    ActiveGame::Serving(g) => g.borrow_mut().close(),
                    ActiveGame::Slots(g) => g.borrow_mut().close(),
                }
            }
        });
    }

    // === Game sessions ===

    fn open_snake() {
        close();
        let Some((_canvas, ctx)) = canvas_context("snake-canvas") else {
            log::warn!("no #snake-canvas, game not started");
            return;
        };
        let timers = Rc::new(RefCell::new(TimerRegistry::new()));
        let issuer = RewardIssuer::new(Box::new(OverlaySink {
            timers: timers.clone(),
        }));
        let game = Rc::new(RefCell::new(SnakeGame::new(clock_seed(), issuer)));
        game.borrow_mut().start();

        {
            let game = game.clone();
            timers.borrow_mut().every(SNAKE_TICK_MS, move || {
                let mut g = game.borrow_mut();
                g.tick();
                paint(&ctx, &render::snake_scene(&g));
            });
        }
        SESSION.with(|s| {
            s.replace(Some(Session {
                game: ActiveGame::Snake(game),
                timers,
            }))
        });
    }

    fn open_serving() {
        close();
        let Some((canvas, ctx)) = canvas_context("serving-canvas") else {
            log::warn!("no #serving-canvas, game not started");
            return;
        };
        let config = ServingConfig {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            ..ServingConfig::default()
        };
        let game = Rc::new(RefCell::new(ServingGame::with_config(config, clock_seed())));
        game.borrow_mut().start();

        let timers = Rc::new(RefCell::new(TimerRegistry::new()));
        {
            let game = game.clone();
            timers.borrow_mut().every(SERVING_TICK_MS, move || {
                let mut g = game.borrow_mut();
                g.tick();
                paint(&ctx, &render::serving_scene(&g));
            });
        }
        SESSION.with(|s| {
            s.replace(Some(Session {
                game: ActiveGame::Serving(game),
                timers,
            }))
        });
    }

    fn open_slots() {
        close();
        let Some((canvas, ctx)) = canvas_context("slots-canvas") else {
            log::warn!("no #slots-canvas, game not started");
            return;
        };
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        let timers = Rc::new(RefCell::new(TimerRegistry::new()));
        let issuer = RewardIssuer::new(Box::new(OverlaySink {
            timers: timers.clone(),
        }));
        let game = Rc::new(RefCell::new(SlotMachine::new(
            clock_seed(),
            issuer,
            Box::new(LocalKv),
        )));

        {
            let game = game.clone();
            timers.borrow_mut().every(SLOT_STEP_MS, move || {
                let mut g = game.borrow_mut();
                g.tick();
                paint(&ctx, &render::slots_scene(&g, w, h));
            });
        }
        SESSION.with(|s| {
            s.replace(Some(Session {
                game: ActiveGame::Slots(game),
                timers,
            }))
        });
    }

    fn with_active(f: impl FnOnce(&ActiveGame)) {
        SESSION.with(|s| {
            if let Some(session) = &*s.borrow() {
                f(&session.game);
            }
        });
    }

    // === Page wiring ===

    fn wire_launcher(document: &Document) {
        on_click(document, "play-snake", || open("snake"));
        on_click(document, "play-serving", || open("serving"));
        on_click(document, "play-slots", || open("slots"));
        on_click(document, "close-game", close);
    }

    fn wire_keyboard() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let heading = match event.key().as_str() {
                "ArrowUp" | "w" | "W" => Some(Heading::Up),
                "ArrowDown" | "s" | "S" => Some(Heading::Down),
                "ArrowLeft" | "a" | "A" => Some(Heading::Left),
                "ArrowRight" | "d" | "D" => Some(Heading::Right),
                _ => None,
            };
            if let Some(heading) = heading {
                with_active(|game| {
                    if let ActiveGame::Snake(g) = game {
                        g.borrow_mut().steer(heading);
                        event.prevent_default();
                    }
                });
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn wire_serving_pointer(document: &Document) {
        let Some(canvas) = element::<HtmlCanvasElement>(document, "serving-canvas") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            with_active(|game| {
                if let ActiveGame::Serving(g) = game {
                    g.borrow_mut()
                        .pointer_down(event.offset_x() as f32, event.offset_y() as f32);
                }
            });
        });
        let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn wire_slot_buttons(document: &Document) {
        on_click(document, "slot-spin", || {
            with_active(|game| {
                if let ActiveGame::Slots(g) = game {
                    if !g.borrow_mut().spin() {
                        log::info!("spin refused");
                    }
                }
            });
        });
        on_click(document, "slot-reset", || {
            with_active(|game| {
                if let ActiveGame::Slots(g) = game {
                    g.borrow_mut().reset();
                }
            });
        });
    }

    // === Reward overlay ===

    fn wire_reward_overlay(document: &Document) {
        on_click(document, "reward-overlay", hide_reward_overlay);
        on_click(document, "reward-copy", copy_reward_code);
    }

    fn show_reward_overlay(code: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        set_text(&document, "reward-code", code);
        if let Some(el) = document.get_element_by_id("reward-overlay") {
            let _ = el.class_list().remove_1("hidden");
        }
    }

    fn hide_reward_overlay() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("reward-overlay") {
            let _ = el.class_list().add_1("hidden");
        }
    }

    fn copy_reward_code() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        if let Some(el) = document.get_element_by_id("reward-code") {
            let code = el.text_content().unwrap_or_default();
            let _ = window.navigator().clipboard().write_text(&code);
        }
    }

    // === Pricing widgets ===

    fn wire_pricing(document: &Document) {
        for id in ["tier-select", "logo-pack", "hosting", "extra-hours"] {
            on_event(document, id, "change", update_pricing);
        }
        on_event(document, "demo-sqft", "input", update_demo);
        update_pricing();
        update_demo();
    }

    fn update_pricing() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(select) = element::<HtmlSelectElement>(&document, "tier-select") else {
            return;
        };
        let tier = select
            .value()
            .parse()
            .ok()
            .and_then(Tier::from_index)
            .unwrap_or(Tier::DigitalMenu);
        let addons = AddonSelection {
            logo_pack: checked(&document, "logo-pack"),
            hosting: checked(&document, "hosting"),
            extra_hours: checked(&document, "extra-hours"),
        };
        let quote = pricing::estimate(tier, addons);
        set_text(&document, "one-time-cost", &format!("${}", quote.one_time));
        set_text(&document, "monthly-cost", &format!("${}", quote.monthly));
    }

    fn update_demo() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(input) = element::<HtmlInputElement>(&document, "demo-sqft") else {
            return;
        };
        let total = pricing::area_estimate(&input.value());
        set_text(&document, "demo-total", &format!("{total:.2}"));
    }

    // === Scratch card ===

    fn wire_scratch(document: &Document) {
        if document.get_element_by_id("scratch-btn").is_none() {
            return;
        }
        let card = Rc::new(RefCell::new(ScratchCard::new(clock_seed())));
        SCRATCH.with(|s| s.replace(Some(card.clone())));

        on_click(document, "scratch-btn", move || {
            if card.borrow_mut().scratch().is_some() {
                refresh_scratch_area();
            }
        });

        PAGE_TIMERS.with(|t| {
            t.borrow_mut().every(SCRATCH_TICK_MS, || {
                SCRATCH.with(|s| {
                    if let Some(card) = &*s.borrow() {
                        let was = card.borrow().revealed();
                        card.borrow_mut().tick();
                        if was != card.borrow().revealed() {
                            refresh_scratch_area();
                        }
                    }
                });
            });
        });
    }

    fn refresh_scratch_area() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(el) = document.get_element_by_id("scratch-area") else {
            return;
        };
        SCRATCH.with(|s| {
            if let Some(card) = &*s.borrow() {
                let card = card.borrow();
                match card.revealed() {
                    Some(outcome) => {
                        el.set_text_content(Some(outcome));
                        let bg = if card.is_winner() { "#27ae60" } else { "#e74c3c" };
                        let _ = el.set_attribute("style", &format!("background: {bg}"));
                    }
                    None => {
                        el.set_text_content(Some("Scratch to reveal discount!"));
                        let _ = el.set_attribute("style", "background: #333");
                    }
                }
            }
        });
    }

    // === DOM helpers ===

    fn canvas_context(id: &str) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.get_element_by_id(id)?.dyn_into().ok()?;
        let ctx: CanvasRenderingContext2d =
            canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some((canvas, ctx))
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn checked(document: &Document, id: &str) -> bool {
        element::<HtmlInputElement>(document, id)
            .map(|i| i.checked())
            .unwrap_or(false)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn on_click(document: &Document, id: &str, f: impl FnMut() + 'static) {
        on_event(document, id, "click", f);
    }

    fn on_event(document: &Document, id: &str, event: &str, mut f: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::debug!("no #{id} on this page");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| f());
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // === Painting ===

    fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) {
        use std::f64::consts::TAU;
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { w, h, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, 0.0, *w as f64, *h as f64);
                }
                DrawCmd::Rect { x, y, w, h, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
                }
                DrawCmd::Circle { x, y, r, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    let _ = ctx.arc(*x as f64, *y as f64, *r as f64, 0.0, TAU);
                    ctx.fill();
                }
                DrawCmd::Text {
                    x,
                    y,
                    text,
                    color,
                    font,
                    align,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.set_font(font);
                    ctx.set_text_align(align);
                    let _ = ctx.fill_text(text, *x as f64, *y as f64);
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_arcade::boot();
}

/// Open one of the arcade games from page JS: "snake", "serving" or "slots".
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn open_game(name: &str) {
    wasm_arcade::open(name);
}

/// Close the open game view, stopping every timer it registered.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn close_game() {
    wasm_arcade::close();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use promo_arcade::flags::MemoryStore;
    use promo_arcade::sim::reward::RewardIssuer;
    use promo_arcade::sim::snake::SnakeConfig;
    use promo_arcade::sim::{GridPos, Heading, Phase, SlotMachine, SnakeGame};

    env_logger::init();
    log::info!("Promo Arcade (native) headless demo; run with `trunk serve` for the web version");

    // Drive the snake along a fixed tour of the grid until it wins.
    let config = SnakeConfig {
        cols: 8,
        rows: 8,
        ..SnakeConfig::default()
    };
    let mut snake = SnakeGame::with_config(config, promo_arcade::platform::clock_seed(),
        RewardIssuer::silent());
    snake.start();

    fn tour_heading(p: GridPos, cols: i32, rows: i32) -> Heading {
        if p.row == 0 {
            if p.col < cols - 1 {
                Heading::Right
            } else {
                Heading::Down
            }
        } else if p.col == 0 {
            Heading::Up
        } else if p.row % 2 == 1 {
            if p.col > 1 || p.row == rows - 1 {
                Heading::Left
            } else {
                Heading::Down
            }
        } else if p.col < cols - 1 {
            Heading::Right
        } else {
            Heading::Down
        }
    }

    let mut ticks = 0u32;
    while snake.phase() == Phase::Running && ticks < 10_000 {
        snake.steer(tour_heading(snake.head(), config.cols, config.rows));
        snake.tick();
        ticks += 1;
    }
    println!(
        "snake: {:?} after {ticks} ticks, score {}, coupon {:?}",
        snake.phase(),
        snake.score(),
        snake.reward_code()
    );

    // Burn through the slot credits; the last spin always pays out.
    let mut slots = SlotMachine::new(
        promo_arcade::platform::clock_seed(),
        RewardIssuer::silent(),
        Box::new(MemoryStore::new()),
    );
    while !slots.phase().is_terminal() {
        if !slots.spin() {
            break;
        }
        while slots.is_spinning() {
            slots.tick();
        }
        println!(
            "slots: reels {:?}, outcome {:?}, credits {}",
            slots.reels(),
            slots.outcome(),
            slots.credits()
        );
    }
    println!("slots: {:?}, coupon {:?}", slots.phase(), slots.reward_code());
}

//! Word Strike gameplay: screens, input, canvas rendering and the SCORM
//! lifecycle glue. The presentation side reads game state each frame and
//! produces no SCORM calls itself; all reporting goes through
//! [`report`] at the lifecycle boundaries (start, game complete, unload).

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

pub mod questions;
pub mod report;
pub mod score;
pub mod sprites;

use crate::scorm::{ScormSession, locator};
use questions::{Question, WordOption};
use score::ScoreBoard;
use sprites::{
    Bullet, CANVAS_H, CANVAS_W, OPTION_H, OPTION_W, OptionBox, PLAYER_H, PLAYER_W, Player,
    layout_positions,
};

const BACKGROUND_COLOR: &str = "#FADDE1";
const ACCENT_COLOR: &str = "#FF69B4";
const OPTION_COLOR: &str = "#9BEEF0";
const BUTTON_W: f64 = 200.0;
const BUTTON_H: f64 = 50.0;
const PROP_COUNT: usize = 8;
const NEXT_QUESTION_DELAY_MS: f64 = 1_000.0;
const ERROR_FLASH_MS: f64 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Start,
    Instructions,
    Playing,
    Finished,
    Reviewing,
}

/// The question currently on screen, with live option boxes.
struct ActiveQuestion {
    title: String,
    options: Vec<OptionBox>,
    /// Distractors still standing; reaching zero completes the question.
    remaining: u32,
}

/// Decorative drifting shapes behind the playfield.
struct BackgroundProp {
    x: f64,
    y: f64,
    size: f64,
    speed_x: f64,
    speed_y: f64,
    alpha: f64,
}

impl BackgroundProp {
    fn update(&mut self) {
        self.x += self.speed_x;
        self.y += self.speed_y;
        if self.y > CANVAS_H + self.size {
            self.y = -self.size;
            self.x = rand_f64() * CANVAS_W;
        }
        if self.x > CANVAS_W + self.size || self.x < -self.size {
            self.speed_x = -self.speed_x;
        }
    }
}

struct GameState {
    ctx: CanvasRenderingContext2d,
    screen: Screen,
    questions: Vec<Question>,
    question_index: usize,
    active: Option<ActiveQuestion>,
    player: Player,
    bullets: Vec<Bullet>,
    props: Vec<BackgroundProp>,
    left_held: bool,
    right_held: bool,
    error_flash_until: f64,
    /// Timestamp at which to load the next question, set when the last
    /// distractor of the current one goes down.
    advance_at: Option<f64>,
    score: ScoreBoard,
    /// Resolved lazily by the locator; None while discovery is still running
    /// (the game plays fine without it, just non-reporting).
    session: Option<ScormSession>,
}

thread_local! {
    static GAME_STATE: std::cell::RefCell<Option<GameState>> = std::cell::RefCell::new(None);
}

pub(crate) fn start(csv: Option<&str>) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the fixed-size game canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("ws-game-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("ws-game-canvas");
        c.set_width(CANVAS_W as u32);
        c.set_height(CANVAS_H as u32);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:12px; border:2px solid #e8afc0; background:#FADDE1; z-index:20;").ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;
    ctx.set_text_align("center");

    // Status sink for connection / score strings.
    if doc.get_element_by_id("scorm-status").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("scorm-status");
            div.set_text_content(Some("SCORM: connecting..."));
            div.set_attribute("style", "position:fixed; top:10px; right:12px; font-family:'Fira Code', monospace; font-size:14px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }

    let mut parsed = questions::parse_question_table(csv.unwrap_or(DEFAULT_QUESTION_TABLE));
    if parsed.is_empty() {
        // Malformed or empty source table: degrade to the built-in question.
        parsed = questions::fallback_questions();
    }

    let mut board = ScoreBoard::default();
    board.reset(questions::total_distractors(&parsed));

    let props = (0..PROP_COUNT)
        .map(|_| BackgroundProp {
            x: rand_f64() * CANVAS_W,
            y: rand_f64() * CANVAS_H,
            size: 15.0 + rand_f64() * 15.0,
            speed_x: rand_f64() * 0.6 - 0.3,
            speed_y: 0.5 + rand_f64() * 0.5,
            alpha: 0.2 + rand_f64() * 0.4,
        })
        .collect();

    let state = GameState {
        ctx,
        screen: Screen::Start,
        questions: parsed,
        question_index: 0,
        active: None,
        player: Player::new(),
        bullets: Vec::new(),
        props,
        left_held: false,
        right_held: false,
        error_flash_until: 0.0,
        advance_at: None,
        score: board,
        session: None,
    };
    GAME_STATE.with(|cell| cell.replace(Some(state)));

    // Keyboard: movement is held-key based, everything else edge-triggered.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    handle_keydown(state, &evt);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    match evt.key().as_str() {
                        "ArrowLeft" => state.left_held = false,
                        "ArrowRight" => state.right_held = false,
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Mouse: review button on the finish screen.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = evt.offset_x() as f64;
            let y = evt.offset_y() as f64;
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    if state.screen == Screen::Finished
                        && !state.score.unique_missed().is_empty()
                        && x > review_button_x()
                        && x < review_button_x() + BUTTON_W
                        && y > review_button_y()
                        && y < review_button_y() + BUTTON_H
                    {
                        state.screen = Screen::Reviewing;
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Best-effort unload hook: the browser may discard the page before these
    // calls complete; that is the accepted contract, not a defect.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    let finished = matches!(state.screen, Screen::Finished | Screen::Reviewing);
                    if let Some(session) = state.session.as_mut() {
                        report::suspend_on_unload(session, finished);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resolve the LMS transport (bounded retries, then mock fallback) and
    // open the session whenever discovery completes.
    locator::resolve_session(|mut session| {
        let status = if report::open_session(&mut session) {
            if session.is_mock() {
                "SCORM: mock mode".to_string()
            } else {
                format!("SCORM: connected ({})", session.version())
            }
        } else {
            "SCORM: connection failed".to_string()
        };
        set_status(&status);
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.session = Some(session);
            }
        });
    });

    start_game_loop();
    Ok(())
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_game_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                game_tick(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

// --- Input ------------------------------------------------------------------

fn handle_keydown(state: &mut GameState, evt: &web_sys::KeyboardEvent) {
    match evt.key().as_str() {
        "ArrowLeft" => state.left_held = true,
        "ArrowRight" => state.right_held = true,
        " " => {
            if state.screen == Screen::Playing && !evt.repeat() {
                state
                    .bullets
                    .push(Bullet::new(state.player.muzzle_x(), state.player.y));
            }
        }
        "Enter" => match state.screen {
            Screen::Start => state.screen = Screen::Instructions,
            Screen::Instructions => {
                state.screen = Screen::Playing;
                let now = now_ms();
                advance_question(state, now);
            }
            Screen::Finished => restart_game(state),
            _ => {}
        },
        "Escape" => {
            if state.screen == Screen::Reviewing {
                state.screen = Screen::Finished;
            }
        }
        _ => {}
    }
}

// --- Controller -------------------------------------------------------------

/// Puts `questions[question_index]` on screen, or finishes the game when the
/// set is exhausted.
fn advance_question(state: &mut GameState, _now: f64) {
    if state.question_index >= state.questions.len() {
        finish_game(state);
        return;
    }
    let q = &state.questions[state.question_index];
    let mut words: Vec<WordOption> = q.options.clone();
    shuffle(&mut words);
    let xs = layout_positions(words.len());
    let y = CANVAS_H / 4.0;
    let options = words
        .into_iter()
        .zip(xs)
        .map(|(w, x)| OptionBox::new(w.word, w.is_target, x, y))
        .collect();
    state.active = Some(ActiveQuestion {
        title: q.title.clone(),
        options,
        remaining: q.distractor_count,
    });
    state.bullets.clear();
}

fn finish_game(state: &mut GameState) {
    state.screen = Screen::Finished;
    state.active = None;
    if let Some(session) = state.session.as_mut() {
        let percent = report::submit_outcome(session, &state.score);
        set_status(&format!("SCORM: submitted score {percent}"));
    }
}

/// Enter on the finish screen: close out the previous attempt and start a
/// fresh play-through (with a fresh LMS session when one is connected).
fn restart_game(state: &mut GameState) {
    if let Some(session) = state.session.as_mut() {
        // Already terminated by finish_game; a second terminate is a no-op.
        session.terminate();
    }
    state.question_index = 0;
    state.bullets.clear();
    state.active = None;
    state.advance_at = None;
    state.error_flash_until = 0.0;
    state
        .score
        .reset(questions::total_distractors(&state.questions));
    state.screen = Screen::Start;
    if let Some(session) = state.session.as_mut() {
        if report::open_session(session) {
            set_status("SCORM: reconnected");
        }
    }
}

/// Bullet-vs-option resolution for one frame.
fn check_collisions(state: &mut GameState, now: f64) {
    let GameState {
        bullets,
        active,
        score,
        question_index,
        advance_at,
        error_flash_until,
        ..
    } = state;
    let Some(aq) = active.as_mut() else { return };

    for bullet in bullets.iter_mut() {
        if !bullet.active {
            continue;
        }
        for opt in aq.options.iter_mut() {
            if opt.hit || opt.offscreen() || !opt.hits(bullet) {
                continue;
            }
            opt.hit = true;
            opt.hit_at = now;
            bullet.active = false;
            if !opt.is_target {
                opt.falling = true;
                opt.fall_speed = 2.0;
                score.record_correct();
                aq.remaining = aq.remaining.saturating_sub(1);
                if aq.remaining == 0 {
                    *question_index += 1;
                    *advance_at = Some(now + NEXT_QUESTION_DELAY_MS);
                }
            } else {
                score.record_miss(&opt.word);
                *error_flash_until = now + ERROR_FLASH_MS;
            }
            break;
        }
    }
}

// --- Tick & rendering ---------------------------------------------------------

fn game_tick(state: &mut GameState, now: f64) {
    state.ctx.set_fill_style_str(BACKGROUND_COLOR);
    state.ctx.fill_rect(0.0, 0.0, CANVAS_W, CANVAS_H);
    for prop in state.props.iter_mut() {
        prop.update();
    }
    draw_props(state);

    match state.screen {
        Screen::Start => draw_start_screen(state),
        Screen::Instructions => draw_instructions_screen(state),
        Screen::Playing => {
            state.player.step(state.left_held, state.right_held);
            for bullet in state.bullets.iter_mut() {
                bullet.step();
            }
            check_collisions(state, now);
            state.bullets.retain(|b| b.active);
            if let Some(aq) = state.active.as_mut() {
                for opt in aq.options.iter_mut() {
                    opt.step(now);
                }
            }
            if let Some(t) = state.advance_at {
                if now >= t {
                    state.advance_at = None;
                    advance_question(state, now);
                }
            }
            draw_playfield(state, now);
        }
        Screen::Finished => draw_finish_screen(state),
        Screen::Reviewing => draw_review_screen(state),
    }
}

fn draw_props(state: &GameState) {
    let ctx = &state.ctx;
    for prop in &state.props {
        ctx.set_fill_style_str(&format!("rgba(255,255,255,{:.2})", prop.alpha));
        ctx.begin_path();
        ctx.move_to(prop.x, prop.y);
        ctx.line_to(prop.x - prop.size * 0.6, prop.y + prop.size);
        ctx.line_to(prop.x + prop.size * 0.6, prop.y + prop.size);
        ctx.fill();
    }
}

fn draw_playfield(state: &GameState, now: f64) {
    let ctx = &state.ctx;

    // Question panel
    if let Some(aq) = &state.active {
        let text_w = 700.0;
        let text_h = 70.0;
        let x = CANVAS_W / 2.0 - text_w / 2.0;
        let y = 50.0;
        ctx.set_fill_style_str("rgba(255,255,255,0.86)");
        ctx.fill_rect(x, y, text_w, text_h);
        ctx.set_fill_style_str("#323232");
        ctx.set_font("28px 'Trebuchet MS', sans-serif");
        ctx.fill_text(&aq.title, CANVAS_W / 2.0, y + text_h / 2.0 - 8.0)
            .ok();
        ctx.set_font("18px 'Trebuchet MS', sans-serif");
        ctx.set_fill_style_str(ACCENT_COLOR);
        ctx.fill_text(
            "Shoot every word that does NOT belong!",
            CANVAS_W / 2.0,
            y + text_h / 2.0 + 18.0,
        )
        .ok();

        for opt in &aq.options {
            if opt.offscreen() {
                continue;
            }
            ctx.set_fill_style_str(if opt.hit {
                "rgba(255,100,100,1.0)"
            } else {
                OPTION_COLOR
            });
            ctx.fill_rect(opt.x, opt.y, OPTION_W, OPTION_H);
            ctx.set_fill_style_str("#000000");
            ctx.set_font("24px 'Trebuchet MS', sans-serif");
            ctx.fill_text(
                &opt.word,
                opt.x + OPTION_W / 2.0,
                opt.y + OPTION_H / 2.0 + 8.0,
            )
            .ok();
        }
    }

    // Progress (questions completed / total)
    ctx.set_fill_style_str("#323232");
    ctx.set_font("20px 'Trebuchet MS', sans-serif");
    ctx.set_text_align("right");
    ctx.fill_text(
        &format!(
            "Progress: {} / {}",
            state.question_index.min(state.questions.len()),
            state.questions.len()
        ),
        CANVAS_W - 20.0,
        34.0,
    )
    .ok();
    ctx.set_text_align("center");

    // Player ship (simple hull + nose triangle)
    let p = &state.player;
    ctx.set_fill_style_str("#6b7fd7");
    ctx.fill_rect(
        p.x + PLAYER_W * 0.2,
        p.y + PLAYER_H * 0.4,
        PLAYER_W * 0.6,
        PLAYER_H * 0.5,
    );
    ctx.begin_path();
    ctx.move_to(p.x + PLAYER_W / 2.0, p.y);
    ctx.line_to(p.x + PLAYER_W * 0.2, p.y + PLAYER_H * 0.45);
    ctx.line_to(p.x + PLAYER_W * 0.8, p.y + PLAYER_H * 0.45);
    ctx.fill();

    // Bullets
    ctx.set_fill_style_str(ACCENT_COLOR);
    for bullet in &state.bullets {
        ctx.begin_path();
        ctx.arc(
            bullet.x,
            bullet.y,
            sprites::BULLET_R,
            0.0,
            std::f64::consts::TAU,
        )
        .ok();
        ctx.fill();
    }

    // Error flash overlay
    if now < state.error_flash_until {
        ctx.set_fill_style_str("rgba(255,100,100,0.6)");
        ctx.fill_rect(0.0, CANVAS_H / 2.0 - 50.0, CANVAS_W, 100.0);
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("36px 'Trebuchet MS', sans-serif");
        ctx.fill_text("Wrong! That word belongs!", CANVAS_W / 2.0, CANVAS_H / 2.0)
            .ok();
    }
}

fn draw_start_screen(state: &GameState) {
    let ctx = &state.ctx;
    ctx.set_fill_style_str("rgba(255,255,255,0.9)");
    ctx.fill_rect(0.0, 0.0, CANVAS_W, CANVAS_H);
    ctx.set_fill_style_str(ACCENT_COLOR);
    ctx.set_font("48px 'Trebuchet MS', sans-serif");
    ctx.fill_text(
        "Welcome to Word Strike",
        CANVAS_W / 2.0,
        CANVAS_H / 2.0 - 50.0,
    )
    .ok();
    ctx.set_fill_style_str("#323232");
    ctx.set_font("28px 'Trebuchet MS', sans-serif");
    ctx.fill_text("Press [ Enter ] to begin", CANVAS_W / 2.0, CANVAS_H / 2.0 + 50.0)
        .ok();
}

fn draw_instructions_screen(state: &GameState) {
    let ctx = &state.ctx;
    ctx.set_fill_style_str("rgba(255,255,255,0.9)");
    ctx.fill_rect(0.0, 0.0, CANVAS_W, CANVAS_H);
    ctx.set_fill_style_str(ACCENT_COLOR);
    ctx.set_font("38px 'Trebuchet MS', sans-serif");
    ctx.fill_text("How to play", CANVAS_W / 2.0, 80.0).ok();

    ctx.set_fill_style_str("#323232");
    ctx.set_font("24px 'Trebuchet MS', sans-serif");
    let start_y = 160.0;
    let line = 48.0;
    let lines = [
        "Goal: shoot down every word that does not fit the question.",
        "Careful: hitting a word that belongs counts against you.",
        "Arrow keys: move the ship",
        "Space: fire",
    ];
    for (i, text) in lines.iter().enumerate() {
        ctx.fill_text(text, CANVAS_W / 2.0, start_y + line * i as f64)
            .ok();
    }
    ctx.set_fill_style_str(ACCENT_COLOR);
    ctx.set_font("28px 'Trebuchet MS', sans-serif");
    ctx.fill_text("Press [ Enter ] to start", CANVAS_W / 2.0, CANVAS_H - 80.0)
        .ok();
}

fn review_button_x() -> f64 {
    CANVAS_W / 2.0 - BUTTON_W / 2.0
}

fn review_button_y() -> f64 {
    CANVAS_H / 2.0 + 100.0
}

fn draw_finish_screen(state: &GameState) {
    let ctx = &state.ctx;
    ctx.set_fill_style_str("rgba(255,255,255,0.85)");
    ctx.fill_rect(0.0, 0.0, CANVAS_W, CANVAS_H);
    ctx.set_fill_style_str(ACCENT_COLOR);
    ctx.set_font("48px 'Trebuchet MS', sans-serif");
    ctx.fill_text("Quiz complete!", CANVAS_W / 2.0, CANVAS_H / 2.0 - 100.0)
        .ok();

    let percent = state.score.percent();
    let missed = state.score.unique_missed();
    ctx.set_fill_style_str("#323232");
    ctx.set_font("28px 'Trebuchet MS', sans-serif");
    let summary = if missed.is_empty() {
        format!("Perfect! {percent} points with no mistakes.")
    } else {
        format!("Score: {percent} points, {} word(s) shot by mistake.", missed.len())
    };
    ctx.fill_text(&summary, CANVAS_W / 2.0, CANVAS_H / 2.0 + 40.0)
        .ok();

    if !missed.is_empty() {
        ctx.set_fill_style_str("#A0D9B1");
        ctx.fill_rect(review_button_x(), review_button_y(), BUTTON_W, BUTTON_H);
        ctx.set_fill_style_str("#323232");
        ctx.set_font("22px 'Trebuchet MS', sans-serif");
        ctx.fill_text(
            "Review mistakes",
            CANVAS_W / 2.0,
            review_button_y() + BUTTON_H / 2.0 + 7.0,
        )
        .ok();
    }
    ctx.set_fill_style_str("#323232");
    ctx.set_font("22px 'Trebuchet MS', sans-serif");
    ctx.fill_text(
        "Press [ Enter ] to play again",
        CANVAS_W / 2.0,
        review_button_y() + 110.0,
    )
    .ok();
}

fn draw_review_screen(state: &GameState) {
    let ctx = &state.ctx;
    ctx.set_fill_style_str("rgba(255,255,255,0.9)");
    ctx.fill_rect(0.0, 0.0, CANVAS_W, CANVAS_H);
    ctx.set_fill_style_str(ACCENT_COLOR);
    ctx.set_font("38px 'Trebuchet MS', sans-serif");
    ctx.fill_text("Words you shot by mistake", CANVAS_W / 2.0, 80.0)
        .ok();

    let missed = state.score.unique_missed();
    if missed.is_empty() {
        ctx.set_fill_style_str("#323232");
        ctx.set_font("26px 'Trebuchet MS', sans-serif");
        ctx.fill_text("No mistakes this round!", CANVAS_W / 2.0, CANVAS_H / 2.0)
            .ok();
    } else {
        let start_x = 150.0;
        let start_y = 150.0;
        for (i, word) in missed.iter().enumerate() {
            let col = (i % 3) as f64;
            let row = (i / 3) as f64;
            ctx.set_fill_style_str("rgba(255,100,100,1.0)");
            ctx.fill_rect(start_x + col * 220.0, start_y + row * 60.0, 180.0, 40.0);
            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("20px 'Trebuchet MS', sans-serif");
            ctx.fill_text(word, start_x + col * 220.0 + 90.0, start_y + row * 60.0 + 26.0)
                .ok();
        }
    }
    ctx.set_fill_style_str(ACCENT_COLOR);
    ctx.set_font("22px 'Trebuchet MS', sans-serif");
    ctx.fill_text("Press [ ESC ] to go back", CANVAS_W / 2.0, CANVAS_H - 50.0)
        .ok();
}

// --- Helpers ------------------------------------------------------------------

fn set_status(text: &str) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id("scorm-status") {
            el.set_text_content(Some(text));
        }
    }
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

thread_local! {
    static RNG_STATE: std::cell::Cell<u64> = std::cell::Cell::new(0);
}

/// Prototype randomness: an LCG seeded from performance.now() (not crypto
/// secure, good enough for shuffling word boxes).
fn rand_u64() -> u64 {
    RNG_STATE.with(|cell| {
        let mut s = cell.get();
        if s == 0 {
            s = now_ms() as u64 | 1;
        }
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        cell.set(s);
        s
    })
}

fn rand_f64() -> f64 {
    (rand_u64() >> 11) as f64 / (1u64 << 53) as f64
}

fn rand_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (rand_u64() % len as u64) as usize
}

fn shuffle(words: &mut [WordOption]) {
    let mut i = words.len();
    while i > 1 {
        i -= 1;
        let j = rand_index(i + 1);
        words.swap(i, j);
    }
}

/// Question table shipped with the crate; hosts can supply their own via
/// `start_game_with_questions`.
const DEFAULT_QUESTION_TABLE: &str = include_str!("../../assets/questions.csv");

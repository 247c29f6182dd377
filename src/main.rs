//! Block Quiz entry point
//!
//! On wasm this wires the page (canvas, HUD, buttons, keyboard) to the library
//! and drives both components from `requestAnimationFrame`. Natively it plays a
//! short seeded demo in the terminal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement,
        KeyboardEvent,
    };

    use block_quiz::input::{command_for_button, command_for_key};
    use block_quiz::quiz::{AnswerOutcome, QuizEngine};
    use block_quiz::render::{self, RenderSink};
    use block_quiz::sim::{self, Command, GamePhase, GameState};
    use block_quiz::status::{BoardStatus, QuizStatus, StatusSink, format_wrong_list};
    use block_quiz::{Leaderboard, Settings, leaderboard};

    /// 2D canvas behind the board
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
    }

    impl RenderSink for CanvasSink {
        fn clear(&mut self, width: f64, height: f64) {
            self.ctx.clear_rect(0.0, 0.0, width, height);
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(x, y, width, height);
        }
    }

    /// Writes snapshots into the page. Only touches the DOM when a snapshot
    /// differs from the last one.
    struct DomStatus {
        document: Document,
        last_board: Option<BoardStatus>,
        last_quiz: Option<QuizStatus>,
    }

    impl DomStatus {
        fn new(document: Document) -> Self {
            Self {
                document,
                last_board: None,
                last_quiz: None,
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_disabled(&self, id: &str, disabled: bool) {
            let button = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
            if let Some(button) = button {
                button.set_disabled(disabled);
            }
        }

        fn set_class(&self, el: &Element, class: &str, on: bool) {
            let _ = el.class_list().toggle_with_force(class, on);
        }

        fn set_class_by_id(&self, id: &str, class: &str, on: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                self.set_class(&el, class, on);
            }
        }

        /// Rebuild a row of option buttons tagged with `data-index`
        fn fill_options(&self, container_id: &str, options: &[String], class: &str) {
            let Some(container) = self.document.get_element_by_id(container_id) else {
                return;
            };
            container.set_inner_html("");
            for (i, option) in options.iter().enumerate() {
                let Ok(button) = self.document.create_element("button") else {
                    continue;
                };
                button.set_class_name(class);
                button.set_text_content(Some(option));
                let _ = button.set_attribute("data-index", &i.to_string());
                let _ = container.append_child(&button);
            }
        }

        fn mark_selected(&self, selected: Option<usize>) {
            let Ok(buttons) = self.document.query_selector_all("#answers .answer-btn") else {
                return;
            };
            for i in 0..buttons.length() {
                let Some(el) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let on = selected.is_some_and(|s| s as u32 == i);
                self.set_class(&el, "selected", on);
            }
        }

        /// Run/stop pair for the quiz road and the scrolling road itself
        fn road(&self, unlocked: bool, quiz_road: bool, scrolling: bool) {
            self.set_disabled("runBtn", !(unlocked && !quiz_road));
            self.set_disabled("stopBtn", !(unlocked && quiz_road));
            if let Ok(Some(road)) = self.document.query_selector(".road") {
                self.set_class(&road, "scrolling", scrolling);
            }
        }

        fn show_topic_area(&self, playing: bool) {
            self.set_class_by_id("topicSelection", "hidden", playing);
            self.set_class_by_id("gameArea", "hidden", !playing);
        }

        fn show_leaderboard(&self, board: &Leaderboard) {
            self.set_class_by_id("gameArea", "hidden", true);
            self.set_class_by_id("leaderboard", "hidden", false);

            let Some(list) = self.document.get_element_by_id("leaderboardList") else {
                return;
            };
            list.set_inner_html("");
            let now = js_sys::Date::now();
            for entry in &board.entries {
                let Ok(row) = self.document.create_element("div") else {
                    continue;
                };
                row.set_class_name("leaderboard-item");
                row.set_text_content(Some(&format!(
                    "{}  Score: {}  ({})",
                    entry.topic.to_uppercase(),
                    entry.score,
                    leaderboard::format_age(now, entry.timestamp)
                )));
                let _ = list.append_child(&row);
            }
        }
    }

    impl StatusSink for DomStatus {
        fn board(&mut self, status: &BoardStatus) {
            if self.last_board.as_ref() == Some(status) {
                return;
            }
            let prompt_changed = self
                .last_board
                .as_ref()
                .is_none_or(|last| last.penalty_prompt != status.penalty_prompt);

            self.set_text("board-score", &status.score.to_string());
            self.set_text("level", &status.level.to_string());
            self.set_text("target-score", &status.target_score.to_string());
            self.set_text("wrong-list", &format_wrong_list(&status.penalty_wrong));
            self.set_text(
                "pause-button",
                if status.phase == GamePhase::Paused {
                    "Resume"
                } else {
                    "Pause"
                },
            );
            self.set_disabled("run-button", !status.run_enabled);
            self.set_disabled("stop-button", !status.stop_enabled);
            self.set_class_by_id(
                "game-over-modal",
                "show",
                status.phase == GamePhase::GameOver,
            );

            if prompt_changed {
                let prompt = status.penalty_prompt.as_deref().unwrap_or_default();
                self.set_text("question-text", prompt);
                self.fill_options("options-container", &status.penalty_options, "option-btn");
                self.set_class_by_id("question-modal", "show", status.penalty_prompt.is_some());
            }

            self.last_board = Some(status.clone());
        }

        fn quiz(&mut self, status: &QuizStatus) {
            if self.last_quiz.as_ref() == Some(status) {
                return;
            }
            let question_changed = self.last_quiz.as_ref().is_none_or(|last| {
                last.topic != status.topic || last.answered != status.answered
            });

            self.set_text("score", &status.score.to_string());
            self.set_text("timeLeft", &status.time_left_secs.to_string());
            let wrong: Vec<String> = status.wrong_answers.iter().map(usize::to_string).collect();
            self.set_text("wrongList", &wrong.join(", "));

            if question_changed {
                self.set_text("questionText", status.prompt.as_deref().unwrap_or_default());
                self.set_text("codeEditor", status.code.as_deref().unwrap_or_default());
                self.fill_options("answers", &status.options, "answer-btn");
            }
            self.mark_selected(status.selected);

            self.last_quiz = Some(status.clone());
        }
    }

    /// Everything one page owns
    struct App {
        settings: Settings,
        game: GameState,
        quiz: QuizEngine,
        leaderboard: Leaderboard,
        canvas: CanvasSink,
        hud: DomStatus,
        /// Road scrolling started from the quiz's run button
        quiz_road: bool,
        last_time: f64,
    }

    impl App {
        fn command(&mut self, command: Command) {
            if sim::apply_input(&mut self.game, command) {
                log::debug!("Applied {:?}", command);
            }
        }

        fn start_topic(&mut self, name: &str) {
            match self.quiz.start_topic(name) {
                Ok(_) => self.hud.show_topic_area(true),
                Err(e) => log::warn!("{}", e),
            }
        }

        fn select_answer(&mut self, option: usize) {
            self.quiz.select(option);
        }

        fn submit(&mut self) {
            if let Some(outcome) = self.quiz.submit() {
                self.after_answer(outcome);
            }
        }

        fn after_answer(&mut self, outcome: AnswerOutcome) {
            log::debug!("Answer {:?}", outcome);
            if !outcome.topic_complete {
                return;
            }
            let Some(topic) = self.quiz.current_topic().map(|t| t.name.clone()) else {
                return;
            };
            if self
                .leaderboard
                .record(&topic, self.quiz.score(), js_sys::Date::now())
                .is_some()
            {
                self.leaderboard.save();
            }
            self.hud.show_leaderboard(&self.leaderboard);
        }

        fn set_quiz_road(&mut self, on: bool) {
            if self.quiz.run_unlocked() {
                self.quiz_road = on;
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                Duration::from_secs_f64(((time - self.last_time) / 1000.0).max(0.0))
            } else {
                Duration::ZERO
            };
            self.last_time = time;

            if let Some(outcome) = self.quiz.tick(dt) {
                self.after_answer(outcome);
            }
            sim::tick(&mut self.game, dt);
            for event in self.game.drain_events() {
                log::debug!("{:?}", event);
            }

            render::draw(&self.game, self.settings.tile_size, &mut self.canvas);

            self.hud.board(&BoardStatus::capture(&self.game));
            self.hud.quiz(&QuizStatus::capture(&self.quiz));
            self.hud.road(
                self.quiz.run_unlocked(),
                self.quiz_road,
                self.quiz_road || self.game.is_scrolling(),
            );
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Block Quiz starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Stored settings are validated on load; invalid ones fall back to defaults
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = GameState::with_settings(settings.clone(), seed);
        log::info!("Block stack seeded with {}", seed);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("tetris-board")
            .ok_or("no canvas")?
            .dyn_into()?;
        let (width, height) = render::board_size(&game, settings.tile_size);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let app = Rc::new(RefCell::new(App {
            quiz: QuizEngine::with_builtin_topics(&settings),
            leaderboard: Leaderboard::load(),
            canvas: CanvasSink { ctx },
            hud: DomStatus::new(document.clone()),
            quiz_road: false,
            last_time: 0.0,
            game,
            settings,
        }));

        setup_keyboard(&document, app.clone())?;
        setup_buttons(&document, app.clone())?;
        setup_quiz(&document, app.clone())?;

        request_animation_frame(app);
        log::info!("Block Quiz running!");
        Ok(())
    }

    fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(command) = command_for_key(&event.key()) {
                if event.key().starts_with("Arrow") {
                    event.prevent_default();
                }
                app.borrow_mut().command(command);
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// `data-index` of the clicked option button, if the click hit one
    fn clicked_index(event: &web_sys::Event) -> Option<usize> {
        event
            .target()?
            .dyn_into::<Element>()
            .ok()?
            .get_attribute("data-index")?
            .parse()
            .ok()
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for id in [
            "start-button",
            "pause-button",
            "restart-button",
            "run-button",
            "stop-button",
        ] {
            let Some(command) = command_for_button(id) else {
                continue;
            };
            let app = app.clone();
            on_click(document, id, move |_| app.borrow_mut().command(command))?;
        }

        // Penalty options are rebuilt per question; listen on the container
        let penalty = app.clone();
        on_click(document, "options-container", move |event| {
            if let Some(i) = clicked_index(&event) {
                penalty.borrow_mut().command(Command::AnswerPenalty(i));
            }
        })
    }

    fn setup_quiz(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let topics = document.query_selector_all(".topic-btn")?;
        for i in 0..topics.length() {
            let Some(button) = topics.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(topic) = button.get_attribute("data-topic") else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
                app.borrow_mut().start_topic(&topic);
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let select = app.clone();
        on_click(document, "answers", move |event| {
            if let Some(i) = clicked_index(&event) {
                select.borrow_mut().select_answer(i);
            }
        })?;

        let submit = app.clone();
        on_click(document, "submitBtn", move |_| submit.borrow_mut().submit())?;

        let run = app.clone();
        on_click(document, "runBtn", move |_| run.borrow_mut().set_quiz_road(true))?;

        on_click(document, "stopBtn", move |_| app.borrow_mut().set_quiz_road(false))
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Quiz (native) starting...");
    log::info!("The playable version is the wasm build; running a headless demo");

    demo::run_quiz();
    demo::run_block_stack(42);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use block_quiz::quiz::{QuestionSlot, QuizEngine};
    use block_quiz::sim::{self, Command, GamePhase, GameState};
    use block_quiz::status::{BoardStatus, QuizStatus};
    use block_quiz::{Leaderboard, Settings};

    /// Answer every "variables" question correctly and unlock the run button
    pub fn run_quiz() {
        let settings = Settings::default();
        let mut quiz = QuizEngine::with_builtin_topics(&settings);
        if let Err(e) = quiz.start_topic("variables") {
            log::error!("{}", e);
            return;
        }

        while let QuestionSlot::Question(q) = quiz.current_question() {
            let correct = q.correct;
            quiz.select(correct);
            quiz.submit();
        }

        let mut board = Leaderboard::new();
        board.record("variables", quiz.score(), 0.0);
        print_json("quiz", &QuizStatus::capture(&quiz));
        print_json("leaderboard", &board);
        println!("run unlocked: {}", quiz.run_unlocked());
    }

    /// Let gravity run for a while, nudging pieces left and right, and answer
    /// penalty questions with the first option
    pub fn run_block_stack(seed: u64) {
        let settings = Settings::default();
        let step = settings.gravity_interval();
        let mut game = GameState::with_settings(settings, seed);
        sim::apply_input(&mut game, Command::Start);

        for frame in 0..2_000u32 {
            match game.phase() {
                GamePhase::GameOver => break,
                GamePhase::AnsweringPenaltyQuestion => {
                    sim::apply_input(&mut game, Command::AnswerPenalty(0));
                }
                _ => {
                    let shift = if frame % 3 == 0 {
                        Command::MoveLeft
                    } else {
                        Command::MoveRight
                    };
                    sim::apply_input(&mut game, shift);
                    sim::tick(&mut game, step);
                }
            }
        }

        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
        print_json("board", &BoardStatus::capture(&game));
    }

    fn print_json(label: &str, value: &impl serde::Serialize) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}: {}", label, json),
            Err(e) => log::error!("Could not serialize {}: {}", label, e),
        }
    }
}

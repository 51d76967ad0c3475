use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Interval;
use minesweepa_core as game;
use yew::prelude::*;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Grid rows
    #[arg(long, default_value_t = 12)]
    rows: game::Coord,

    /// Grid columns
    #[arg(long, default_value_t = 16)]
    columns: game::Coord,

    /// Absolute number of mines, takes precedence over density
    #[arg(short, long)]
    mines: Option<game::CellCount>,

    /// Fraction of cells holding a mine
    #[arg(short, long, default_value_t = 0.25)]
    density: f32,

    /// Cell size in pixels
    #[arg(long, default_value_t = game::GameConfig::DEFAULT_CELL_SIZE)]
    cell_size: u16,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,
}

impl GameProps {
    fn game_config(&self) -> game::Result<game::GameConfig> {
        let mines = match self.mines {
            Some(count) => game::MineSpec::Count(count),
            None => game::MineSpec::Density(self.density),
        };
        game::GameConfig::new(self.rows, self.columns, mines, self.cell_size)
    }

    fn seed(&self) -> u64 {
        self.seed
            .as_deref()
            .map_or_else(js_random_seed, parse_seed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer {
        x: i32,
        y: i32,
        buttons: game::PointerButtons,
    },
    Leave,
    RestartKey(bool),
    NewGame,
    UpdateTime,
}

fn pointer_msg(e: &MouseEvent) -> Msg {
    Msg::Pointer {
        x: e.offset_x(),
        y: e.offset_y(),
        buttons: game::PointerButtons::from_bits_truncate((e.buttons() & 0xff) as u8),
    }
}

fn is_restart_key(key: &str) -> bool {
    matches!(key, "r" | "R" | "F2")
}

fn cell_class_names(frame: game::CellFrame, triggered: bool) -> Vec<String> {
    use game::CellView::*;

    let mut names = vec!["cell".to_string()];
    names.push(if frame.even { "even" } else { "odd" }.to_string());
    match frame.view {
        Blank => {}
        Flagged => names.push("flag".to_string()),
        Mine => {
            names.push("mine".to_string());
            if triggered {
                names.push("oops".to_string());
            }
        }
        Numbered(count) => {
            names.push("open".to_string());
            names.push(format!("num-{}", count));
        }
    }
    if frame.highlighted {
        names.push("hover".to_string());
    }
    names
}

const fn phase_class(phase: game::Phase, mid_open: bool) -> &'static str {
    use game::Phase::*;
    match phase {
        Playing if mid_open => "mid-open",
        Playing => "in-progress",
        Won => "win",
        Lost => "lose",
    }
}

#[derive(Clone, PartialEq)]
struct BoardCallbacks {
    onmousedown: Callback<MouseEvent>,
    onmouseup: Callback<MouseEvent>,
    onmousemove: Callback<MouseEvent>,
    onmouseleave: Callback<MouseEvent>,
    on_new_game: Callback<MouseEvent>,
}

/// Draws a [`game::BoardView`] as DOM nodes.
struct HtmlRenderer {
    board_pixels: (u32, u32),
    cell_size: u16,
    mid_open: bool,
    callbacks: BoardCallbacks,
    output: Html,
}

impl game::Renderer for HtmlRenderer {
    fn draw(&mut self, view: &game::BoardView) {
        let BoardCallbacks {
            onmousedown,
            onmouseup,
            onmousemove,
            onmouseleave,
            on_new_game,
        } = self.callbacks.clone();

        let (width, height) = self.board_pixels;
        let board_style = format!("width:{}px;height:{}px", width, height);
        let cell_style = format!(
            "width:{0}px;height:{0}px;pointer-events:none",
            self.cell_size
        );
        let mines_left = format_for_counter(view.mines_left);
        let elapsed_time =
            format_for_counter(i32::try_from(view.elapsed.as_secs()).unwrap_or(i32::MAX));
        let phase_class = phase_class(view.phase, self.mid_open);

        self.output = html! {
            <>
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={classes!("state", phase_class)} onclick={on_new_game}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                <div
                    class={classes!("board", view.phase.is_playing().then_some("playable"))}
                    style={board_style}
                    {onmousedown}
                    {onmouseup}
                    {onmousemove}
                    {onmouseleave}
                >
                    {
                        for view.iter_rows().enumerate().map(|(y, row)| html! {
                            <div class="row">
                                {
                                    for row.iter().enumerate().map(|(x, &frame)| {
                                        let coords = (x as game::Coord, y as game::Coord);
                                        let triggered = view.triggered_mine == Some(coords);
                                        let class = Classes::from(cell_class_names(frame, triggered));
                                        html! {
                                            <div {class} style={cell_style.clone()}/>
                                        }
                                    })
                                }
                            </div>
                        })
                    }
                </div>
            </>
        };
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    controller: game::GameController,
    mapper: game::PointerMapper,
    tracker: game::InputTracker,
    pointer: Option<game::Coord2>,
    prev_time: u64,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn apply(&mut self, action: Option<game::Action>) -> bool {
        let Some(action) = action else {
            return false;
        };

        match self.controller.apply(action) {
            Ok(outcome) => {
                log::debug!("{:?}: {:?}", action, outcome);
                outcome.has_update()
            }
            Err(err) => {
                log::error!("Rejected {:?}: {}", action, err);
                false
            }
        }
    }

    fn is_mid_open(&self) -> bool {
        self.pointer.is_some()
            && self
                .tracker
                .pressed()
                .contains(game::PointerButtons::PRIMARY)
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = props.game_config().unwrap_or_else(|err| {
            log::error!("Invalid game settings ({}), using defaults", err);
            game::GameConfig::default()
        });
        let seed = props.seed();
        log::debug!("config: {:?}, seed: {}", config, seed);

        Self {
            controller: game::GameController::new(config, seed),
            mapper: game::PointerMapper::new(&config),
            tracker: game::InputTracker::new(),
            pointer: None,
            prev_time: 0,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Pointer { x, y, buttons } => {
                let cell = self.mapper.cell_at(x, y);
                let was_mid_open = self.is_mid_open();
                let moved = self.pointer != cell;
                self.pointer = cell;

                let action = self.tracker.pointer(cell, buttons);
                let updated = self.apply(action);
                updated || moved || was_mid_open != self.is_mid_open()
            }
            Leave => {
                log::trace!("board leave");
                self.tracker.leave();
                self.pointer.take().is_some()
            }
            RestartKey(down) => {
                let action = self.tracker.restart_key(down);
                self.apply(action)
            }
            NewGame => self.apply(Some(game::Action::Restart)),
            UpdateTime => {
                let time = self.controller.elapsed().as_secs();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let callbacks = BoardCallbacks {
            onmousedown: link.callback(|e: MouseEvent| pointer_msg(&e)),
            onmouseup: link.callback(|e: MouseEvent| pointer_msg(&e)),
            onmousemove: link.callback(|e: MouseEvent| pointer_msg(&e)),
            onmouseleave: link.callback(|_: MouseEvent| Msg::Leave),
            on_new_game: link.callback(|e: MouseEvent| {
                e.stop_propagation();
                Msg::NewGame
            }),
        };
        let onkeydown = link.batch_callback(|e: KeyboardEvent| {
            is_restart_key(&e.key()).then_some(Msg::RestartKey(true))
        });
        let onkeyup = link.batch_callback(|e: KeyboardEvent| {
            is_restart_key(&e.key()).then_some(Msg::RestartKey(false))
        });

        let mut renderer = HtmlRenderer {
            board_pixels: self.mapper.board_pixels(),
            cell_size: self.controller.config().cell_size(),
            mid_open: self.is_mid_open(),
            callbacks,
            output: Html::default(),
        };
        self.controller.render(&mut renderer, self.pointer);

        html! {
            <div
                class="minesweepa"
                tabindex="0"
                {onkeydown}
                {onkeyup}
                oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}
            >
                {renderer.output}
            </div>
        }
    }
}

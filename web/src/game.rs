use bitflags::bitflags;
use clap::Args;
use minado_core as game;
use yew::prelude::*;

use crate::settings::SettingsForm;
use crate::utils::{js_random_seed, Modal};

/// Display state of a single cell, derived from the board. After a terminal
/// transition every mine position becomes displayable.
#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCell {
    Hidden,
    Revealed(u8),
    Flagged,
    Mine,
    TriggeredMine,
    Misflagged,
}

fn display_cell(board: &game::Board, pos: game::GridPos) -> ViewCell {
    use game::{CellState, GameStatus};

    let cell = board.cell_at(pos);
    if !board.status().is_terminal() {
        return match cell {
            CellState::Hidden => ViewCell::Hidden,
            CellState::Revealed(count) => ViewCell::Revealed(count),
            CellState::Flagged => ViewCell::Flagged,
        };
    }

    if board.triggered_mine() == Some(pos) {
        return ViewCell::TriggeredMine;
    }

    match (board.has_mine_at(pos), cell) {
        (true, _) => ViewCell::Mine,
        (false, CellState::Flagged) if board.status() == GameStatus::Lost => ViewCell::Misflagged,
        (false, CellState::Flagged) => ViewCell::Flagged,
        (false, CellState::Revealed(count)) => ViewCell::Revealed(count),
        (false, CellState::Hidden) => ViewCell::Hidden,
    }
}

/// The controller owns the status-to-message mapping.
const fn result_message(status: game::GameStatus) -> Option<&'static str> {
    match status {
        game::GameStatus::Won => Some("You Win!"),
        game::GameStatus::Lost => Some("You Lose!"),
        game::GameStatus::InProgress => None,
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct MouseButtons: u16 {
        const LEFT  = 1;
        const RIGHT = 1 << 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellPress {
    pos: game::GridPos,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Press(CellPress),
    Release(game::GridPos),
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    NewGame,
    ToggleSettings,
    ApplySettings(game::BoardConfig),
    DismissResult,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    cell: ViewCell,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCell::*;

    let CellProps {
        row,
        col,
        cell,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell {
            Hidden => classes!(),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Flagged => classes!("flag"),
            Mine => classes!("open", "mine"),
            TriggeredMine => classes!("open", "mine", "oops"),
            Misflagged => classes!("flag", "wrong"),
        }
    );
    if pressed {
        class.push("open");
    }

    let text = match cell {
        Hidden | Revealed(0) => String::new(),
        Revealed(count) => count.to_string(),
        Flagged | Misflagged => "⚑".to_string(),
        Mine | TriggeredMine => "*".to_string(),
    };

    let onmousedown = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Press(CellPress {
                pos: (row, col),
                buttons,
            }));
            log::trace!("({}, {}) mouse down ({:?})", row, col, buttons);
        })
    };

    let onmouseup = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Release((row, col)));
            log::trace!("({}, {}) mouse up", row, col);
        })
    };

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Leave);
        })
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseleave}>{text}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    config: game::BoardConfig,
    board: Option<game::Board>,
    seed: u64,
    settings_open: bool,
    result_open: bool,
    press: Option<CellPress>,
}

impl GameView {
    fn get_or_create_board(&mut self) -> &mut game::Board {
        let Self {
            board,
            config,
            seed,
            ..
        } = self;

        board.get_or_insert_with(|| {
            use game::{MineGenerator, RandomMineGenerator};
            log::debug!("new session: {:?} (seed {})", config, seed);
            game::Board::new(RandomMineGenerator::new(*seed).generate(config))
        })
    }

    fn reveal_cell(&mut self, pos: game::GridPos) -> bool {
        let outcome = self.get_or_create_board().reveal(pos);
        log::debug!("reveal {:?}: {:?}", pos, outcome);

        if outcome.is_terminal() {
            self.result_open = true;
        }
        outcome.has_update()
    }

    fn flag_cell(&mut self, pos: game::GridPos) -> bool {
        let outcome = self.get_or_create_board().toggle_flag(pos);
        log::debug!("flag {:?}: {:?}", pos, outcome);
        outcome.has_update()
    }

    fn handle_cell_event(&mut self, msg: CellMsg) -> bool {
        match msg {
            CellMsg::Press(press) => {
                self.press = Some(press);
                press.buttons.contains(MouseButtons::LEFT)
            }
            CellMsg::Leave => self.press.take().is_some(),
            CellMsg::Release(pos) => match self.press.take() {
                Some(CellPress {
                    pos: pressed_pos,
                    buttons,
                }) if pressed_pos == pos => {
                    if buttons == MouseButtons::LEFT {
                        self.reveal_cell(pos);
                    } else if buttons == MouseButtons::RIGHT {
                        self.flag_cell(pos);
                    }
                    true
                }
                _ => true,
            },
        }
    }

    fn get_size(&self) -> game::GridPos {
        self.board
            .as_ref()
            .map(|board| board.size())
            .unwrap_or_else(|| self.config.size())
    }

    fn get_mines_left(&self) -> isize {
        self.board
            .as_ref()
            .map(|board| board.mines_left())
            .unwrap_or(self.config.mines as isize)
    }

    fn get_status(&self) -> game::GameStatus {
        self.board
            .as_ref()
            .map_or(game::GameStatus::InProgress, |board| board.status())
    }

    fn is_pressed(&self, pos: game::GridPos, cell: ViewCell) -> bool {
        matches!(
            self.press,
            Some(CellPress {
                pos: pressed_pos,
                buttons: MouseButtons::LEFT,
            }) if pressed_pos == pos && cell == ViewCell::Hidden
        )
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            config: game::BoardConfig::default(),
            board: None,
            seed: ctx.props().seed.unwrap_or_else(js_random_seed),
            settings_open: false,
            result_open: false,
            press: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CellEvent(cell_msg) => self.handle_cell_event(cell_msg),
            NewGame => {
                self.seed = js_random_seed();
                self.result_open = false;
                self.board.take().is_some()
            }
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            ApplySettings(config) => {
                log::debug!("apply settings: {:?}", config);
                self.config = config;
                self.seed = js_random_seed();
                self.board = None;
                self.settings_open = false;
                self.result_open = false;
                true
            }
            DismissResult => {
                self.result_open = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.get_size();
        let mines_left = self.get_mines_left();
        let result_banner = self
            .result_open
            .then(|| result_message(self.get_status()))
            .flatten();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_show_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_apply = ctx.link().callback(ApplySettings);
        let cb_cancel = ctx.link().callback(|_| ToggleSettings);
        let cb_dismiss = ctx.link().callback(|_| DismissResult);

        html! {
            <div class="minado" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <small onclick={cb_show_settings}>{"···"}</small>
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button onclick={cb_new_game}>{"New Game"}</button></span>
                </nav>
                <table>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = (row, col);
                                        let cell = self
                                            .board
                                            .as_ref()
                                            .map_or(ViewCell::Hidden, |board| display_cell(board, pos));
                                        let pressed = self.is_pressed(pos, cell);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {row} {col} {cell} {callback} {pressed}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <SettingsForm
                    open={self.settings_open}
                    current={self.config}
                    on_apply={cb_apply}
                    on_cancel={cb_cancel}
                />
                if let Some(message) = result_banner {
                    <Modal>
                        <dialog open={true} class="result">
                            <article>
                                <p>{message}</p>
                                <footer>
                                    <button onclick={cb_dismiss}>{"OK"}</button>
                                </footer>
                            </article>
                        </dialog>
                    </Modal>
                }
            </div>
        }
    }
}

use minado_core as game;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub current: game::BoardConfig,
    pub on_apply: Callback<game::BoardConfig>,
    pub on_cancel: Callback<()>,
}

/// Builds a validated config from raw form input, mapping failures to the
/// message shown next to the form. A session only starts on `Ok`.
fn parse_config(rows: &str, cols: &str, mines: &str) -> Result<game::BoardConfig, String> {
    let rows: game::Coord = rows
        .trim()
        .parse()
        .map_err(|_| "Rows must be a number from 1 to 255".to_string())?;
    let cols: game::Coord = cols
        .trim()
        .parse()
        .map_err(|_| "Columns must be a number from 1 to 255".to_string())?;
    let mines: game::CellCount = mines
        .trim()
        .parse()
        .map_err(|_| "Mines must be a number".to_string())?;

    game::BoardConfig::new(rows, cols, mines).map_err(|_| {
        if rows == 0 || cols == 0 || mines == 0 {
            "Rows, columns and mines must be positive".to_string()
        } else {
            format!("Too many mines. Max mines: {}", game::mult(rows, cols) - 1)
        }
    })
}

#[function_component(SettingsForm)]
pub(crate) fn settings_form(props: &SettingsProps) -> Html {
    let rows_ref = use_node_ref();
    let cols_ref = use_node_ref();
    let mines_ref = use_node_ref();
    let error = use_state(|| None::<String>);

    let on_start = {
        let rows_ref = rows_ref.clone();
        let cols_ref = cols_ref.clone();
        let mines_ref = mines_ref.clone();
        let error = error.clone();
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| {
            let value = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            match parse_config(&value(&rows_ref), &value(&cols_ref), &value(&mines_ref)) {
                Ok(config) => {
                    error.set(None);
                    on_apply.emit(config);
                }
                Err(message) => error.set(Some(message)),
            }
        })
    };

    let on_cancel = {
        let error = error.clone();
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            on_cancel.emit(());
        })
    };

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Game Settings"}</h2>
                <label>{"Rows"}
                    <input ref={rows_ref} type="number" min="1" max="255" value={props.current.rows.to_string()}/>
                </label>
                <label>{"Columns"}
                    <input ref={cols_ref} type="number" min="1" max="255" value={props.current.cols.to_string()}/>
                </label>
                <label>{"Mines"}
                    <input ref={mines_ref} type="number" min="1" value={props.current.mines.to_string()}/>
                </label>
                if let Some(message) = &*error {
                    <p class="error">{message.clone()}</p>
                }
                <footer>
                    <button type="reset" onclick={on_cancel}>{"Cancel"}</button>
                    <button onclick={on_start}>{"Start Game"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_input_parses_to_a_config() {
        let config = parse_config("9", "9", "10").unwrap();
        assert_eq!(config, game::BoardConfig::new_unchecked(9, 9, 10));
    }

    #[test]
    fn input_is_trimmed_before_parsing() {
        assert!(parse_config(" 4 ", "4", " 3").is_ok());
    }

    #[test]
    fn non_numeric_input_is_reported_per_field() {
        assert!(parse_config("x", "9", "10").unwrap_err().contains("Rows"));
        assert!(parse_config("9", "", "10").unwrap_err().contains("Columns"));
        assert!(parse_config("9", "9", "ten").unwrap_err().contains("Mines"));
    }

    #[test]
    fn zero_values_are_rejected() {
        let message = parse_config("0", "9", "10").unwrap_err();
        assert!(message.contains("positive"), "{message}");
    }

    #[test]
    fn overfull_grid_reports_the_mine_limit() {
        let message = parse_config("2", "2", "4").unwrap_err();
        assert_eq!(message, "Too many mines. Max mines: 3");
        assert!(parse_config("2", "2", "3").is_ok());
    }
}

use crate::types::{Button, Keyboard};

/// Callback data of the "other currencies" button.
pub const OTHER_PAIR: &str = "else";

const OTHER_LABEL: &str = "Другие валюты";

const PRESET_PAIRS: [&str; 4] = ["USD/EUR", "EUR/USD", "RUB/EUR", "RUB/USD"];

const ROW_WIDTH: usize = 2;

/// The currency pair menu shown after a valid amount.
pub fn pair_menu() -> Keyboard {
    let mut rows: Vec<Vec<Button>> = PRESET_PAIRS
        .chunks(ROW_WIDTH)
        .map(|chunk| {
            chunk
                .iter()
                .map(|pair| Button {
                    label: (*pair).to_string(),
                    data: (*pair).to_string(),
                })
                .collect()
        })
        .collect();

    rows.push(vec![Button {
        label: OTHER_LABEL.to_string(),
        data: OTHER_PAIR.to_string(),
    }]);

    Keyboard { rows }
}

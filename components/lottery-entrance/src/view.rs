use std::fmt;

use raffle_entrance_common::format_ether;

use crate::state::ViewState;

pub const GREETING: &str = "Hi from lottery entrance!";
pub const NO_CONTRACT_MESSAGE: &str = "No Raffle Address Detected for current network";
pub const ENTER_LABEL: &str = "Enter Raffle";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonContent {
    Label,
    Spinner,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonView {
    pub content: ButtonContent,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaffleView {
    pub button: ButtonView,
    /// Entrance fee in ether.
    pub entrance_fee: String,
    pub currency_symbol: String,
    pub num_players: String,
    pub recent_winner: String,
}

/// What the entrance shows for the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntranceView {
    NoContract,
    Raffle(RaffleView),
}

impl EntranceView {
    pub fn render(state: &ViewState, has_contract: bool, currency_symbol: &str) -> Self {
        if !has_contract {
            return EntranceView::NoContract;
        }
        let loading = state.loading().is_loading();
        let snapshot = state.snapshot();
        EntranceView::Raffle(RaffleView {
            button: ButtonView {
                content: if loading {
                    ButtonContent::Spinner
                } else {
                    ButtonContent::Label
                },
                disabled: loading,
            },
            entrance_fee: format_ether(snapshot.entrance_fee)
                .unwrap_or_else(|_| snapshot.entrance_fee.to_string()),
            currency_symbol: currency_symbol.to_string(),
            num_players: snapshot.num_players.to_string(),
            recent_winner: snapshot.recent_winner.clone(),
        })
    }
}

impl fmt::Display for EntranceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{GREETING}")?;
        match self {
            EntranceView::NoContract => write!(f, "{NO_CONTRACT_MESSAGE}"),
            EntranceView::Raffle(raffle) => {
                match (raffle.button.content, raffle.button.disabled) {
                    (ButtonContent::Spinner, _) => writeln!(f, "[ ... ] (disabled)")?,
                    (ButtonContent::Label, true) => writeln!(f, "[ {ENTER_LABEL} ] (disabled)")?,
                    (ButtonContent::Label, false) => writeln!(f, "[ {ENTER_LABEL} ]")?,
                }
                writeln!(
                    f,
                    "Entrance Fee: {} {}",
                    raffle.entrance_fee, raffle.currency_symbol
                )?;
                writeln!(f, "Number Of Players: {}", raffle.num_players)?;
                write!(f, "Recent Winner: {}", raffle.recent_winner)
            }
        }
    }
}

pub mod component;
pub mod config;
pub mod error;
pub mod execute;
pub mod interface;
pub mod lifecycle;
pub mod msg;
pub mod query;
pub mod state;
pub mod view;
pub mod watcher;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::component::{EnterOutcome, LotteryEntrance};
pub use crate::config::EntranceConfig;
pub use crate::error::EntranceError;
pub use crate::interface::{NotificationSink, RaffleProvider, Session};
pub use crate::state::{LoadingFlag, Phase};
pub use crate::view::EntranceView;

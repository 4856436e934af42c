//! Application state: inventory store, card states and view state.

pub mod app_state;
pub mod card;
pub mod inventory;
pub mod modal;
pub mod types;

pub use app_state::AppState;
pub use card::{CardDeck, CardState};
pub use inventory::{FetchOutcome, InventoryStore};
pub use modal::Modal;
pub use types::{
    FetchRequest, FetchResponse, FocusEvent, Navigation, RawFields, RawRecord, Record,
};

pub mod data;
pub mod endpoints;

pub use data::{ActiveTab, UiState};

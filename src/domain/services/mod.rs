pub mod actions;
mod app_state;
pub mod clipboard;
pub mod events;
mod form_view;
mod result_view;
mod scroll;

pub use app_state::*;
pub use form_view::*;
pub use result_view::*;
pub use scroll::*;

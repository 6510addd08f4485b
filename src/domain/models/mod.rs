mod action;
mod api;
mod document;
mod event;
mod field;
mod form;
mod json_node;
mod loading;
mod payload;
mod profile;
mod textarea;
mod validation;
mod weekday;

pub use action::*;
pub use api::*;
pub use document::*;
pub use event::*;
pub use field::*;
pub use form::*;
pub use json_node::*;
pub use loading::*;
pub use payload::*;
pub use profile::*;
pub use textarea::*;
pub use validation::*;
pub use weekday::*;

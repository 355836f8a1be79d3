// Presentation layer - formatting, view model and HTTP surface
pub mod app_state;
pub mod formatting;
pub mod handlers;
pub mod router;
pub mod view;

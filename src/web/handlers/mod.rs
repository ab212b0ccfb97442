//! Page handlers rendering Askama templates.

pub mod form;
pub mod shorten;

pub use form::form_handler;
pub use shorten::shorten_form_handler;

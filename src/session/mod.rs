//! Session handling
//! State of one screening session and the controller that drives it

pub mod controller;
pub mod state;

pub use controller::{AppController, ControllerEvent, Notifier};
pub use state::{ChatMessage, ChatRole, SessionState};

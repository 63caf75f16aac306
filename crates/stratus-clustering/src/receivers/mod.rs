//! Receivers: webhook and message registrations that trigger cluster actions

pub mod requests;
pub mod types;

pub use requests::{create, delete, get, list, notify, update, CreateOpts, ListOpts, UpdateOpts};
pub use types::{Receiver, ReceiverType};

pub mod chat;
pub mod controllers;
pub mod dom;
pub mod entities;
pub use entities::*;
pub mod knowledge;
pub mod render;
pub mod service;
pub mod ui;
pub use service::*;
pub mod utils;
pub use utils::*;

use crate::entities::{ChatMessage, Portfolio, Theme};
use crate::render::Patch;
use crate::service::config::InitArgs;
use crate::service::errors::{ChatError, ClientError};
use crate::ui::{Effect, UiEvent};

// Export the interface for the smart contract.
ic_cdk::export_candid!();

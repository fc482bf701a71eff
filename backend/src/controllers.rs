use crate::entities::{ChatMessage, Portfolio, Theme};
use crate::render::Patch;
use crate::service::config::InitArgs;
use crate::service::context::PortfolioCtx;
use crate::service::errors::{ChatError, ClientError};
use crate::service::{install, installed, ChatService, PageService, UiService};
use crate::ui::{Effect, UiEvent};
use crate::utils::time;

fn install_or_trap(args: Option<InitArgs>) {
    if let Err(e) = install(args.unwrap_or_default()) {
        ic_cdk::trap(&format!("invalid init args: {e:#}"));
    }
}

#[ic_cdk::init]
fn init(args: Option<InitArgs>) {
    install_or_trap(args);
}

#[ic_cdk::post_upgrade]
fn post_upgrade(args: Option<InitArgs>) {
    install_or_trap(args);
}

#[ic_cdk::query]
fn portfolio() -> Option<Portfolio> {
    installed().map(|p| p.as_ref().clone())
}

#[ic_cdk::query]
fn render_page() -> Vec<Patch> {
    PageService.render(time())
}

#[ic_cdk::query]
fn page_fragments() -> Vec<(String, String)> {
    PageService.fragments(time())
}

#[ic_cdk::query]
fn bot_response(text: String) -> Result<String, ChatError> {
    ChatService.respond(&text)
}

#[ic_cdk::query]
fn theme(client: String) -> Result<Theme, ClientError> {
    let ctx = PortfolioCtx::get(&client)?;
    Ok(UiService.theme(&ctx))
}

#[ic_cdk::update]
fn restore_ui(client: String) -> Result<Vec<Effect>, ClientError> {
    let ctx = PortfolioCtx::get(&client)?;
    Ok(UiService.restore(&ctx))
}

#[ic_cdk::update]
fn ui_event(client: String, event: UiEvent) -> Result<Vec<Effect>, ClientError> {
    let ctx = PortfolioCtx::get(&client)?;
    Ok(UiService.handle(&ctx, event))
}

#[ic_cdk::update]
fn chat_send(client: String, text: String) -> Result<ChatMessage, ChatError> {
    let ctx = PortfolioCtx::get(&client)?;
    ChatService.send(&ctx, &text)
}

#[ic_cdk::query]
fn chat_messages(client: String) -> Result<Vec<ChatMessage>, ClientError> {
    let ctx = PortfolioCtx::get(&client)?;
    Ok(ChatService.messages(&ctx))
}

#[ic_cdk::query]
fn chat_suggestions(client: String) -> Result<Vec<String>, ClientError> {
    let ctx = PortfolioCtx::get(&client)?;
    Ok(ChatService.suggestions(&ctx))
}

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

#[cfg(all(test, not(rust_analyzer)))]
use crate::utils::mock_ic0::set_timer;
#[cfg(any(not(test), rust_analyzer))]
use ic_cdk_timers::set_timer;

use crate::chat::{get_bot_response, ChatSession};
use crate::entities::{ChatMessage, Portfolio, Theme, PREFERENCES};
use crate::knowledge::PORTFOLIO;
use crate::log;
use crate::render::{self, Patch};
use crate::ui::{Effect, UiEvent, UiState};
use crate::utils::{time, year_of};
use config::{InitArgs, Settings};
use context::PortfolioCtx;
use errors::ChatError;

pub mod config;

pub mod errors {
    use candid::CandidType;
    use serde::Deserialize;
    use thiserror::Error;

    #[derive(Error, CandidType, Deserialize, Debug, PartialEq, Eq, Clone)]
    pub enum ClientError {
        #[error(r#"Client id "{id}" is invalid, expected 1 to 64 of [A-Za-z0-9_-]."#)]
        InvalidId { id: String },
    }

    #[derive(Error, CandidType, Deserialize, Debug, PartialEq, Eq, Clone)]
    pub enum ChatError {
        #[error("Message is empty.")]
        EmptyMessage,
        #[error("No portfolio is installed.")]
        PortfolioMissing,
        #[error(transparent)]
        Client(#[from] ClientError),
    }
}

pub mod context {
    #[cfg(all(test, not(rust_analyzer)))]
    use crate::utils::mock_ic0::caller;
    use candid::Principal;
    #[cfg(any(not(test), rust_analyzer))]
    use ic_cdk::api::caller;

    use super::errors::ClientError;
    use crate::utils::time;

    const MAX_CLIENT_ID_LEN: usize = 64;

    /// Who is asking, from which browser, and when.
    ///
    /// Visitors are anonymous, so the caller principal cannot tell two
    /// browsers apart. The host generates `client` once, keeps it in the
    /// browser's local storage, and passes it on every call.
    #[derive(Clone, Debug)]
    pub struct PortfolioCtx {
        caller: Principal,
        client: String,
        now: u64,
    }

    impl Default for PortfolioCtx {
        fn default() -> Self {
            Self {
                caller: Principal::anonymous(),
                client: String::from("default"),
                now: 0,
            }
        }
    }

    impl PortfolioCtx {
        pub fn get(client: &str) -> Result<Self, ClientError> {
            let valid = !client.is_empty()
                && client.len() <= MAX_CLIENT_ID_LEN
                && client
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ClientError::InvalidId {
                    id: client.chars().take(MAX_CLIENT_ID_LEN).collect(),
                });
            }
            Ok(Self {
                caller: caller(),
                client: client.to_string(),
                now: time(),
            })
        }

        pub fn caller(&self) -> Principal {
            self.caller
        }

        /// Key of this browser's state, durable and transient alike.
        pub fn client(&self) -> &str {
            &self.client
        }

        pub fn now(&self) -> u64 {
            self.now
        }
    }

}

/// Transient state of one browser.
#[derive(Debug)]
struct Visitor {
    ui: Option<UiState>,
    chat: ChatSession,
    last_seen: u64,
}

impl Visitor {
    fn new(history_limit: usize, now: u64) -> Self {
        Self {
            ui: None,
            chat: ChatSession::new(history_limit),
            last_seen: now,
        }
    }
}

thread_local! {
    static INSTALLED: RefCell<Option<Rc<Portfolio>>> = RefCell::new(Some(Rc::new(PORTFOLIO.clone())));
    static SETTINGS: RefCell<Settings> = RefCell::new(Settings::default());
    static VISITORS: RefCell<HashMap<String, Visitor>> = RefCell::new(HashMap::new());
}

/// Installs the record and settings. Runs on install and on every upgrade.
pub fn install(args: InitArgs) -> anyhow::Result<()> {
    let settings = args.settings.unwrap_or_default();
    settings.validate()?;
    let portfolio = args.portfolio.unwrap_or_else(|| PORTFOLIO.clone());
    log!(
        "installing portfolio of {} ({} skill categories, {} projects)",
        portfolio.name,
        portfolio.skills.len(),
        portfolio.projects.len()
    );
    INSTALLED.with_borrow_mut(|p| *p = Some(Rc::new(portfolio)));
    SETTINGS.with_borrow_mut(|s| *s = settings);
    Ok(())
}

pub fn installed() -> Option<Rc<Portfolio>> {
    INSTALLED.with_borrow(|p| p.clone())
}

pub fn settings() -> Settings {
    SETTINGS.with_borrow(|s| s.clone())
}

/// Runs `f` on the visitor behind `client`, creating it if needed. Visitors
/// idle past the configured timeout with no reply in flight are evicted first.
fn with_visitor<R>(client: &str, now: u64, f: impl FnOnce(&mut Visitor) -> R) -> R {
    let settings = settings();
    let idle = settings.idle_timeout().as_nanos() as u64;
    VISITORS.with_borrow_mut(|visitors| {
        let before = visitors.len();
        visitors.retain(|id, v| {
            id == client || v.chat.pending() > 0 || now.saturating_sub(v.last_seen) <= idle
        });
        let evicted = before - visitors.len();
        if evicted > 0 {
            log!("evicted {} idle visitors", evicted);
        }

        let visitor = visitors
            .entry(client.to_string())
            .or_insert_with(|| Visitor::new(settings.chat_history_limit as usize, now));
        visitor.last_seen = visitor.last_seen.max(now);
        f(visitor)
    })
}

/// Read-only view of a visitor; does not count as activity.
fn read_visitor<R: Default>(client: &str, f: impl FnOnce(&Visitor) -> R) -> R {
    VISITORS.with_borrow(|visitors| visitors.get(client).map(f).unwrap_or_default())
}

#[derive(Debug, Default)]
pub struct PageService;

impl PageService {
    pub fn render(&self, now: u64) -> Vec<Patch> {
        let portfolio = installed();
        render::render_page(portfolio.as_deref(), &settings(), year_of(now))
    }

    pub fn fragments(&self, now: u64) -> Vec<(String, String)> {
        render::fragments(&self.render(now))
    }
}

#[derive(Debug, Default)]
pub struct UiService;

impl UiService {
    pub fn theme(&self, ctx: &PortfolioCtx) -> Theme {
        self.saved_theme(ctx).unwrap_or_default()
    }

    fn saved_theme(&self, ctx: &PortfolioCtx) -> Option<Theme> {
        PREFERENCES.with(|p| p.theme(ctx.client()))
    }

    /// Starts a fresh page load for the browser.
    pub fn restore(&self, ctx: &PortfolioCtx) -> Vec<Effect> {
        let (state, effects) = UiState::restore(self.saved_theme(ctx));
        with_visitor(ctx.client(), ctx.now(), |v| v.ui = Some(state));
        effects
    }

    pub fn handle(&self, ctx: &PortfolioCtx, event: UiEvent) -> Vec<Effect> {
        let saved = self.saved_theme(ctx);
        let settings = settings();
        let effects = with_visitor(ctx.client(), ctx.now(), |v| {
            let current = v.ui.unwrap_or_else(|| UiState::restore(saved).0);
            let (next, effects) = current.apply(event, &settings);
            v.ui = Some(next);

            for effect in &effects {
                match effect {
                    Effect::ShowSuggestions(_) => v.chat.show_suggestions(),
                    Effect::CancelPendingReplies => {
                        let dropped = v.chat.cancel_pending();
                        if dropped > 0 {
                            log!("dropped {} pending replies for {}", dropped, ctx.client());
                        }
                    }
                    _ => {}
                }
            }
            effects
        });

        for effect in &effects {
            if let Effect::PersistTheme(theme) = effect {
                PREFERENCES.with(|p| p.save_theme(ctx.client(), *theme));
            }
        }
        effects
    }
}

#[derive(Debug, Default)]
pub struct ChatService;

impl ChatService {
    pub fn respond(&self, text: &str) -> Result<String, ChatError> {
        let portfolio = installed().ok_or(ChatError::PortfolioMissing)?;
        Ok(get_bot_response(text, &portfolio))
    }

    /// Posts the visitor's message and arms a timer for the bot reply.
    pub fn send(&self, ctx: &PortfolioCtx, text: &str) -> Result<ChatMessage, ChatError> {
        if installed().is_none() {
            return Err(ChatError::PortfolioMissing);
        }
        let delay = Duration::from_millis(settings().reply_delay_ms);
        let message = with_visitor(ctx.client(), ctx.now(), |v| {
            v.chat.send(text, ctx.now(), delay)
        })?;
        log!("chat message {} from {} ({})", message.id, ctx.client(), ctx.caller());

        let client = ctx.client().to_string();
        let _ = set_timer(delay, move || {
            ChatService.deliver(&client, time());
        });
        Ok(message)
    }

    /// Timer callback: appends whatever replies are due for `client`.
    pub fn deliver(&self, client: &str, now: u64) -> Vec<ChatMessage> {
        let Some(portfolio) = installed() else {
            return Vec::new();
        };
        with_visitor(client, now, |v| v.chat.deliver_due(now, &portfolio))
    }

    pub fn messages(&self, ctx: &PortfolioCtx) -> Vec<ChatMessage> {
        read_visitor(ctx.client(), |v| v.chat.messages().to_vec())
    }

    pub fn suggestions(&self, ctx: &PortfolioCtx) -> Vec<String> {
        read_visitor(ctx.client(), |v| v.chat.suggestions().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Roles;
    use crate::mock_ic0;
    use crate::render::ids;

    fn visitor(client: &str) -> PortfolioCtx {
        PortfolioCtx::get(client).unwrap()
    }

    #[test]
    fn install_should_reject_bad_settings() {
        let args = InitArgs {
            portfolio: None,
            settings: Some(Settings {
                back_to_top_threshold: f64::NAN,
                ..Settings::default()
            }),
        };
        assert!(install(args).is_err());
        assert_eq!(settings(), Settings::default());
    }

    #[test]
    fn install_should_replace_record() {
        let mut portfolio = PORTFOLIO.clone();
        portfolio.name = "Grace Hopper".to_string();
        install(InitArgs {
            portfolio: Some(portfolio),
            settings: None,
        })
        .unwrap();
        let patches = PageService.render(time());
        assert_eq!(
            patches[0],
            Patch::SetTitle("Grace Hopper - Portfolio".to_string())
        );
        assert!(mock_ic0::logs()
            .iter()
            .any(|l| l.starts_with("installing portfolio of Grace Hopper")));
    }

    #[test]
    fn footer_year_should_follow_clock() {
        // 2025-06-01T00:00:00Z
        mock_ic0::set_time(1_748_736_000_000_000_000);
        let patches = PageService.render(time());
        assert!(patches.contains(&Patch::SetText {
            target: ids::FOOTER_YEAR.to_string(),
            text: "2025".to_string(),
        }));
    }

    #[test]
    fn theme_toggle_should_persist_across_reload() {
        let ctx = visitor("reload-tab");
        assert_eq!(UiService.theme(&ctx), Theme::Light);
        UiService.restore(&ctx);
        UiService.handle(&ctx, UiEvent::ThemeToggled);
        assert_eq!(UiService.theme(&ctx), Theme::Dark);

        let effects = UiService.restore(&ctx);
        assert!(effects.contains(&Effect::SetText {
            target: crate::ui::THEME_ICON.to_string(),
            text: "☀".to_string(),
        }));
        UiService.handle(&ctx, UiEvent::ThemeToggled);
        assert_eq!(UiService.theme(&ctx), Theme::Light);
    }

    #[test]
    fn visitors_should_not_see_each_other() {
        let tab_a = visitor("tab-a");
        let tab_b = visitor("tab-b");

        UiService.restore(&tab_a);
        UiService.handle(&tab_a, UiEvent::ThemeToggled);
        UiService.handle(&tab_a, UiEvent::ChatToggled);
        ChatService.send(&tab_a, "hello").unwrap();

        UiService.restore(&tab_b);
        UiService.handle(&tab_b, UiEvent::ChatToggled);
        assert_eq!(UiService.theme(&tab_b), Theme::Light);
        assert!(ChatService.messages(&tab_b).is_empty());
        assert_eq!(ChatService.suggestions(&tab_b).len(), 4);

        UiService.handle(&tab_b, UiEvent::ChatCloseClicked);
        mock_ic0::advance(Duration::from_secs(1));
        assert_eq!(mock_ic0::run_due_timers(), 1);

        let seen = ChatService.messages(&tab_a);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].content, crate::knowledge::GREETING);
        assert_eq!(UiService.theme(&tab_a), Theme::Dark);
        assert!(ChatService.messages(&tab_b).is_empty());
    }

    #[test]
    fn reply_should_arrive_only_through_timer() {
        let ctx = visitor("timer-tab");
        UiService.handle(&ctx, UiEvent::ChatToggled);
        assert_eq!(ChatService.suggestions(&ctx).len(), 4);

        let sent = ChatService.send(&ctx, "Tell me about your projects").unwrap();
        assert_eq!(sent.role, Roles::User);
        assert!(ChatService.suggestions(&ctx).is_empty());
        assert_eq!(
            mock_ic0::scheduled_timers(),
            vec![Duration::from_millis(500)]
        );

        mock_ic0::advance(Duration::from_millis(499));
        assert_eq!(mock_ic0::run_due_timers(), 0);
        assert_eq!(ChatService.messages(&ctx).len(), 1);

        mock_ic0::advance(Duration::from_millis(1));
        assert_eq!(mock_ic0::run_due_timers(), 1);
        let messages = ChatService.messages(&ctx);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Roles::Bot);
        assert!(messages[1]
            .content
            .starts_with("Here are some of my projects:\n- Cryptofix-Trading:"));
    }

    #[test]
    fn quick_sends_should_be_answered_in_order() {
        let ctx = visitor("quick-tab");
        ChatService.send(&ctx, "contact").unwrap();
        mock_ic0::advance(Duration::from_millis(10));
        ChatService.send(&ctx, "hello").unwrap();

        mock_ic0::advance(Duration::from_secs(1));
        assert_eq!(mock_ic0::run_due_timers(), 2);
        let roles: Vec<Roles> = ChatService.messages(&ctx).iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Roles::User, Roles::User, Roles::Bot, Roles::Bot]);
        let messages = ChatService.messages(&ctx);
        assert!(messages[2].content.starts_with("You can contact me"));
        assert_eq!(messages[3].content, crate::knowledge::GREETING);
    }

    #[test]
    fn closing_chat_should_cancel_pending_reply() {
        let ctx = visitor("closing-tab");
        UiService.handle(&ctx, UiEvent::ChatToggled);
        ChatService.send(&ctx, "hello").unwrap();
        UiService.handle(&ctx, UiEvent::ChatCloseClicked);

        mock_ic0::advance(Duration::from_secs(1));
        assert_eq!(mock_ic0::run_due_timers(), 1);
        assert_eq!(ChatService.messages(&ctx).len(), 1);
        assert!(mock_ic0::logs()
            .iter()
            .any(|l| l == "dropped 1 pending replies for closing-tab"));
    }

    #[test]
    fn idle_visitor_should_be_evicted() {
        install(InitArgs {
            portfolio: None,
            settings: Some(Settings {
                idle_session_secs: 60,
                ..Settings::default()
            }),
        })
        .unwrap();
        let idle = visitor("idle-tab");
        ChatService.send(&idle, "hello").unwrap();
        mock_ic0::advance(Duration::from_secs(61));
        mock_ic0::run_due_timers();
        assert_eq!(ChatService.messages(&idle).len(), 2);

        // still inside the window, measured from the reply
        UiService.handle(&visitor("busy-tab"), UiEvent::ChatToggled);
        assert_eq!(ChatService.messages(&idle).len(), 2);

        mock_ic0::advance(Duration::from_secs(61));
        UiService.handle(&visitor("busy-tab"), UiEvent::ChatToggled);
        assert!(ChatService.messages(&idle).is_empty());
        assert!(mock_ic0::logs()
            .iter()
            .any(|l| l == "evicted 1 idle visitors"));
    }

    #[test]
    fn pending_reply_should_keep_visitor_alive() {
        install(InitArgs {
            portfolio: None,
            settings: Some(Settings {
                idle_session_secs: 1,
                reply_delay_ms: 5_000,
                ..Settings::default()
            }),
        })
        .unwrap();
        let slow = visitor("slow-tab");
        ChatService.send(&slow, "contact").unwrap();
        mock_ic0::advance(Duration::from_secs(3));
        UiService.restore(&visitor("other-tab"));
        assert_eq!(ChatService.messages(&slow).len(), 1);

        mock_ic0::advance(Duration::from_secs(2));
        assert_eq!(mock_ic0::run_due_timers(), 1);
        assert_eq!(ChatService.messages(&slow).len(), 2);
    }

    #[test]
    fn history_limit_should_come_from_settings() {
        install(InitArgs {
            portfolio: None,
            settings: Some(Settings {
                chat_history_limit: 3,
                ..Settings::default()
            }),
        })
        .unwrap();
        let ctx = visitor("capped-tab");
        ChatService.send(&ctx, "hello").unwrap();
        ChatService.send(&ctx, "contact").unwrap();
        mock_ic0::advance(Duration::from_secs(1));
        mock_ic0::run_due_timers();
        assert_eq!(ChatService.messages(&ctx).len(), 3);
        assert_eq!(ChatService.messages(&ctx)[0].content, "contact");
    }

    #[test]
    fn empty_send_should_be_noop() {
        let ctx = visitor("empty-tab");
        assert_eq!(ChatService.send(&ctx, " \t"), Err(ChatError::EmptyMessage));
        assert!(ChatService.messages(&ctx).is_empty());
        assert!(mock_ic0::scheduled_timers().is_empty());
    }

    #[test]
    fn respond_should_use_installed_record() {
        assert_eq!(
            ChatService.respond("asdkjals").unwrap(),
            "I can answer questions about Abhijeet's skills, experience, education, and projects. Please try asking something like 'What are your skills?'"
        );
    }
}

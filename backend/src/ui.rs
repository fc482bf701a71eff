//! Interactive page state as small enums with pure transitions.
//!
//! `UiState::apply` never touches the page itself; it returns the effects the
//! browser host must carry out.

use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::entities::Theme;
use crate::knowledge::{REQUIRED_FIELD, SUGGESTED_QUESTIONS};
use crate::service::config::Settings;

pub const BODY: &str = "body";
pub const THEME_ICON: &str = "#themeToggle .toggle-icon";
pub const MOBILE_NAV: &str = ".mobile-nav-links";
pub const BACK_TO_TOP: &str = "#back-to-top-btn";
pub const CHAT_CONTAINER: &str = "#chat-container";
pub const FULLSCREEN_ICON: &str = "#fullscreen-chat-btn i";

const DARK_MODE: &str = "dark-mode";
const ACTIVE: &str = "active";
const FULLSCREEN: &str = "fullscreen";

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Closed,
    Open,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatWindow {
    #[default]
    Closed,
    Open,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatLayout {
    #[default]
    Windowed,
    Fullscreen,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub value: String,
    pub required: bool,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum UiEvent {
    ThemeToggled,
    HamburgerClicked,
    NavCloseClicked,
    NavLinkClicked,
    Scrolled { offset: f64 },
    BackToTopClicked,
    /// `target_top` is `None` when no element matches the fragment.
    AnchorClicked {
        href: String,
        target_top: Option<f64>,
        navbar_height: f64,
    },
    ChatToggled,
    ChatCloseClicked,
    FullscreenToggled,
    FormSubmitted { fields: Vec<FormField> },
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Effect {
    SetClass {
        target: String,
        class: String,
        enabled: bool,
    },
    SetText {
        target: String,
        text: String,
    },
    ScrollLock(bool),
    ScrollTo {
        top: f64,
        smooth: bool,
    },
    PreventDefault,
    PersistTheme(Theme),
    ShowSuggestions(Vec<String>),
    CancelPendingReplies,
    ShowFieldError {
        field: String,
        message: String,
    },
    ClearFieldError {
        field: String,
    },
}

impl Effect {
    fn class(target: &str, class: &str, enabled: bool) -> Self {
        Effect::SetClass {
            target: target.to_string(),
            class: class.to_string(),
            enabled,
        }
    }
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
    pub nav: NavState,
    pub back_to_top: Visibility,
    pub chat: ChatWindow,
    pub chat_layout: ChatLayout,
}

impl UiState {
    /// Initial state for a page load, from the saved theme if any.
    pub fn restore(saved: Option<Theme>) -> (Self, Vec<Effect>) {
        let state = Self {
            theme: saved.unwrap_or_default(),
            ..Self::default()
        };
        (state, theme_effects(state.theme))
    }

    pub fn apply(self, event: UiEvent, settings: &Settings) -> (Self, Vec<Effect>) {
        match event {
            UiEvent::ThemeToggled => {
                let theme = self.theme.toggled();
                let mut effects = theme_effects(theme);
                effects.push(Effect::PersistTheme(theme));
                (Self { theme, ..self }, effects)
            }
            UiEvent::HamburgerClicked => (
                Self {
                    nav: NavState::Open,
                    ..self
                },
                vec![Effect::class(MOBILE_NAV, ACTIVE, true), Effect::ScrollLock(true)],
            ),
            UiEvent::NavCloseClicked | UiEvent::NavLinkClicked => (
                Self {
                    nav: NavState::Closed,
                    ..self
                },
                vec![Effect::class(MOBILE_NAV, ACTIVE, false), Effect::ScrollLock(false)],
            ),
            UiEvent::Scrolled { offset } => {
                let back_to_top = back_to_top_visibility(offset, settings.back_to_top_threshold);
                (
                    Self {
                        back_to_top,
                        ..self
                    },
                    vec![Effect::class(
                        BACK_TO_TOP,
                        ACTIVE,
                        back_to_top == Visibility::Visible,
                    )],
                )
            }
            UiEvent::BackToTopClicked => (
                self,
                vec![Effect::ScrollTo {
                    top: 0.0,
                    smooth: true,
                }],
            ),
            UiEvent::AnchorClicked {
                href,
                target_top,
                navbar_height,
            } => (
                self,
                anchor_effects(&href, target_top, navbar_height, settings.anchor_margin),
            ),
            UiEvent::ChatToggled => match self.chat {
                ChatWindow::Closed => self.open_chat(),
                ChatWindow::Open => self.close_chat(),
            },
            UiEvent::ChatCloseClicked => self.close_chat(),
            UiEvent::FullscreenToggled => {
                let chat_layout = match self.chat_layout {
                    ChatLayout::Windowed => ChatLayout::Fullscreen,
                    ChatLayout::Fullscreen => ChatLayout::Windowed,
                };
                let fullscreen = chat_layout == ChatLayout::Fullscreen;
                (
                    Self {
                        chat_layout,
                        ..self
                    },
                    vec![
                        Effect::class(CHAT_CONTAINER, FULLSCREEN, fullscreen),
                        Effect::class(FULLSCREEN_ICON, "fa-expand", !fullscreen),
                        Effect::class(FULLSCREEN_ICON, "fa-compress", fullscreen),
                    ],
                )
            }
            UiEvent::FormSubmitted { fields } => (self, validate_form(&fields)),
        }
    }

    fn open_chat(self) -> (Self, Vec<Effect>) {
        (
            Self {
                chat: ChatWindow::Open,
                ..self
            },
            vec![
                Effect::class(CHAT_CONTAINER, ACTIVE, true),
                Effect::ShowSuggestions(SUGGESTED_QUESTIONS.clone()),
            ],
        )
    }

    fn close_chat(self) -> (Self, Vec<Effect>) {
        let mut effects = vec![Effect::class(CHAT_CONTAINER, ACTIVE, false)];
        if self.chat == ChatWindow::Open {
            effects.push(Effect::CancelPendingReplies);
        }
        (
            Self {
                chat: ChatWindow::Closed,
                ..self
            },
            effects,
        )
    }
}

fn theme_effects(theme: Theme) -> Vec<Effect> {
    vec![
        Effect::class(BODY, DARK_MODE, theme == Theme::Dark),
        Effect::SetText {
            target: THEME_ICON.to_string(),
            text: theme.glyph().to_string(),
        },
    ]
}

pub fn back_to_top_visibility(offset: f64, threshold: f64) -> Visibility {
    if offset > threshold {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Smooth-scrolls to same-page fragments, leaving room for the fixed navbar.
pub fn anchor_effects(href: &str, target_top: Option<f64>, navbar_height: f64, margin: f64) -> Vec<Effect> {
    match target_top {
        Some(top) if href.starts_with('#') && href.len() > 1 => vec![
            Effect::PreventDefault,
            Effect::ScrollTo {
                top: top - navbar_height - margin,
                smooth: true,
            },
        ],
        _ => Vec::new(),
    }
}

/// Required fields must hold something besides whitespace.
pub fn validate_form(fields: &[FormField]) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut valid = true;
    for field in fields.iter().filter(|f| f.required) {
        if field.value.trim().is_empty() {
            valid = false;
            effects.push(Effect::ShowFieldError {
                field: field.id.clone(),
                message: REQUIRED_FIELD.to_string(),
            });
        } else {
            effects.push(Effect::ClearFieldError {
                field: field.id.clone(),
            });
        }
    }
    if !valid {
        effects.push(Effect::PreventDefault);
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, value: &str) -> FormField {
        FormField {
            id: id.to_string(),
            value: value.to_string(),
            required: true,
        }
    }

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn restore_should_default_to_light() {
        let (state, effects) = UiState::restore(None);
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(effects[0], Effect::class(BODY, DARK_MODE, false));
        assert_eq!(
            effects[1],
            Effect::SetText {
                target: THEME_ICON.to_string(),
                text: "☽".to_string()
            }
        );
    }

    #[test]
    fn double_toggle_should_return_initial_visual_state() {
        let (start, initial) = UiState::restore(Some(Theme::Dark));
        let (once, effects) = start.apply(UiEvent::ThemeToggled, &settings());
        assert_eq!(once.theme, Theme::Light);
        assert!(effects.contains(&Effect::PersistTheme(Theme::Light)));

        let (twice, effects) = once.apply(UiEvent::ThemeToggled, &settings());
        assert_eq!(twice, start);
        assert_eq!(&effects[..2], &initial[..]);
        assert_eq!(effects[2], Effect::PersistTheme(Theme::Dark));
    }

    #[test]
    fn nav_should_lock_scroll_only_while_open() {
        let (open, effects) = UiState::default().apply(UiEvent::HamburgerClicked, &settings());
        assert_eq!(open.nav, NavState::Open);
        assert!(effects.contains(&Effect::ScrollLock(true)));

        for close in [UiEvent::NavCloseClicked, UiEvent::NavLinkClicked] {
            let (closed, effects) = open.apply(close, &settings());
            assert_eq!(closed.nav, NavState::Closed);
            assert!(effects.contains(&Effect::ScrollLock(false)));
        }
    }

    #[test]
    fn back_to_top_should_flip_exactly_at_threshold() {
        let s = settings();
        let mut state = UiState::default();
        for (offset, expected) in [
            (0.0, Visibility::Hidden),
            (300.0, Visibility::Hidden),
            (300.5, Visibility::Visible),
            (1200.0, Visibility::Visible),
            (299.0, Visibility::Hidden),
        ] {
            let (next, effects) = state.apply(UiEvent::Scrolled { offset }, &s);
            assert_eq!(next.back_to_top, expected, "offset {offset}");
            assert_eq!(
                effects,
                vec![Effect::class(BACK_TO_TOP, ACTIVE, expected == Visibility::Visible)]
            );
            state = next;
        }
    }

    #[test]
    fn back_to_top_click_should_scroll_home() {
        let (_, effects) = UiState::default().apply(UiEvent::BackToTopClicked, &settings());
        assert_eq!(
            effects,
            vec![Effect::ScrollTo {
                top: 0.0,
                smooth: true
            }]
        );
    }

    #[test]
    fn anchor_should_offset_by_navbar_and_margin() {
        assert_eq!(
            anchor_effects("#projects", Some(900.0), 70.0, 20.0),
            vec![
                Effect::PreventDefault,
                Effect::ScrollTo {
                    top: 810.0,
                    smooth: true
                }
            ]
        );
        assert!(anchor_effects("#", Some(0.0), 70.0, 20.0).is_empty());
        assert!(anchor_effects("#missing", None, 70.0, 20.0).is_empty());
    }

    #[test]
    fn blank_required_fields_should_block_submission() {
        let fields = vec![
            field("name", "  "),
            field("email", ""),
            FormField {
                required: false,
                ..field("subject", "")
            },
        ];
        let effects = validate_form(&fields);
        assert_eq!(
            effects,
            vec![
                Effect::ShowFieldError {
                    field: "name".to_string(),
                    message: REQUIRED_FIELD.to_string()
                },
                Effect::ShowFieldError {
                    field: "email".to_string(),
                    message: REQUIRED_FIELD.to_string()
                },
                Effect::PreventDefault,
            ]
        );
    }

    #[test]
    fn filled_form_should_clear_errors_and_submit() {
        let fields = vec![field("name", "Ada"), field("message", "hi")];
        let effects = validate_form(&fields);
        assert!(!effects.contains(&Effect::PreventDefault));
        assert!(effects
            .iter()
            .all(|e| matches!(e, Effect::ClearFieldError { .. })));
    }

    #[test]
    fn chat_toggle_should_show_suggestions_and_close_should_cancel() {
        let (open, effects) = UiState::default().apply(UiEvent::ChatToggled, &settings());
        assert_eq!(open.chat, ChatWindow::Open);
        assert!(effects.contains(&Effect::ShowSuggestions(SUGGESTED_QUESTIONS.clone())));

        let (closed, effects) = open.apply(UiEvent::ChatCloseClicked, &settings());
        assert_eq!(closed.chat, ChatWindow::Closed);
        assert!(effects.contains(&Effect::CancelPendingReplies));

        let (_, effects) = closed.apply(UiEvent::ChatCloseClicked, &settings());
        assert!(!effects.contains(&Effect::CancelPendingReplies));
    }

    #[test]
    fn fullscreen_should_swap_icon() {
        let (full, effects) = UiState::default().apply(UiEvent::FullscreenToggled, &settings());
        assert_eq!(full.chat_layout, ChatLayout::Fullscreen);
        assert!(effects.contains(&Effect::class(FULLSCREEN_ICON, "fa-compress", true)));
        let (windowed, _) = full.apply(UiEvent::FullscreenToggled, &settings());
        assert_eq!(windowed.chat_layout, ChatLayout::Windowed);
    }
}

use std::collections::VecDeque;
use std::time::Duration;

use itertools::Itertools;

use crate::entities::{ChatMessage, Portfolio, Roles};
use crate::knowledge::{GREETING, SUGGESTED_QUESTIONS};
use crate::service::errors::ChatError;

/// Picks the canned answer for `message`. First matching keyword wins.
pub fn get_bot_response(message: &str, portfolio: &Portfolio) -> String {
    let lower = message.to_lowercase();
    let has = |keyword: &str| lower.contains(keyword);

    if has("hello") || has("hi") {
        GREETING.to_string()
    } else if has("about") && has("yourself") {
        portfolio.about_me.description.clone()
    } else if has("skills") {
        skills_summary(portfolio)
    } else if has("experience") {
        let mut out = String::from("Here is my work experience:\n");
        for job in &portfolio.experience {
            out.push_str(&format!(
                "- {} at {} ({})\n  Responsibilities: {}\n",
                job.role,
                job.company,
                job.duration,
                job.responsibilities.join(", ")
            ));
        }
        out
    } else if has("education") {
        let mut out = String::from("Here is my education background:\n");
        for edu in &portfolio.education {
            out.push_str(&format!(
                "- {} from {} ({})\n",
                edu.degree, edu.institute, edu.duration
            ));
        }
        out
    } else if has("projects") {
        let mut out = String::from("Here are some of my projects:\n");
        for project in &portfolio.projects {
            out.push_str(&format!("- {}: {}\n", project.title, project.description));
        }
        out
    } else if has("contact") {
        format!(
            "You can contact me at {} or {}",
            portfolio.contact_email, portfolio.contact_phone
        )
    } else {
        format!(
            "I can answer questions about {}'s skills, experience, education, and projects. \
             Please try asking something like 'What are your skills?'",
            portfolio.first_name()
        )
    }
}

/// One line per skill category, e.g. ` Programming Languages:- Python, SQL`.
fn skills_summary(portfolio: &Portfolio) -> String {
    portfolio
        .skills
        .iter()
        .map(|category| {
            format!(
                " {}:- {}",
                category.name,
                category.skills.iter().map(|s| s.name.as_str()).join(", ")
            )
        })
        .join("\n")
}

/// Epoch of the chat session when a reply was scheduled. A reply whose token
/// no longer matches the session epoch is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancellationToken(u64);

#[derive(Clone, Debug)]
struct PendingReply {
    prompt: String,
    due_at: u64,
    token: CancellationToken,
}

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Transient conversation of one visitor. Nothing here is persisted.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    suggestions: Vec<String>,
    pending: VecDeque<PendingReply>,
    epoch: u64,
    next_id: u64,
    /// Oldest bubbles are dropped beyond this many.
    history_limit: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ChatSession {
    pub fn new(history_limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            suggestions: Vec::new(),
            pending: VecDeque::new(),
            epoch: 0,
            next_id: 1,
            history_limit: history_limit.max(1),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Replies still due to be delivered.
    pub fn pending(&self) -> usize {
        let current = self.token();
        self.pending.iter().filter(|r| r.token == current).count()
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken(self.epoch)
    }

    pub fn show_suggestions(&mut self) {
        self.suggestions = SUGGESTED_QUESTIONS.clone();
    }

    /// Appends the user bubble and queues the bot reply `delay` from `now`.
    pub fn send(&mut self, text: &str, now: u64, delay: Duration) -> Result<ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = self.append(text.to_string(), Roles::User, now);
        self.suggestions.clear();
        self.pending.push_back(PendingReply {
            prompt: text.to_string(),
            due_at: now.saturating_add(delay.as_nanos() as u64),
            token: self.token(),
        });
        Ok(message)
    }

    /// Invalidates every reply scheduled so far. Returns how many were dropped.
    pub fn cancel_pending(&mut self) -> usize {
        let current = self.token();
        let dropped = self.pending.iter().filter(|r| r.token == current).count();
        self.epoch += 1;
        dropped
    }

    /// Appends bot replies whose delay has elapsed, in the order they were
    /// scheduled. Stops at the first reply that is not yet due.
    pub fn deliver_due(&mut self, now: u64, portfolio: &Portfolio) -> Vec<ChatMessage> {
        let mut delivered = Vec::new();
        while let Some(front) = self.pending.front() {
            if front.due_at > now {
                break;
            }
            let Some(reply) = self.pending.pop_front() else {
                break;
            };
            if reply.token != self.token() {
                continue;
            }
            let content = get_bot_response(&reply.prompt, portfolio);
            delivered.push(self.append(content, Roles::Bot, now));
        }
        delivered
    }

    fn append(&mut self, content: String, role: Roles, now: u64) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_id,
            content,
            timestamp: now,
            role,
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        if self.messages.len() > self.history_limit {
            let excess = self.messages.len() - self.history_limit;
            self.messages.drain(..excess);
        }
        message
    }
}

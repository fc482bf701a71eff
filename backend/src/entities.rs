use std::cell::RefCell;

use candid::CandidType;
use ic_stable_structures::{
    memory_manager::{MemoryId, MemoryManager, VirtualMemory},
    storable::Bound,
    DefaultMemoryImpl, Memory, StableBTreeMap, Storable,
};
use serde::{Deserialize, Serialize};

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AboutMe {
    pub description: String,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub duration: String,
    pub method: String,
}

/// One entry of the ordered category -> skills mapping.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub location: String,
    pub responsibilities: Vec<String>,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Education {
    pub degree: String,
    pub institute: String,
    pub duration: String,
    pub percentage: String,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub technologies: String,
    pub description: String,
    pub link: Option<String>,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Certification {
    pub title: String,
    pub platform: String,
    pub date: String,
    pub cert_id: Option<String>,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub name: String,
    pub icon: String,
    pub url: String,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResearchPaper {
    pub title: String,
    pub authors: String,
    pub publication: String,
    pub link: Option<String>,
}

/// Everything the page shows about its owner. Read-only once installed.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Portfolio {
    pub name: String,
    pub title_roles: Vec<String>,
    pub location: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub about_me: AboutMe,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<Job>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub social_media: Vec<SocialLink>,
    pub video_resume_url: String,
    pub research_papers: Option<Vec<ResearchPaper>>,
}

impl Portfolio {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown on the toggle button: the theme one would switch to.
    pub fn glyph(self) -> &'static str {
        match self {
            Theme::Light => "☽",
            Theme::Dark => "☀",
        }
    }
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Roles {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

impl Roles {
    pub fn css_class(&self) -> &'static str {
        match *self {
            Roles::User => "user-message",
            Roles::Bot => "bot-message",
        }
    }
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub timestamp: u64,
    pub role: Roles,
}

impl Storable for Theme {
    fn to_bytes(&self) -> std::borrow::Cow<[u8]> {
        let mut encoded = Vec::new();
        ciborium::into_writer(self, &mut encoded).unwrap();
        std::borrow::Cow::Owned(encoded)
    }

    fn from_bytes(bytes: std::borrow::Cow<[u8]>) -> Self {
        ciborium::from_reader(bytes.as_ref()).unwrap()
    }
    const BOUND: Bound = Bound::Unbounded;
}

type Memo = VirtualMemory<DefaultMemoryImpl>;

const PREFERENCE_MEMORY_ID: MemoryId = MemoryId::new(0);

pub const THEME_KEY: &str = "theme";

pub trait Repository<K, E> {
    fn get(&self, key: &K) -> Option<E>;
    fn insert(&self, key: K, value: E) -> Option<E>;
}

/// Durable preference map. The only state that outlives a page load.
pub struct PreferenceStore<M: Memory> {
    map: RefCell<StableBTreeMap<String, Theme, M>>,
}

impl<M: Memory> PreferenceStore<M> {
    pub fn init(memory: M) -> Self {
        Self {
            map: RefCell::new(StableBTreeMap::init(memory)),
        }
    }

    pub fn theme_key(owner: &str) -> String {
        format!("{owner}:{THEME_KEY}")
    }

    pub fn theme(&self, owner: &str) -> Option<Theme> {
        self.get(&Self::theme_key(owner))
    }

    pub fn save_theme(&self, owner: &str, theme: Theme) {
        self.insert(Self::theme_key(owner), theme);
    }

    #[cfg(test)]
    fn len(&self) -> u64 {
        self.map.borrow().len()
    }
}

impl<M: Memory> Repository<String, Theme> for PreferenceStore<M> {
    fn get(&self, key: &String) -> Option<Theme> {
        self.map.borrow().get(key)
    }

    fn insert(&self, key: String, value: Theme) -> Option<Theme> {
        self.map.borrow_mut().insert(key, value)
    }
}

thread_local! {
    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> = RefCell::new(
        MemoryManager::init(DefaultMemoryImpl::default())
    );

    pub static PREFERENCES: PreferenceStore<Memo> = PreferenceStore::init(
        MEMORY_MANAGER.with_borrow(|m| m.get(PREFERENCE_MEMORY_ID))
    );
}

//! Turns the portfolio record into DOM patches, one region at a time.
//!
//! Every region is rendered once, append-only, in declaration order. The
//! element ids are the contract with the surrounding markup.

use candid::CandidType;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::dom::{Element, Node};
use crate::entities::{
    Certification, Education, Job, Portfolio, Project, ResearchPaper, SkillCategory, SocialLink,
};
use crate::service::config::Settings;

pub mod ids {
    pub const HERO_NAME: &str = "hero-name";
    pub const HERO_TITLE_ROLES: &str = "hero-title-roles";
    pub const HERO_SOCIALS: &str = "hero-socials";
    pub const ABOUT_ME: &str = "about-me-description";
    pub const EDUCATION: &str = "education-list";
    pub const VIDEO_RESUME: &str = "video-resume-iframe";
    pub const SKILLS: &str = "skills-grid";
    pub const EXPERIENCE: &str = "experience-list";
    pub const PROJECTS: &str = "projects-list";
    pub const RESEARCH_PAPERS: &str = "research-papers-list";
    pub const CERTIFICATIONS: &str = "certifications-list";
    pub const CONTACT_LOCATION: &str = "contact-location";
    pub const CONTACT_EMAIL: &str = "contact-email";
    pub const CONTACT_EMAIL_LINK: &str = "contact-email-link";
    pub const CONTACT_PHONE: &str = "contact-phone";
    pub const CONTACT_SOCIALS: &str = "contact-socials";
    pub const FOOTER_SOCIALS: &str = "footer-socials";
    pub const FOOTER_YEAR: &str = "footer-year";
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Patch {
    SetTitle(String),
    SetText {
        target: String,
        text: String,
    },
    SetAttribute {
        target: String,
        name: String,
        value: String,
    },
    Append {
        target: String,
        nodes: Vec<Node>,
    },
}

impl Patch {
    fn text(target: &str, text: impl Into<String>) -> Self {
        Patch::SetText {
            target: target.to_string(),
            text: text.into(),
        }
    }

    fn attribute(target: &str, name: &str, value: impl Into<String>) -> Self {
        Patch::SetAttribute {
            target: target.to_string(),
            name: name.to_string(),
            value: value.into(),
        }
    }

    fn append(target: &str, nodes: Vec<Node>) -> Self {
        Patch::Append {
            target: target.to_string(),
            nodes,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Patch::SetTitle(_) => None,
            Patch::SetText { target, .. }
            | Patch::SetAttribute { target, .. }
            | Patch::Append { target, .. } => Some(target.as_str()),
        }
    }
}

/// Builds the whole page. An absent record leaves the page unpopulated.
pub fn render_page(portfolio: Option<&Portfolio>, settings: &Settings, year: i32) -> Vec<Patch> {
    let Some(p) = portfolio else {
        return Vec::new();
    };

    let mut patches = vec![
        Patch::SetTitle(format!("{} - Portfolio", p.name)),
        Patch::text(ids::HERO_NAME, &p.name),
        Patch::text(ids::HERO_TITLE_ROLES, p.title_roles.join(" & ")),
        render_socials(ids::HERO_SOCIALS, &p.social_media),
        Patch::text(ids::ABOUT_ME, &p.about_me.description),
        Patch::append(ids::EDUCATION, render_education(&p.education)),
        Patch::attribute(ids::VIDEO_RESUME, "src", &p.video_resume_url),
        Patch::append(ids::SKILLS, p.skills.iter().map(render_skill_category).collect()),
        Patch::append(ids::EXPERIENCE, p.experience.iter().map(render_job).collect()),
        Patch::append(
            ids::PROJECTS,
            p.projects.iter().map(|pr| render_project(pr, settings)).collect(),
        ),
    ];

    if let Some(papers) = p.research_papers.as_ref().filter(|papers| !papers.is_empty()) {
        patches.push(Patch::append(
            ids::RESEARCH_PAPERS,
            papers.iter().map(render_paper).collect(),
        ));
    }

    patches.extend([
        Patch::append(
            ids::CERTIFICATIONS,
            p.certifications.iter().map(render_certification).collect(),
        ),
        Patch::text(ids::CONTACT_LOCATION, &p.location),
        Patch::text(ids::CONTACT_EMAIL, &p.contact_email),
        Patch::attribute(
            ids::CONTACT_EMAIL_LINK,
            "href",
            format!("mailto:{}", p.contact_email),
        ),
        Patch::text(ids::CONTACT_PHONE, &p.contact_phone),
        render_socials(ids::CONTACT_SOCIALS, &p.social_media),
        render_socials(ids::FOOTER_SOCIALS, &p.social_media),
        Patch::text(ids::FOOTER_YEAR, year.to_string()),
    ]);
    patches
}

/// Social icon links for one insertion point. Each call builds fresh nodes.
pub fn render_socials(target: &str, links: &[SocialLink]) -> Patch {
    let nodes = links
        .iter()
        .map(|social| {
            let link = Element::new("a")
                .class("social-icon glass-effect")
                .attr("href", &social.url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .attr("aria-label", &social.name)
                .child(Element::new("i").class(&social.icon));
            Node::from(link)
        })
        .collect();
    Patch::append(target, nodes)
}

fn render_education(entries: &[Education]) -> Vec<Node> {
    entries
        .iter()
        .map(|edu| {
            vec![
                Node::from(Element::new("p").child(Element::new("strong").text(&edu.degree))),
                Node::from(
                    Element::new("p").text(format!("{} ({})", edu.institute, edu.duration)),
                ),
                Node::from(Element::new("p").text(&edu.percentage)),
            ]
        })
        .intersperse_with(|| vec![Node::from(Element::new("br"))])
        .flatten()
        .collect()
}

fn render_skill_category(category: &SkillCategory) -> Node {
    let cards = category.skills.iter().map(|skill| {
        let front = Element::new("div")
            .class("skill-card-front")
            .child(Element::new("i").class(&skill.icon))
            .child(Element::new("span").text(&skill.name));
        let back = Element::new("div")
            .class("skill-card-back")
            .text(&skill.description);
        Element::new("div").class("skill-card").child(
            Element::new("div")
                .class("skill-card-inner")
                .child(front)
                .child(back),
        )
    });

    Element::new("div")
        .class("skill-category")
        .child(Element::new("h3").text(&category.name))
        .child(Element::new("div").class("category-cards").children(cards))
        .into()
}

fn render_job(job: &Job) -> Node {
    let header = Element::new("div")
        .class("experience-card-header")
        .child(Element::new("span").class("experience-role").text(&job.role))
        .child(
            Element::new("span")
                .class("experience-company")
                .text(&job.company),
        );
    let meta = Element::new("div")
        .class("experience-meta")
        .text(format!("{} | {}", job.duration, job.location));
    let responsibilities = Element::new("ul")
        .class("experience-responsibilities")
        .children(
            job.responsibilities
                .iter()
                .map(|r| Element::new("li").text(r)),
        );

    Element::new("div")
        .class("experience-card glass-effect")
        .child(header)
        .child(meta)
        .child(responsibilities)
        .into()
}

fn action_link(href: &str, class: &str, label: &str) -> Element {
    Element::new("a")
        .class(class)
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .text(label)
}

fn render_project(project: &Project, settings: &Settings) -> Node {
    let header = Element::new("div")
        .class("project-header")
        .child(
            Element::new("span")
                .class("project-title")
                .text(&project.title),
        )
        .child(
            Element::new("span")
                .class("project-tech")
                .text(&project.technologies),
        );
    let links = Element::new("div")
        .class("project-links")
        .child(action_link(
            &settings.project_demo_url,
            "btn primary-btn glass-effect",
            "Live Demo",
        ))
        .child(action_link(
            &settings.project_source_url,
            "btn secondary-btn glass-effect",
            "Source Code",
        ));

    Element::new("div")
        .class("project-card glass-effect")
        .child(header)
        .child(
            Element::new("div")
                .class("project-desc")
                .text(&project.description),
        )
        .child(links)
        .into()
}

fn labelled(label: &str, value: &str) -> Element {
    Element::new("p")
        .child(Element::new("strong").text(label))
        .text(format!(" {value}"))
}

fn render_paper(paper: &ResearchPaper) -> Node {
    let mut card = Element::new("div")
        .class("research-paper-card glass-effect")
        .child(Element::new("h3").text(&paper.title))
        .child(labelled("Authors:", &paper.authors))
        .child(labelled("Publication:", &paper.publication));
    if let Some(link) = &paper.link {
        card = card.child(
            Element::new("div")
                .class("research-paper-links")
                .child(action_link(link, "btn primary-btn glass-effect", "Read Paper")),
        );
    }
    card.into()
}

fn render_certification(cert: &Certification) -> Node {
    let mut card = Element::new("div")
        .class("certification-card glass-effect")
        .child(Element::new("h3").text(&cert.title))
        .child(labelled("Platform:", &cert.platform))
        .child(labelled("Date:", &cert.date));
    if let Some(id) = &cert.cert_id {
        card = card.child(labelled("Cert ID:", id));
    }
    card.into()
}

/// Serialized children of every append patch, keyed by target id.
pub fn fragments(patches: &[Patch]) -> Vec<(String, String)> {
    patches
        .iter()
        .filter_map(|patch| match patch {
            Patch::Append { target, nodes } => Some((
                target.clone(),
                nodes.iter().map(Node::to_html).collect::<String>(),
            )),
            _ => None,
        })
        .collect()
}

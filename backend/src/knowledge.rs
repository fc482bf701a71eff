use crate::entities::{
    AboutMe, Certification, Education, Job, Portfolio, Project, ResearchPaper, Skill,
    SkillCategory, SocialLink,
};
use lazy_static::lazy_static;

pub const GREETING: &str = "Hello! How can I help you today?";

pub const REQUIRED_FIELD: &str = "This field is required.";

lazy_static! {
    /// Prompts offered when the chat window opens.
    pub static ref SUGGESTED_QUESTIONS: Vec<String> = vec![
        "Tell me about yourself".to_string(),
        "What are your skills?".to_string(),
        "What is your experience?".to_string(),
        "Tell me about your projects".to_string(),
    ];

    pub static ref PORTFOLIO: Portfolio = default_portfolio();
}

fn skill(name: &str, icon: &str, description: &str, duration: &str, method: &str) -> Skill {
    Skill {
        name: name.into(),
        icon: icon.into(),
        description: description.into(),
        duration: duration.into(),
        method: method.into(),
    }
}

fn social(name: &str, icon: &str, url: &str) -> SocialLink {
    SocialLink {
        name: name.into(),
        icon: icon.into(),
        url: url.into(),
    }
}

fn education(degree: &str, institute: &str, duration: &str, percentage: &str) -> Education {
    Education {
        degree: degree.into(),
        institute: institute.into(),
        duration: duration.into(),
        percentage: percentage.into(),
    }
}

fn certification(title: &str, platform: &str, date: &str, cert_id: &str) -> Certification {
    Certification {
        title: title.into(),
        platform: platform.into(),
        date: date.into(),
        cert_id: Some(cert_id.into()),
    }
}

fn default_portfolio() -> Portfolio {
    Portfolio {
        name: "Abhijeet Singh".into(),
        title_roles: vec!["MCA (AI/ML) Student".into(), "Full-Stack Python Developer".into()],
        location: "Maihar, Madhya Pradesh, India".into(),
        contact_email: "abhijeetsingh20010@gmail.com".into(),
        contact_phone: "+91 7999809954".into(),
        about_me: AboutMe {
            description: "I am an MCA (AI/ML) student passionate about building practical solutions with technology. I have experience in Python, Data Analysis, and web development, demonstrated by my Cryptocurrency trading project and a successful internship. I am looking for an opportunity to contribute to a team and grow my technical skills.".into(),
        },
        skills: vec![
            SkillCategory {
                name: "Programming Languages".into(),
                skills: vec![
                    skill(
                        "Python",
                        "fa-brands fa-python",
                        "A versatile language for web development, data science, and AI.",
                        "4+ years",
                        "Self-taught, Academic",
                    ),
                    skill(
                        "SQL",
                        "fa-solid fa-database",
                        "For managing and querying relational databases.",
                        "2 years",
                        "Academic",
                    ),
                    skill(
                        "HTML/CSS",
                        "fa-brands fa-html5",
                        "The building blocks of web pages.",
                        "3 years",
                        "Projects",
                    ),
                    skill(
                        "JavaScript",
                        "fa-brands fa-js",
                        "For creating interactive web experiences.",
                        "2 years",
                        "Projects",
                    ),
                ],
            },
            SkillCategory {
                name: "Technologies & Tools".into(),
                skills: vec![
                    skill(
                        "GitHub",
                        "fa-brands fa-github",
                        "For version control and collaboration.",
                        "2 years",
                        "Projects",
                    ),
                    skill(
                        "AWS",
                        "fa-brands fa-aws",
                        "Amazon Web Services for cloud computing.",
                        "1 year",
                        "Internship, Certification",
                    ),
                    skill(
                        "DevOps",
                        "fa-solid fa-gears",
                        "Practices for automating software development and IT operations.",
                        "1 year",
                        "Internship",
                    ),
                    skill(
                        "Linux",
                        "fa-brands fa-linux",
                        "A popular open-source operating system.",
                        "2 years",
                        "Academic, Projects",
                    ),
                    skill(
                        "Jupyter",
                        "fa-solid fa-book",
                        "For interactive computing and data science.",
                        "2 years",
                        "Academic, Projects",
                    ),
                ],
            },
            SkillCategory {
                name: "AI/ML & Data Science".into(),
                skills: vec![
                    skill(
                        "Pandas",
                        "fa-solid fa-table",
                        "A Python library for data manipulation and analysis.",
                        "2 years",
                        "Academic, Projects",
                    ),
                    skill(
                        "NumPy",
                        "fa-solid fa-square-root-variable",
                        "A fundamental package for scientific computing in Python.",
                        "2.5 years",
                        "Academic, Projects",
                    ),
                    skill(
                        "Scikit-learn",
                        "fa-solid fa-brain",
                        "A machine learning library for Python.",
                        "1 year",
                        "Academic, Projects",
                    ),
                    skill(
                        "TensorFlow",
                        "fa-brands fa-tensorflow",
                        "An open-source platform for machine learning.",
                        "1 year",
                        "Academic",
                    ),
                ],
            },
        ],
        experience: vec![
            Job {
                role: "Student Intern".into(),
                company: "Rostris Infotec Ltd.".into(),
                duration: "Jan 2024 - Mar 2024".into(),
                location: "Pune, India".into(),
                responsibilities: vec![
                    "Developed hands-on projects utilizing Linux, Python, DevOps, and AWS Cloud Technology.".into(),
                    "Completed a student project using Python, which increased the team's project completion speed by 25%.".into(),
                    "Encouraged team members to work together, improving the group's problem-solving ability by 30%.".into(),
                    "Organized workshops on new technologies, which increased student participation by 40%.".into(),
                ],
            },
        ],
        education: vec![
            education(
                "Master of Computer Applications (AI/ML)",
                "Amity University Online",
                "2024 - 2026",
                "CGPA: 7.9",
            ),
            education(
                "Bachelor of Computer Applications (Honours)",
                "AKS University, Satna",
                "2021 - 2024",
                "CGPA: 5.7",
            ),
            education(
                "Higher Secondary Education",
                "Gyan Vihar Vidyapeeth (CBSE)",
                "2020 – 2021",
                "49.8%",
            ),
            education(
                "Secondary Education",
                "Gyan Vihar Vidyapeeth (CBSE)",
                "2018 - 2019",
                "41%",
            ),
        ],
        projects: vec![
            Project {
                title: "Cryptofix-Trading".into(),
                technologies: "HTML, CSS, JavaScript, REST API".into(),
                description: "Developed a responsive website to display live Cryptocurrency prices by integrating a third-party REST API. Used JavaScript to fetch and dynamically display the live data from the API. Designed a clean and user-friendly interface using HTML and CSS for a smooth user experience.".into(),
                link: Some("#".into()),
            },
        ],
        certifications: vec![
            certification(
                "AWS Cloud Practitioner & DevOps (Internship Completion)",
                "Rostris Infotech, Pune",
                "Jan–Mar 2024",
                "A-24-3918",
            ),
            certification(
                "Certificate Course in Basic Mathematics",
                "Amity University Online",
                "Dec 2024",
                "Zw5adTGWVH",
            ),
            certification(
                "Certificate in Certificate Course in Basic of AI",
                "Amity University Online",
                "September 2025",
                "tfGNOlvkMp",
            ),
        ],
        social_media: vec![
            social("GitHub", "fa-brands fa-github", "https://github.com/aabhijeetsingh"),
            social("LinkedIn", "fa-brands fa-linkedin-in", "https://www.linkedin.com/in/abhijeet-singh-a66b5a215"),
            social("Instagram", "fa-brands fa-instagram", "https://www.instagram.com/aabhijeett___/"),
            social("WhatsApp", "fa-brands fa-whatsapp", "https://wa.me/917999809954"),
            social("Email", "fa-solid fa-envelope", "mailto:abhijeetsingh20010@gmail.com"),
        ],
        video_resume_url: "https://www.youtube.com/embed/sN9HgBJ7BRk?si=huumb0bWLDSkf2O5".into(),
        research_papers: Some(vec![
            ResearchPaper {
                title: "A Comprehensive Review of Machine Learning Techniques for Cyber Security".into(),
                authors: "Abhijeet Singh, et al.".into(),
                publication: "IEEE Transactions on Artificial Intelligence, 2025".into(),
                link: Some("#".into()),
            },
        ]),
    }
}

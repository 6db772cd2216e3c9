//! Builtin documents served before the owner has saved anything.

use serde_json::{json, Value};

use super::SectionName;

pub fn default_document(name: SectionName) -> Value {
    match name {
        SectionName::Hero => json!({
            "greeting": "Hi, I'm",
            "name": "Your Name",
            "roles": ["Software Engineer", "Open Source Contributor"],
            "description": "I build reliable software and enjoy turning hard problems into simple tools.",
            "profileImage": "/images/profile.jpg",
            "cta": [
                {"label": "View Projects", "href": "#projects"},
                {"label": "Contact Me", "href": "#contact"}
            ]
        }),
        SectionName::About => json!({
            "title": "About Me",
            "subtitle": "A little about who I am and what I do",
            "paragraphs": [
                "I am a software engineer focused on backend systems and developer tooling.",
                "Outside of work I contribute to open source and write about what I learn."
            ],
            "stats": [
                {"value": "5+", "label": "Years Experience"},
                {"value": "20+", "label": "Projects Completed"},
                {"value": "10+", "label": "Technologies"}
            ],
            "image": "/images/about.jpg"
        }),
        SectionName::Skills => json!({
            "title": "Skills",
            "subtitle": "Technologies I work with",
            "categories": [
                {
                    "name": "Languages",
                    "skills": [
                        {"name": "Rust", "level": 85},
                        {"name": "TypeScript", "level": 80},
                        {"name": "Python", "level": 75}
                    ]
                },
                {
                    "name": "Tools",
                    "skills": [
                        {"name": "PostgreSQL", "level": 75},
                        {"name": "Docker", "level": 70},
                        {"name": "Git", "level": 90}
                    ]
                }
            ]
        }),
        SectionName::Projects => json!({
            "title": "Projects",
            "subtitle": "Things I have built",
            "projects": [
                {
                    "title": "Portfolio",
                    "description": "This site: a public portfolio with an admin editor.",
                    "image": "/images/projects/portfolio.png",
                    "tags": ["Rust", "axum", "PostgreSQL"],
                    "githubUrl": "https://github.com/",
                    "liveUrl": null,
                    "featured": true
                }
            ]
        }),
        SectionName::Contact => json!({
            "title": "Get In Touch",
            "subtitle": "My inbox is always open",
            "email": "hello@example.com",
            "phone": "",
            "location": "Remote",
            "socials": [
                {"platform": "github", "url": "https://github.com/"},
                {"platform": "linkedin", "url": "https://www.linkedin.com/"}
            ]
        }),
        SectionName::Footer => json!({
            "copyright": "© Your Name. All rights reserved.",
            "tagline": "Built with care.",
            "links": [
                {"platform": "github", "url": "https://github.com/"},
                {"platform": "email", "url": "mailto:hello@example.com"}
            ]
        }),
        SectionName::Resume => json!({
            "url": "/resume.pdf",
            "fileName": "resume.pdf",
            "label": "Download Resume"
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::schema;

    #[test]
    fn every_default_matches_its_schema() {
        for name in SectionName::ALL {
            let doc = default_document(name);
            schema::validate(name, &doc).unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }
}

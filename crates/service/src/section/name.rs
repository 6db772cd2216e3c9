use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// The fixed set of content sections the site renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    Hero,
    About,
    Skills,
    Projects,
    Contact,
    Footer,
    Resume,
}

impl SectionName {
    pub const ALL: [SectionName; 7] = [
        SectionName::Hero,
        SectionName::About,
        SectionName::Skills,
        SectionName::Projects,
        SectionName::Contact,
        SectionName::Footer,
        SectionName::Resume,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::Hero => "hero",
            SectionName::About => "about",
            SectionName::Skills => "skills",
            SectionName::Projects => "projects",
            SectionName::Contact => "contact",
            SectionName::Footer => "footer",
            SectionName::Resume => "resume",
        }
    }

    /// Path segment used by the HTTP API, e.g. `hero-data`.
    pub fn slug(self) -> String {
        format!("{}-data", self.as_str())
    }

    /// Parse an API path segment such as `about-data`.
    pub fn from_slug(slug: &str) -> Option<Self> {
        slug.strip_suffix("-data").and_then(|name| name.parse().ok())
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ServiceError::not_found(&format!("section `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_parsing() {
        for name in SectionName::ALL {
            assert_eq!(SectionName::from_slug(&name.slug()), Some(name));
        }
        assert_eq!(SectionName::from_slug("hero"), None);
        assert_eq!(SectionName::from_slug("blog-data"), None);
        assert_eq!(SectionName::from_slug("Hero-data"), None);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = "gallery".parse::<SectionName>().unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}

//! Typed shapes of the section documents.
//!
//! Every field is optional on the wire: missing or `null` fields take their
//! default and unknown fields are ignored. `validate` only rejects documents
//! that are not objects or whose fields hold the wrong kind of JSON value
//! (a string where a list belongs). Content rules such as a skill level above
//! 100 are reported as warnings and never block a write.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::SectionName;
use crate::errors::ServiceError;

/// A typed document bound to one section name.
pub trait SectionDocument: Serialize + DeserializeOwned + Send + Sync {
    const NAME: SectionName;

    /// Content the editor probably did not mean to save.
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSection {
    pub greeting: String,
    pub name: String,
    pub roles: Vec<String>,
    pub description: String,
    pub profile_image: String,
    pub cta: Vec<Link>,
}

impl SectionDocument for HeroSection {
    const NAME: SectionName = SectionName::Hero;
}

/// Stats are shown as typed ("5+", "3") or numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl Default for StatValue {
    fn default() -> Self {
        StatValue::Text(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stat {
    pub value: StatValue,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutSection {
    pub title: String,
    pub subtitle: String,
    pub paragraphs: Vec<String>,
    pub stats: Vec<Stat>,
    pub image: String,
}

impl SectionDocument for AboutSection {
    const NAME: SectionName = SectionName::About;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent.
    pub level: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillsSection {
    pub title: String,
    pub subtitle: String,
    pub categories: Vec<SkillCategory>,
}

impl SectionDocument for SkillsSection {
    const NAME: SectionName = SectionName::Skills;

    fn warnings(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter())
            .filter(|s| s.level.is_some_and(|l| !(0.0..=100.0).contains(&l)))
            .map(|s| format!("skill `{}` level is outside 0..=100", s.name))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectsSection {
    pub title: String,
    pub subtitle: String,
    pub projects: Vec<Project>,
}

impl SectionDocument for ProjectsSection {
    const NAME: SectionName = SectionName::Projects;

    fn warnings(&self) -> Vec<String> {
        self.projects
            .iter()
            .enumerate()
            .filter(|(_, p)| p.title.trim().is_empty())
            .map(|(i, _)| format!("project #{} has no title", i + 1))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSection {
    pub title: String,
    pub subtitle: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub socials: Vec<SocialLink>,
}

impl SectionDocument for ContactSection {
    const NAME: SectionName = SectionName::Contact;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterSection {
    pub copyright: String,
    pub tagline: String,
    pub links: Vec<SocialLink>,
}

impl SectionDocument for FooterSection {
    const NAME: SectionName = SectionName::Footer;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeSection {
    pub url: String,
    pub file_name: String,
    pub label: String,
}

impl SectionDocument for ResumeSection {
    const NAME: SectionName = SectionName::Resume;
}

/// Copy of `value` with every `null` dropped, so it reads as "unset".
fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().filter(|v| !v.is_null()).map(without_nulls).collect()),
        other => other.clone(),
    }
}

fn check_as<T: SectionDocument>(value: &Value) -> Result<(), ServiceError> {
    let doc = T::deserialize(without_nulls(value))
        .map_err(|e| ServiceError::Validation(format!("invalid {} document: {e}", T::NAME)))?;
    let name = T::NAME;
    for w in doc.warnings() {
        warn!(section = %name, "{w}");
    }
    Ok(())
}

/// Check a raw JSON document against the shape of section `name`.
pub fn validate(name: SectionName, value: &Value) -> Result<(), ServiceError> {
    if !value.is_object() {
        return Err(ServiceError::Validation(format!("{name} document must be a JSON object")));
    }
    match name {
        SectionName::Hero => check_as::<HeroSection>(value),
        SectionName::About => check_as::<AboutSection>(value),
        SectionName::Skills => check_as::<SkillsSection>(value),
        SectionName::Projects => check_as::<ProjectsSection>(value),
        SectionName::Contact => check_as::<ContactSection>(value),
        SectionName::Footer => check_as::<FooterSection>(value),
        SectionName::Resume => check_as::<ResumeSection>(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_documents_pass() {
        validate(SectionName::Hero, &json!({"name": "Ada", "roles": ["Engineer"]})).unwrap();
        validate(SectionName::About, &json!({})).unwrap();
        validate(SectionName::Contact, &json!({"email": "a@b.c", "extra": true})).unwrap();
    }

    #[test]
    fn wrong_types_rejected() {
        let err = validate(SectionName::Hero, &json!({"roles": "Engineer"})).unwrap_err();
        assert!(err.to_string().contains("hero"));
        assert!(validate(SectionName::Skills, &json!({"categories": {}})).is_err());
        assert!(validate(SectionName::Resume, &json!(["cv.pdf"])).is_err());
        assert!(validate(SectionName::Footer, &json!("footer")).is_err());
    }

    #[test]
    fn stat_values_accept_numbers_and_text() {
        let about: AboutSection = serde_json::from_value(json!({
            "stats": [{"value": 5, "label": "Years"}, {"value": "20+", "label": "Projects"}]
        }))
        .unwrap();
        assert_eq!(about.stats[0].value, StatValue::Number(5.0));
        assert_eq!(about.stats[1].value, StatValue::Text("20+".into()));
    }

    #[test]
    fn null_fields_read_as_unset() {
        validate(SectionName::Hero, &json!({"name": "Ada", "profileImage": null, "roles": [null, "Engineer"]})).unwrap();
        validate(SectionName::About, &json!({"stats": [{"value": null, "label": "Years"}]})).unwrap();
        validate(SectionName::Projects, &json!({"projects": [{"title": "Site", "githubUrl": null}]})).unwrap();
    }

    #[test]
    fn fractional_skill_levels_pass() {
        let doc = json!({"categories": [{"name": "Lang", "skills": [{"name": "Rust", "level": 87.5}]}]});
        validate(SectionName::Skills, &doc).unwrap();
        let skills: SkillsSection = serde_json::from_value(doc).unwrap();
        assert_eq!(skills.categories[0].skills[0].level, Some(87.5));
    }

    #[test]
    fn content_rules_warn_without_rejecting() {
        let high = json!({"categories": [{"name": "Lang", "skills": [{"name": "Rust", "level": 120}]}]});
        validate(SectionName::Skills, &high).unwrap();
        let skills: SkillsSection = serde_json::from_value(high).unwrap();
        assert_eq!(skills.warnings().len(), 1);

        let untitled = json!({"projects": [{"title": "Site"}, {"title": ""}]});
        validate(SectionName::Projects, &untitled).unwrap();
        let projects: ProjectsSection = serde_json::from_value(untitled).unwrap();
        assert_eq!(projects.warnings(), vec!["project #2 has no title".to_string()]);
    }
}

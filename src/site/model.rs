//! Site configuration records: the complete form and the partial persisted form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact links shown in the footer and contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub github: String,
    pub linkedin: String,
}

/// Fully resolved site configuration. Every field is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfiguration {
    pub site_title: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
    pub features_title: String,
    pub features_description: String,
    pub about_card_title: String,
    pub about_card_description: String,
    pub blog_card_title: String,
    pub blog_card_description: String,
    pub cta_title: String,
    pub cta_description: String,
    pub footer_description: String,
    pub tech_stack: Vec<String>,
    pub contact_info: ContactInfo,

    /// Last write time of the persisted record, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Site configuration as persisted. Any field may be missing or null.
///
/// Absent fields are skipped on serialization so a verbatim write keeps them absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialSiteConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_card_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_card_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_card_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_card_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<PartialContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&SiteConfiguration> for PartialSiteConfiguration {
    fn from(config: &SiteConfiguration) -> Self {
        Self {
            site_title: Some(config.site_title.clone()),
            hero_title: Some(config.hero_title.clone()),
            hero_subtitle: Some(config.hero_subtitle.clone()),
            hero_description: Some(config.hero_description.clone()),
            features_title: Some(config.features_title.clone()),
            features_description: Some(config.features_description.clone()),
            about_card_title: Some(config.about_card_title.clone()),
            about_card_description: Some(config.about_card_description.clone()),
            blog_card_title: Some(config.blog_card_title.clone()),
            blog_card_description: Some(config.blog_card_description.clone()),
            cta_title: Some(config.cta_title.clone()),
            cta_description: Some(config.cta_description.clone()),
            footer_description: Some(config.footer_description.clone()),
            tech_stack: Some(config.tech_stack.clone()),
            contact_info: Some(PartialContactInfo {
                email: Some(config.contact_info.email.clone()),
                github: Some(config.contact_info.github.clone()),
                linkedin: Some(config.contact_info.linkedin.clone()),
            }),
            updated_at: config.updated_at,
        }
    }
}

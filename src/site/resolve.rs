//! Merge rules: a partial persisted record over the compiled defaults.
//!
//! - scalar fields fall back individually;
//! - `techStack` falls back when absent or empty (an empty list counts as unset);
//! - `contactInfo` falls back per subfield, never as a whole object.

use crate::site::model::{ContactInfo, PartialSiteConfiguration, SiteConfiguration};

/// Produce a complete configuration from an optional partial record and defaults.
///
/// Total and pure. `resolve(None, d) == d`.
pub fn resolve(
    partial: Option<&PartialSiteConfiguration>,
    defaults: &SiteConfiguration,
) -> SiteConfiguration {
    let Some(p) = partial else {
        return defaults.clone();
    };

    let contact = p.contact_info.as_ref();
    let contact_info = ContactInfo {
        email: pick(contact.and_then(|c| c.email.as_ref()), &defaults.contact_info.email),
        github: pick(contact.and_then(|c| c.github.as_ref()), &defaults.contact_info.github),
        linkedin: pick(
            contact.and_then(|c| c.linkedin.as_ref()),
            &defaults.contact_info.linkedin,
        ),
    };

    let tech_stack = match &p.tech_stack {
        Some(stack) if !stack.is_empty() => stack.clone(),
        _ => defaults.tech_stack.clone(),
    };

    SiteConfiguration {
        site_title: pick(p.site_title.as_ref(), &defaults.site_title),
        hero_title: pick(p.hero_title.as_ref(), &defaults.hero_title),
        hero_subtitle: pick(p.hero_subtitle.as_ref(), &defaults.hero_subtitle),
        hero_description: pick(p.hero_description.as_ref(), &defaults.hero_description),
        features_title: pick(p.features_title.as_ref(), &defaults.features_title),
        features_description: pick(
            p.features_description.as_ref(),
            &defaults.features_description,
        ),
        about_card_title: pick(p.about_card_title.as_ref(), &defaults.about_card_title),
        about_card_description: pick(
            p.about_card_description.as_ref(),
            &defaults.about_card_description,
        ),
        blog_card_title: pick(p.blog_card_title.as_ref(), &defaults.blog_card_title),
        blog_card_description: pick(
            p.blog_card_description.as_ref(),
            &defaults.blog_card_description,
        ),
        cta_title: pick(p.cta_title.as_ref(), &defaults.cta_title),
        cta_description: pick(p.cta_description.as_ref(), &defaults.cta_description),
        footer_description: pick(p.footer_description.as_ref(), &defaults.footer_description),
        tech_stack,
        contact_info,
        updated_at: p.updated_at.or(defaults.updated_at),
    }
}

fn pick(value: Option<&String>, default: &str) -> String {
    value.cloned().unwrap_or_else(|| default.to_string())
}

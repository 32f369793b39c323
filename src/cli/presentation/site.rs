//! Site configuration presentation.

use crate::site::SiteConfiguration;
use owo_colors::OwoColorize;

pub fn format_site_text(config: &SiteConfiguration) -> String {
    let rows: [(&str, &str); 13] = [
        ("siteTitle", config.site_title.as_str()),
        ("heroTitle", config.hero_title.as_str()),
        ("heroSubtitle", config.hero_subtitle.as_str()),
        ("heroDescription", config.hero_description.as_str()),
        ("featuresTitle", config.features_title.as_str()),
        ("featuresDescription", config.features_description.as_str()),
        ("aboutCardTitle", config.about_card_title.as_str()),
        ("aboutCardDescription", config.about_card_description.as_str()),
        ("blogCardTitle", config.blog_card_title.as_str()),
        ("blogCardDescription", config.blog_card_description.as_str()),
        ("ctaTitle", config.cta_title.as_str()),
        ("ctaDescription", config.cta_description.as_str()),
        ("footerDescription", config.footer_description.as_str()),
    ];

    let mut output = format!("{}\n", "Site Configuration".bold().underline());
    for (name, value) in rows {
        // Multi-line values (heroTitle) stay on one row
        output.push_str(&format!("  {:<22} {}\n", name, value.replace('\n', "\\n")));
    }
    output.push_str(&format!("  {:<22} {}\n", "techStack", config.tech_stack.join(", ")));
    output.push_str(&format!("  {:<22} {}\n", "contact.email", config.contact_info.email));
    output.push_str(&format!("  {:<22} {}\n", "contact.github", config.contact_info.github));
    output.push_str(&format!(
        "  {:<22} {}\n",
        "contact.linkedin", config.contact_info.linkedin
    ));
    match config.updated_at {
        Some(at) => output.push_str(&format!("\nLast updated: {}", at.to_rfc3339())),
        None => output.push_str(&format!("\n{}", "Not persisted (defaults)".dimmed())),
    }
    output
}

pub fn format_site_json(config: &SiteConfiguration) -> String {
    serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string())
}

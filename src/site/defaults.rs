//! Compiled-in site defaults.

use crate::site::model::{ContactInfo, SiteConfiguration};

/// The default site configuration, used wherever the persisted record is silent.
pub fn default_site_config() -> SiteConfiguration {
    SiteConfiguration {
        site_title: "ポートフォリオブログ".to_string(),
        hero_title: "就職活動のための\nポートフォリオブログ".to_string(),
        hero_subtitle: "技術と経験を共有し、未来への一歩を踏み出しましょう".to_string(),
        hero_description: "技術と経験を共有し、未来への一歩を踏み出しましょう".to_string(),
        features_title: "私の強み".to_string(),
        features_description: "技術力と創造性を組み合わせたソリューションを提供します"
            .to_string(),
        about_card_title: "自己紹介".to_string(),
        about_card_description: "私の経歴、スキル、そして目標について詳しく紹介します。"
            .to_string(),
        blog_card_title: "ブログ".to_string(),
        blog_card_description: "技術的な学びや経験を共有するブログ記事を書いています。"
            .to_string(),
        cta_title: "一緒に働きませんか？".to_string(),
        cta_description: "新しい機会やプロジェクトについてお話ししましょう".to_string(),
        footer_description: "就職活動のためのポートフォリオサイトです。".to_string(),
        tech_stack: vec![
            "React / Next.js".to_string(),
            "TypeScript".to_string(),
            "Tailwind CSS".to_string(),
            "Node.js".to_string(),
        ],
        contact_info: ContactInfo {
            email: "example@email.com".to_string(),
            github: "github.com/username".to_string(),
            linkedin: "linkedin.com/in/username".to_string(),
        },
        updated_at: None,
    }
}

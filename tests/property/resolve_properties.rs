//! Property-based tests for site resolution and history ordering

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use proptest::prelude::*;
use siteconf::clock::FixedClock;
use siteconf::connection::{ConnectionConfigService, ConnectionFields};
use siteconf::env::MapEnv;
use siteconf::site::{default_site_config, resolve, PartialContactInfo, PartialSiteConfiguration};
use siteconf::store::MemoryDocumentStore;
use std::sync::Arc;

fn opt_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 ]{0,12}")
}

/// Every scalar field comes from the partial record when present, else from the defaults
#[test]
fn test_scalar_fields_prefer_partial_values() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let defaults = default_site_config();

    runner
        .run(
            &(opt_text(), opt_text(), opt_text(), opt_text(), opt_text()),
            |(site_title, hero_title, cta_title, footer, email)| {
                let partial = PartialSiteConfiguration {
                    site_title: site_title.clone(),
                    hero_title: hero_title.clone(),
                    cta_title: cta_title.clone(),
                    footer_description: footer.clone(),
                    contact_info: Some(PartialContactInfo {
                        email: email.clone(),
                        ..Default::default()
                    }),
                    ..Default::default()
                };
                let resolved = resolve(Some(&partial), &defaults);

                prop_assert_eq!(
                    resolved.site_title,
                    site_title.unwrap_or_else(|| defaults.site_title.clone())
                );
                prop_assert_eq!(
                    resolved.hero_title,
                    hero_title.unwrap_or_else(|| defaults.hero_title.clone())
                );
                prop_assert_eq!(
                    resolved.cta_title,
                    cta_title.unwrap_or_else(|| defaults.cta_title.clone())
                );
                prop_assert_eq!(
                    resolved.footer_description,
                    footer.unwrap_or_else(|| defaults.footer_description.clone())
                );
                prop_assert_eq!(
                    resolved.contact_info.email,
                    email.unwrap_or_else(|| defaults.contact_info.email.clone())
                );
                prop_assert_eq!(&resolved.contact_info.github, &defaults.contact_info.github);
                prop_assert_eq!(&resolved.hero_subtitle, &defaults.hero_subtitle);
                Ok(())
            },
        )
        .unwrap();
}

/// A non-empty techStack replaces the default list; an empty or absent one does not
#[test]
fn test_tech_stack_replaces_only_when_non_empty() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let defaults = default_site_config();

    runner
        .run(
            &proptest::option::of(proptest::collection::vec("[a-z]{1,8}", 0..5)),
            |stack| {
                let partial = PartialSiteConfiguration {
                    tech_stack: stack.clone(),
                    ..Default::default()
                };
                let resolved = resolve(Some(&partial), &defaults);
                match stack {
                    Some(items) if !items.is_empty() => prop_assert_eq!(resolved.tech_stack, items),
                    _ => prop_assert_eq!(&resolved.tech_stack, &defaults.tech_stack),
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Resolution is idempotent: resolving a resolved record changes nothing
#[test]
fn test_resolution_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let defaults = default_site_config();

    runner
        .run(&(opt_text(), opt_text()), |(title, linkedin)| {
            let partial = PartialSiteConfiguration {
                about_card_title: title,
                contact_info: Some(PartialContactInfo {
                    linkedin,
                    ..Default::default()
                }),
                ..Default::default()
            };
            let once = resolve(Some(&partial), &defaults);
            let twice = resolve(Some(&PartialSiteConfiguration::from(&once)), &defaults);
            prop_assert_eq!(once, twice);
            Ok(())
        })
        .unwrap();
}

/// History comes back newest first, one entry per save day, capped at the limit
#[test]
fn test_history_ordering_property() {
    let mut config = proptest::test_runner::Config::default();
    config.cases = 32;
    let mut runner = proptest::test_runner::TestRunner::new(config);

    runner
        .run(
            &(proptest::collection::vec(0i64..30, 1..12), 1usize..8),
            |(day_offsets, limit)| {
                let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
                let clock = Arc::new(FixedClock::new(start));
                let service = ConnectionConfigService::new(
                    Arc::new(MemoryDocumentStore::new()),
                    Arc::new(MapEnv::new()),
                    clock.clone(),
                );

                for (i, offset) in day_offsets.iter().enumerate() {
                    // Seconds keep same-day saves strictly ordered
                    clock.set(
                        start + ChronoDuration::days(*offset) + ChronoDuration::seconds(i as i64),
                    );
                    let fields = ConnectionFields {
                        api_key: "AIzaSyProp".to_string(),
                        auth_domain: "p.firebaseapp.com".to_string(),
                        project_id: format!("p{}", i),
                        storage_bucket: "p.appspot.com".to_string(),
                        messaging_sender_id: "1".to_string(),
                        app_id: "1:1:web:1".to_string(),
                        measurement_id: String::new(),
                    };
                    service.save(fields, "prop").unwrap();
                }

                let mut days: Vec<i64> = day_offsets.clone();
                days.sort_unstable();
                days.dedup();

                let history = service.history(limit).unwrap();
                prop_assert_eq!(history.len(), days.len().min(limit));
                for pair in history.windows(2) {
                    prop_assert!(pair[0].updated_at >= pair[1].updated_at);
                }
                let mut seen_days: Vec<_> = history.iter().map(|c| c.updated_at.date_naive()).collect();
                seen_days.dedup();
                prop_assert_eq!(seen_days.len(), history.len());
                Ok(())
            },
        )
        .unwrap();
}

use super::{apply_env, apply_file, Settings};

use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
sheet_id = "fair-2024"
sheet_delay_ms = 250
"#,
    );

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.sheet_id.as_deref(), Some("fair-2024"));
    assert_eq!(settings.sheet_delay_ms, 250);
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[test]
fn malformed_file_leaves_settings_untouched() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "bind_addr = [");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("SERVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("APP__SHEET_DELAY_MS", "1000"),
        ]),
    );

    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.sheet_delay_ms, 1000);
}

#[test]
fn unparseable_numbers_and_blank_sheet_id_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("APP__SHEET_DELAY_MS", "soon"),
            ("APP__MAX_BODY_BYTES", "-1"),
            ("APP__SHEET_ID", "   "),
        ]),
    );

    assert_eq!(settings, Settings::default());
}

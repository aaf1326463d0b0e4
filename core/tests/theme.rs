mod common;

use common::open_backing;
use tempfile::TempDir;
use waymark_core::theme::{ManualAppearance, ThemeResolver};
use waymark_core::types::ThemeMode;

/// Verify a chosen mode is restored on the next launch.
#[test]
fn test_mode_persists_across_reopen() {
    let temp = TempDir::new().unwrap();
    let appearance = ManualAppearance::new(false);

    {
        let mut theme = ThemeResolver::load(open_backing(&temp), &appearance).unwrap();
        theme.set_mode(ThemeMode::Dark).unwrap();
    }

    let theme = ThemeResolver::load(open_backing(&temp), &appearance).unwrap();
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert!(theme.is_dark());
}

/// Verify every mode resolves consistently against both OS preferences.
#[test]
fn test_resolution_table() {
    for prefers_dark in [false, true] {
        for mode in ThemeMode::ALL {
            let temp = TempDir::new().unwrap();
            let appearance = ManualAppearance::new(prefers_dark);
            let mut theme = ThemeResolver::load(open_backing(&temp), &appearance).unwrap();

            let state = theme.set_mode(mode).unwrap();

            let expected = mode.fixed_is_dark().unwrap_or(prefers_dark);
            assert_eq!(state.is_dark, expected, "{mode} with os dark = {prefers_dark}");
            assert_eq!(theme.is_watching(), mode == ThemeMode::System);
        }
    }
}

//! Palette, colormap and style sheet tests

use plotkit::palette::{Color, Colormap, Rgb, DEFAULT_LEVELS};
use plotkit::{Error, Style};

// =============================================================================
// Palette
// =============================================================================

#[test]
fn test_every_color_hex_parses_back() {
    for color in Color::all() {
        let hex = color.hex();
        assert_eq!(hex.len(), 7);
        assert_eq!(Rgb::from_hex(&hex).unwrap(), color.rgb(), "{color:?}");
    }
}

#[test]
fn test_palette_groups_are_distinct() {
    let all = Color::all_colors();
    let mut unique = all.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), all.len());
}

#[test]
fn test_color_serde_names() {
    let json = serde_json::to_string(&Color::EggBlue).unwrap();
    assert_eq!(json, "\"egg_blue\"");
    let parsed: Color = serde_json::from_str("\"push_to_bg\"").unwrap();
    assert_eq!(parsed, Color::PushToBg);
}

// =============================================================================
// Colormaps
// =============================================================================

#[test]
fn test_presets() {
    let presets = [
        (Colormap::bl_wh_or(), "BlWhOr", Color::Blue, Color::Orange),
        (Colormap::bl_wh_rd(), "BlWhRd", Color::Blue, Color::Red),
        (Colormap::wh_bl(), "WhBl", Color::White, Color::Blue),
        (Colormap::wh_rd(), "WhRd", Color::White, Color::Red),
        (Colormap::wh_or(), "WhOr", Color::White, Color::Orange),
    ];

    for (cmap, name, start, end) in presets {
        assert_eq!(cmap.name(), name);
        assert_eq!(cmap.levels(), DEFAULT_LEVELS);
        assert_eq!(cmap.sample(0.0), start.rgb());
        assert_eq!(cmap.sample(1.0), end.rgb());
    }
}

#[test]
fn test_diverging_center_is_white() {
    let cmap = Colormap::bl_wh_rd();
    let center = cmap.sample(0.5);
    // 256 levels have no exact center; the nearest level is one step off white.
    assert!(center.r >= 0xf0 && center.g >= 0xf0 && center.b >= 0xf0, "{center}");
}

#[test]
fn test_lut_is_monotonic_for_two_stops() {
    let lut = Colormap::wh_bl().lut();
    for pair in lut.windows(2) {
        assert!(pair[1].r <= pair[0].r);
        assert!(pair[1].g <= pair[0].g);
    }
}

// =============================================================================
// Styles
// =============================================================================

#[test]
fn test_bundled_style_contents() {
    let ml = Style::Ml.read().unwrap();
    assert!(ml.contains("axes.prop_cycle"));
    for hex in Color::main_colors() {
        assert!(ml.contains(hex.trim_start_matches('#')), "{hex} missing from ml style");
    }

    let cmr10 = Style::Cmr10.read().unwrap();
    assert!(cmr10.contains("cmr10"));
}

#[test]
fn test_style_in_custom_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Style::Cmr10.resolve_in(dir.path()),
        Err(Error::StyleNotFound(_))
    ));

    std::fs::write(dir.path().join("cmr10.mplstyle"), "font.family: serif\n").unwrap();
    let path = Style::Cmr10.resolve_in(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("cmr10.mplstyle"));
}

#[test]
fn test_style_display_is_path() {
    let shown = Style::Ml.to_string();
    assert!(shown.ends_with("ml.mplstyle"));
}

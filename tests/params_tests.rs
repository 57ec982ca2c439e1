// Host-side tests for variant presets and page configuration parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod palette {
    include!("../src/core/palette.rs");
}
mod params {
    include!("../src/core/params.rs");
}

use params::*;

#[test]
fn variant_names_parse_case_insensitively() {
    assert_eq!("narrative".parse::<Variant>(), Ok(Variant::Narrative));
    assert_eq!(" Briefing ".parse::<Variant>(), Ok(Variant::Briefing));
    assert_eq!("BRIEFING".parse::<Variant>(), Ok(Variant::Briefing));
    assert_eq!(
        "keynote".parse::<Variant>(),
        Err(ConfigError::UnknownVariant("keynote".into()))
    );
}

#[test]
fn variant_name_round_trips() {
    for v in [Variant::Narrative, Variant::Briefing] {
        assert_eq!(v.name().parse::<Variant>(), Ok(v));
    }
}

#[test]
fn presets_differ_in_tuning() {
    let n = SceneParams::for_variant(Variant::Narrative);
    let b = SceneParams::for_variant(Variant::Briefing);
    assert_eq!((n.camera.ky, n.camera.kz, n.camera.parallax), (4.0, 8.0, 0.8));
    assert_eq!((b.camera.ky, b.camera.kz, b.camera.parallax), (3.0, 5.0, 0.5));
    assert_eq!(n.camera.z_base, 15.0);
    assert_eq!(b.camera.z_base, 15.0);
    assert!(n.reveal_pin_once);
    assert!(!b.reveal_pin_once);
    assert_eq!(n.effects, EffectsParams::OFF);
    assert!(b.effects.bloom_strength > 0.0);
    assert_eq!(b.connector_opacity, OpacityMode::Constant(0.25));
    assert_eq!(SceneParams::default(), n);
}

#[test]
fn flags_accept_common_spellings() {
    for s in ["true", "1", "yes", "", " TRUE "] {
        assert_eq!(parse_flag(s), Ok(true), "{:?}", s);
    }
    for s in ["false", "0", "no"] {
        assert_eq!(parse_flag(s), Ok(false), "{:?}", s);
    }
    assert_eq!(parse_flag("nah"), Err(ConfigError::InvalidFlag("nah".into())));
}

#[test]
fn missing_attributes_give_defaults() {
    let c = PageConfig::from_attributes(None, None, None).unwrap();
    assert_eq!(c, PageConfig::default());
    assert_eq!(c.scene_params(), SceneParams::default());
}

#[test]
fn attributes_select_variant_and_seed() {
    let c = PageConfig::from_attributes(Some("briefing"), Some(" 42 "), None).unwrap();
    assert_eq!(c.variant, Variant::Briefing);
    assert_eq!(c.seed, Some(42));
    assert_eq!(c.scene_params().node_count, 40);
}

#[test]
fn reveal_flag_overrides_variant_default() {
    let c = PageConfig::from_attributes(Some("narrative"), None, Some("false")).unwrap();
    assert!(!c.scene_params().reveal_pin_once);
    let c = PageConfig::from_attributes(Some("briefing"), None, Some("true")).unwrap();
    assert!(c.scene_params().reveal_pin_once);
}

#[test]
fn bad_attributes_are_reported() {
    assert_eq!(
        PageConfig::from_attributes(None, Some("-3"), None),
        Err(ConfigError::InvalidSeed("-3".into()))
    );
    assert!(matches!(
        PageConfig::from_attributes(Some("x"), None, None),
        Err(ConfigError::UnknownVariant(_))
    ));
    assert!(ConfigError::InvalidSeed("-3".into()).to_string().contains("-3"));
}

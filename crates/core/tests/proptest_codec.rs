//! Property-based tests for the report encoders and the script assembler.

use anker_mouse_core::buttons::{encode_button_table, ButtonBinding, ButtonMap, BUTTON_REPORT_LEN};
use anker_mouse_core::color::Rgb;
use anker_mouse_core::config::Config;
use anker_mouse_core::dpi::{encode_dpi_table, DpiTable, DPI_REPORT_LEN};
use anker_mouse_core::light::{
    encode_light, encode_profile_light, LightSetting, LIGHT_REPORT_LEN, PROFILE_LIGHT_REPORT_LEN,
};
use anker_mouse_core::profile::ProfileSlot;
use anker_mouse_core::sequence::FirmwareVariant;
use proptest::prelude::*;

fn slot() -> impl Strategy<Value = ProfileSlot> {
    prop_oneof![Just(ProfileSlot::One), Just(ProfileSlot::Two)]
}

fn light() -> impl Strategy<Value = LightSetting> {
    (any::<[u8; 3]>(), 0u32..=3, 0u32..=3).prop_map(|([r, g, b], bright, breath)| {
        LightSetting::from_raw(Rgb::new(r, g, b), bright, breath)
            .unwrap_or_else(|e| panic!("levels in range: {e}"))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Inverting a color twice gives it back, and each channel is 255 - c.
    #[test]
    fn prop_color_inversion(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let color = Rgb::new(r, g, b);
        let wire = color.inverted();
        prop_assert_eq!(wire, [255 - r, 255 - g, 255 - b]);
        prop_assert_eq!(Rgb::from_inverted(wire), color);
    }

    /// Hex formatting parses back to the same color.
    #[test]
    fn prop_hex_roundtrip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let color = Rgb::new(r, g, b);
        prop_assert_eq!(Rgb::from_hex(&color.to_hex()).ok(), Some(color));
    }

    /// The standalone light report keeps its fields at fixed offsets.
    #[test]
    fn prop_light_offsets(setting in light()) {
        let report = encode_light(&setting);
        prop_assert_eq!(report.len(), LIGHT_REPORT_LEN);
        prop_assert_eq!(&report[..2], &[0x02, 0x04]);
        prop_assert_eq!(&report[2..5], &setting.color.inverted());
        prop_assert_eq!(report[5], setting.brightness.get());
        prop_assert_eq!(report[6], setting.breath_speed.get());
        prop_assert!(report[7..].iter().all(|&b| b == 0));
    }

    /// The in-profile light report carries the profile's light id.
    #[test]
    fn prop_profile_light_offsets(setting in light(), slot in slot()) {
        let report = encode_profile_light(&setting, slot);
        prop_assert_eq!(report.len(), PROFILE_LIGHT_REPORT_LEN);
        prop_assert_eq!(report[3], slot.light_id());
        prop_assert_eq!(&report[8..11], &setting.color.inverted());
        prop_assert_eq!(report[11], setting.brightness.get());
        prop_assert_eq!(report[12], setting.breath_speed.get());
    }

    /// Any multiple of 50 in range is stored as dpi / 50 and reads back unchanged.
    #[test]
    fn prop_dpi_multiples_roundtrip(
        x in 1u32..=255,
        y in 1u32..=255,
        index in 0usize..4,
        slot in slot(),
    ) {
        let mut table = DpiTable::default();
        table.set_level(index, x * 50, y * 50)
            .map_err(|e| TestCaseError::fail(format!("in-range DPI rejected: {e}")))?;
        let level = table.levels()[index];
        prop_assert!(level.enabled);
        prop_assert_eq!((level.x_dpi(), level.y_dpi()), (x * 50, y * 50));

        let report = encode_dpi_table(&table, slot);
        let offset = 9 + index * 3;
        prop_assert_eq!(&report[offset..offset + 3], &[1, x as u8, y as u8]);
    }

    /// DPI values are truncated to the 50 DPI step below them.
    #[test]
    fn prop_dpi_truncates(dpi in 50u32..=12750) {
        let mut table = DpiTable::default();
        table.set_level(0, dpi, dpi)
            .map_err(|e| TestCaseError::fail(format!("in-range DPI rejected: {e}")))?;
        prop_assert_eq!(table.levels()[0].x_dpi(), dpi - dpi % 50);
    }

    /// Values outside 50..=12750 are refused and leave the table untouched.
    #[test]
    fn prop_dpi_out_of_range(dpi in prop_oneof![1u32..50, 12751u32..100_000]) {
        let mut table = DpiTable::default();
        prop_assert!(table.set_level(1, dpi, dpi).is_err());
        prop_assert_eq!(table, DpiTable::default());
    }

    /// Button tables are always 1024 bytes and carry the key code little-endian.
    #[test]
    fn prop_button_table(index in 0usize..9, code in any::<u16>(), slot in slot()) {
        let mut map = ButtonMap::default();
        map.set(index, ButtonBinding::key(code))
            .map_err(|e| TestCaseError::fail(format!("valid slot rejected: {e}")))?;
        let report = encode_button_table(&map, slot);
        prop_assert_eq!(report.len(), BUTTON_REPORT_LEN);
        prop_assert_eq!(report[3], slot.table_id());
        let offset = 9 + index * 4;
        prop_assert_eq!(&report[offset..offset + 4], &[0x10, 0x00, code as u8, (code >> 8) as u8]);
        prop_assert_eq!(report[45], 0x0D);
    }

    /// Assembled scripts keep length and report sizes regardless of settings.
    #[test]
    fn prop_script_shape_is_stable(
        l1 in light(),
        l2 in light(),
        full in any::<bool>(),
    ) {
        let variant = if full { FirmwareVariant::Full } else { FirmwareVariant::LightAndDpi };
        let baseline = Config::new(variant).reports();

        let mut config = Config::new(variant);
        config.profile_mut(ProfileSlot::One).set_light(l1);
        config.profile_mut(ProfileSlot::Two).set_light(l2);
        let frames = config.reports();

        prop_assert_eq!(frames.len(), baseline.len());
        let subs: Vec<usize> = variant.substitutions().iter().map(|s| s.index).collect();
        for (i, (a, b)) in frames.iter().zip(&baseline).enumerate() {
            prop_assert_eq!(a.len(), b.len());
            if !subs.contains(&i) {
                prop_assert_eq!(a, b, "constant report {} changed", i);
            }
        }
    }
}

#[test]
fn report_lengths_are_constant() {
    assert_eq!(LIGHT_REPORT_LEN, 16);
    assert_eq!(PROFILE_LIGHT_REPORT_LEN, 16);
    assert_eq!(DPI_REPORT_LEN, 64);
    assert_eq!(BUTTON_REPORT_LEN, 1024);
}

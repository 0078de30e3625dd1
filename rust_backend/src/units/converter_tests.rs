#[cfg(test)]
mod tests {
    use crate::models::{Unit, VariableKind};
    use crate::units::converter::{convert, convert_series, series_to_base, to_base};
    use proptest::prelude::*;

    fn close(a: Option<f64>, b: f64, eps: f64) -> bool {
        matches!(a, Some(x) if (x - b).abs() < eps)
    }

    #[test]
    fn test_missing_and_nan_stay_missing() {
        for variable in VariableKind::ALL {
            for unit in variable.supported_units() {
                assert_eq!(convert(variable, None, *unit), None);
                assert_eq!(convert(variable, Some(f64::NAN), *unit), None);
                assert_eq!(to_base(variable, None, *unit), None);
                assert_eq!(to_base(variable, Some(f64::NAN), *unit), None);
            }
        }
    }

    #[test]
    fn test_zero_is_not_missing() {
        assert_eq!(convert(VariableKind::Rainfall, Some(0.0), Unit::Inches), Some(0.0));
        assert!(close(convert(VariableKind::Temperature, Some(0.0), Unit::Fahrenheit), 32.0, 1e-12));
    }

    #[test]
    fn test_temperature() {
        assert!(close(convert(VariableKind::Temperature, Some(100.0), Unit::Fahrenheit), 212.0, 1e-9));
        assert!(close(to_base(VariableKind::Temperature, Some(-40.0), Unit::Fahrenheit), -40.0, 1e-9));
        assert_eq!(convert(VariableKind::Temperature, Some(21.5), Unit::Celsius), Some(21.5));
    }

    #[test]
    fn test_precipitation() {
        assert!(close(convert(VariableKind::Rainfall, Some(25.4), Unit::Inches), 1.0, 1e-9));
        assert!(close(to_base(VariableKind::Snowfall, Some(2.0), Unit::Inches), 50.8, 1e-9));
    }

    #[test]
    fn test_wind_speed() {
        assert!(close(convert(VariableKind::WindSpeed, Some(10.0), Unit::KilometersPerHour), 36.0, 1e-9));
        assert!(close(convert(VariableKind::WindSpeed, Some(0.44704), Unit::MilesPerHour), 1.0, 1e-9));
        assert!(close(convert(VariableKind::WindSpeed, Some(1.0), Unit::MilesPerHour), 2.23694, 1e-5));
        assert!(close(to_base(VariableKind::WindSpeed, Some(36.0), Unit::KilometersPerHour), 10.0, 1e-9));
        assert!(close(to_base(VariableKind::WindSpeed, Some(1.0), Unit::MilesPerHour), 0.44704, 1e-12));
    }

    #[test]
    fn test_identity_variables() {
        assert_eq!(convert(VariableKind::Humidity, Some(83.0), Unit::Percent), Some(83.0));
        assert_eq!(convert(VariableKind::DustConcentration, Some(0.42), Unit::Aod), Some(0.42));
    }

    #[test]
    fn test_cloud_cover_fraction_to_percent() {
        assert!(close(convert(VariableKind::CloudCover, Some(0.35), Unit::Percent), 35.0, 1e-9));
        assert!(close(to_base(VariableKind::CloudCover, Some(35.0), Unit::Percent), 0.35, 1e-12));
    }

    #[test]
    fn test_foreign_unit_is_identity() {
        assert_eq!(convert(VariableKind::Temperature, Some(12.0), Unit::Inches), Some(12.0));
        assert_eq!(to_base(VariableKind::Humidity, Some(55.0), Unit::MilesPerHour), Some(55.0));
    }

    #[test]
    fn test_series_keep_length() {
        let values = vec![Some(1.0), None, Some(f64::NAN), Some(4.0)];
        let converted = convert_series(VariableKind::WindSpeed, &values, Unit::KilometersPerHour);
        assert_eq!(converted.len(), 4);
        assert!(converted[1].is_none() && converted[2].is_none());
        let back = series_to_base(VariableKind::WindSpeed, &converted, Unit::KilometersPerHour);
        assert!(close(back[3], 4.0, 1e-9));
    }

    proptest! {
        #[test]
        fn prop_base_unit_is_identity(x in -1.0e6f64..1.0e6) {
            for variable in VariableKind::ALL {
                prop_assert_eq!(convert(variable, Some(x), variable.base_unit()), Some(x));
                prop_assert_eq!(to_base(variable, Some(x), variable.base_unit()), Some(x));
            }
        }

        #[test]
        fn prop_temperature_roundtrip(x in -100.0f64..100.0) {
            let f = convert(VariableKind::Temperature, Some(x), Unit::Fahrenheit);
            prop_assert!(close(to_base(VariableKind::Temperature, f, Unit::Fahrenheit), x, 1e-9));
        }

        #[test]
        fn prop_rainfall_roundtrip(x in 0.0f64..1000.0) {
            let inches = convert(VariableKind::Rainfall, Some(x), Unit::Inches);
            prop_assert!(close(to_base(VariableKind::Rainfall, inches, Unit::Inches), x, 1e-9));
        }

        #[test]
        fn prop_wind_roundtrip(x in 0.0f64..150.0) {
            for unit in [Unit::KilometersPerHour, Unit::MilesPerHour] {
                let shown = convert(VariableKind::WindSpeed, Some(x), unit);
                prop_assert!(close(to_base(VariableKind::WindSpeed, shown, unit), x, 1e-9));
            }
        }
    }
}

/// Macro to generate FromStr implementations for ValueEnum types
///
/// Matching goes through clap's `PossibleValue`, so every alias accepted on
/// the command line is also accepted from config files and env vars.
#[macro_export]
macro_rules! impl_fromstr_for_value_enum {
    ($enum_type:ty, $error_reason:expr) => {
        impl FromStr for $enum_type {
            type Err = $crate::primitives::ConfigError;

            fn from_str(s: &str) -> Result<Self, $crate::primitives::ConfigError> {
                Self::value_variants()
                    .iter()
                    .find(|variant| {
                        variant
                            .to_possible_value()
                            .is_some_and(|value| value.matches(s, true))
                    })
                    .copied()
                    .ok_or_else(|| $crate::primitives::ConfigError::ParseError {
                        value: s.to_string(),
                        reason: $error_reason.to_string(),
                    })
            }
        }
    };
}

pub(crate) use impl_fromstr_for_value_enum;

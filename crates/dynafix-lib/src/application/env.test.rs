use super::*;

fn color_for(vars: &[(&str, &str)]) -> ColorIntent {
    let env_config = EnvironmentConfig::from_vars(vars.iter().copied()).unwrap();
    env_config.apply_color_config(ColorIntent::Auto)
}

#[test]
fn test_no_environment_keeps_intent() {
    assert_eq!(color_for(&[]), ColorIntent::Auto);
}

#[test]
fn test_no_color_environment_variable() {
    assert_eq!(color_for(&[("NO_COLOR", "1")]), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    assert_eq!(color_for(&[("NO_COLOR", "")]), ColorIntent::Auto);
}

#[test]
fn test_force_color_environment_variable() {
    assert_eq!(color_for(&[("FORCE_COLOR", "1")]), ColorIntent::Always);
    assert_eq!(color_for(&[("FORCE_COLOR", "false")]), ColorIntent::Never);
}

#[test]
fn test_environment_variable_precedence() {
    let color = color_for(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);

    // FORCE_COLOR wins over NO_COLOR and CLICOLOR
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_ci_environment_variable() {
    assert_eq!(
        color_for(&[("CI", "true"), ("FORCE_COLOR", "1")]),
        ColorIntent::Never
    );
}

#[test]
fn test_invalid_force_color_values_ignored() {
    assert_eq!(color_for(&[("FORCE_COLOR", "invalid")]), ColorIntent::Auto);
}

#[test]
fn test_clicolor_one_keeps_intent() {
    let env_config = EnvironmentConfig::from_vars([("CLICOLOR", "1")]).unwrap();
    assert_eq!(
        env_config.apply_color_config(ColorIntent::Always),
        ColorIntent::Always
    );
}

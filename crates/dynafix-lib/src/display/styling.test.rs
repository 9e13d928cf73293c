use super::*;

#[test]
fn test_plain_styling_has_no_escape_codes() {
    let styling = StyleManager::plain();

    assert_eq!(styling.style_success("ok"), "ok");
    assert_eq!(styling.style_emphasis("title"), "title");
    assert_eq!(styling.format_success("done"), "+ done");
    assert_eq!(styling.format_error("failed"), "x failed");
    assert_eq!(styling.format_warning("careful"), "! careful");
    assert_eq!(styling.format_info("note"), "i note");
}

#[test]
fn test_forced_color_emits_ansi() {
    let styling = StyleManager::new(true, false);

    let styled = styling.style_error("boom");
    assert!(styled.contains("\u{1b}["));
    assert_eq!(console::strip_ansi_codes(&styled), "boom");
}

#[test]
fn test_unicode_symbols() {
    let styling = StyleManager::new(false, true);

    assert!(styling.is_unicode());
    assert_eq!(styling.format_success("done"), "✓ done");
    assert_eq!(styling.bullet(), "•");
    assert_eq!(styling.arrow(), "→");
}

#[test]
fn test_ascii_symbols() {
    let styling = StyleManager::plain();

    assert!(!styling.is_unicode());
    assert!(!styling.color_enabled());
    assert_eq!(styling.symbols().spinner.len(), 4);
}

use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Decorative output (banners, success lines) is suppressed when
/// `STOCKPILE_QUIET` is `1` or `true`. Errors and data are always printed.
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("STOCKPILE_QUIET")
            .map(|v| quiet_flag(&v))
            .unwrap_or(false)
    })
}

fn quiet_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

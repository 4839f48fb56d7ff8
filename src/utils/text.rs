//! Outbound message text formatting.

/// Compliance footer appended to every outbound message.
pub const OPT_OUT_NOTICE: &str = "Reply STOP to opt-out.";

/// Prefix `text` with `[brand_tag]` and append the opt-out notice.
///
/// No attempt is made to detect already decorated text.
///
/// ```rust
/// use n2p_relay::decorate_text;
///
/// assert_eq!(decorate_text("Hi", "BRAND"), "[BRAND] Hi Reply STOP to opt-out.");
/// ```
pub fn decorate_text(text: &str, brand_tag: &str) -> String {
    format!("[{brand_tag}] {text} {OPT_OUT_NOTICE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate() {
        assert_eq!(
            decorate_text("Hello", "PLS N2P"),
            "[PLS N2P] Hello Reply STOP to opt-out."
        );
    }

    #[test]
    fn test_decorate_twice_stacks() {
        let once = decorate_text("Hi", "B");
        assert_eq!(
            decorate_text(&once, "B"),
            "[B] [B] Hi Reply STOP to opt-out. Reply STOP to opt-out."
        );
    }

    #[test]
    fn test_decorate_empty() {
        assert_eq!(decorate_text("", "B"), "[B]  Reply STOP to opt-out.");
    }
}

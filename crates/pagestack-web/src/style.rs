//! Mapping from panel styles to CSS declarations.

use pagestack_core::PanelStyle;

/// Standard transition-end event name.
pub const TRANSITION_END: &str = "transitionend";
/// Prefixed event name for older WebKit.
pub const WEBKIT_TRANSITION_END: &str = "webkitTransitionEnd";

/// CSS `(property, value)` pairs for one panel style.
///
/// The transform is written both plain and `-webkit-` prefixed.
#[must_use]
pub fn panel_style_properties(style: &PanelStyle) -> [(&'static str, String); 4] {
    let transform = style.offset.css_transform();
    [
        ("-webkit-transform", transform.clone()),
        ("transform", transform),
        ("opacity", format_opacity(style.opacity)),
        ("z-index", style.z_index.to_string()),
    ]
}

/// Pick the transition-end event to listen for, given which style
/// properties the browser supports. `None` means no transitions.
#[must_use]
pub fn transition_end_event_name(standard: bool, webkit: bool) -> Option<&'static str> {
    if standard {
        Some(TRANSITION_END)
    } else if webkit {
        Some(WEBKIT_TRANSITION_END)
    } else {
        None
    }
}

fn format_opacity(opacity: f32) -> String {
    // Round away f32 noise such as 0.90000004.
    let rounded = (opacity.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagestack_core::Offset3d;
    use pretty_assertions::assert_eq;

    #[test]
    fn receding_panel_properties() {
        let style = PanelStyle {
            offset: Offset3d::new(0.0, 75.0, -250.0),
            opacity: 1.0 - 0.1,
            z_index: 3,
        };
        let props = panel_style_properties(&style);
        assert_eq!(props[0], ("-webkit-transform", "translate3d(0%,75%,-250px)".to_owned()));
        assert_eq!(props[1], ("transform", "translate3d(0%,75%,-250px)".to_owned()));
        assert_eq!(props[2], ("opacity", "0.9".to_owned()));
        assert_eq!(props[3], ("z-index", "3".to_owned()));
    }

    #[test]
    fn front_panel_properties() {
        let props = panel_style_properties(&PanelStyle::default());
        assert_eq!(props[1].1, Offset3d::ORIGIN.css_transform());
        assert_eq!(props[2].1, "1");
    }

    #[test]
    fn event_name_prefers_standard() {
        assert_eq!(transition_end_event_name(true, true), Some("transitionend"));
        assert_eq!(transition_end_event_name(false, true), Some("webkitTransitionEnd"));
        assert_eq!(transition_end_event_name(false, false), None);
    }
}

// CSS value formatting used by the DOM side. Pure so it can be tested on the host.

pub const PREVIEW_BACKGROUND_SIZE: &str = "100%, contain";

#[inline]
pub fn px(value: f32) -> String {
    format!("{}px", value)
}

/// `url("...")` with embedded quotes escaped.
#[inline]
pub fn url(locator: &str) -> String {
    format!("url(\"{}\")", locator.replace('"', "%22"))
}

/// Translucent overlay on top of the first frame, centred and unrepeated.
pub fn preview_background(overlay_url: &str, first_frame_url: &str) -> String {
    format!(
        "{}, {} 50% 50% no-repeat",
        url(overlay_url),
        url(first_frame_url)
    )
}

//! Reduced-motion handling

use tracing::debug;
use vitrine_core::Document;

/// Pause every autoplaying video when reduced motion is preferred
///
/// Returns how many videos were paused. Videos are never resumed when the
/// preference is lifted; playback is left to the user from then on.
pub fn apply_motion_preference(doc: &mut Document, reduced: bool) -> usize {
    if !reduced {
        return 0;
    }
    let mut paused = 0;
    for video in doc.videos() {
        let autoplaying = doc.video(video).is_some_and(|v| v.autoplay && v.playing);
        if autoplaying {
            doc.set_playing(video, false);
            paused += 1;
        }
    }
    if paused > 0 {
        debug!("reduced motion preferred, paused {} video(s)", paused);
    }
    paused
}

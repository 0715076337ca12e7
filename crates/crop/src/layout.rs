//! Crop area sizing. Heights are CSS pixels.

pub const MIN_AREA_HEIGHT: f32 = 200.0;
pub const MAX_AREA_HEIGHT: f32 = 600.0;
/// Used when the modal cannot be measured.
pub const FALLBACK_AREA_HEIGHT: f32 = 300.0;

const SAFETY_MARGIN: f32 = 100.0;

/// Measured modal geometry, available once the modal is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModalMetrics {
    pub viewport_height: f32,
    pub header_height: f32,
    pub controls_height: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

/// Height guess used before the modal is shown: half the viewport.
pub fn estimated_area_height(viewport_height: f32) -> f32 {
    (viewport_height * 0.5).clamp(MIN_AREA_HEIGHT, MAX_AREA_HEIGHT)
}

/// Height left for the image once header, controls and padding are taken.
pub fn available_area_height(metrics: Option<&ModalMetrics>) -> f32 {
    let Some(m) = metrics else {
        log::warn!(target: "crop", "modal metrics unavailable, using fallback crop area height");
        return FALLBACK_AREA_HEIGHT;
    };
    let available = m.viewport_height
        - m.header_height
        - m.controls_height
        - m.padding_top
        - m.padding_bottom
        - SAFETY_MARGIN;
    available.clamp(MIN_AREA_HEIGHT, MAX_AREA_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_is_clamped() {
        assert_eq!(estimated_area_height(300.0), 200.0);
        assert_eq!(estimated_area_height(900.0), 450.0);
        assert_eq!(estimated_area_height(2000.0), 600.0);
    }

    #[test]
    fn available_subtracts_chrome_and_margin() {
        let m = ModalMetrics {
            viewport_height: 900.0,
            header_height: 60.0,
            controls_height: 80.0,
            padding_top: 16.0,
            padding_bottom: 16.0,
        };
        assert_eq!(available_area_height(Some(&m)), 628.0_f32.min(600.0));

        let small = ModalMetrics {
            viewport_height: 500.0,
            ..m
        };
        assert_eq!(available_area_height(Some(&small)), 228.0);

        let tiny = ModalMetrics {
            viewport_height: 300.0,
            ..m
        };
        assert_eq!(available_area_height(Some(&tiny)), 200.0);
    }

    #[test]
    fn unmeasurable_modal_falls_back() {
        assert_eq!(available_area_height(None), 300.0);
    }
}

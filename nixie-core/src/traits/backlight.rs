//! Tube backlight trait

use crate::config::Color;

/// RGB lighting under the tubes
pub trait ColorOutput {
    fn set_color(&mut self, color: Color);

    fn color(&self) -> Color;
}

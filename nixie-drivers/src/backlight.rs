//! RGB backlight on three PWM channels

use embedded_hal::pwm::SetDutyCycle;
use nixie_core::config::Color;
use nixie_core::traits::ColorOutput;

/// Backlight LEDs driven by one PWM channel per color
///
/// Channel values 0-255 map linearly onto the duty cycle. Write errors
/// are counted, not returned.
pub struct RgbBacklight<R, G, B> {
    red: R,
    green: G,
    blue: B,
    color: Color,
    errors: u32,
}

impl<R, G, B> RgbBacklight<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Create the backlight, starting dark
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut backlight = Self {
            red,
            green,
            blue,
            color: Color::OFF,
            errors: 0,
        };
        backlight.set_color(Color::OFF);
        backlight
    }

    /// Failed duty cycle writes since creation
    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn count<E>(&mut self, result: Result<(), E>) {
        if result.is_err() {
            self.errors = self.errors.wrapping_add(1);
        }
    }
}

impl<R, G, B> ColorOutput for RgbBacklight<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_color(&mut self, color: Color) {
        let red = self.red.set_duty_cycle_fraction(u16::from(color.red), 255);
        self.count(red);
        let green = self.green.set_duty_cycle_fraction(u16::from(color.green), 255);
        self.count(green);
        let blue = self.blue.set_duty_cycle_fraction(u16::from(color.blue), 255);
        self.count(blue);
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// Mock PWM channel with a 1000-step period
    struct MockPwm {
        duty: u16,
    }

    impl MockPwm {
        fn new() -> Self {
            Self { duty: 999 }
        }
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_starts_dark() {
        let backlight = RgbBacklight::new(MockPwm::new(), MockPwm::new(), MockPwm::new());
        assert_eq!(backlight.color(), Color::OFF);
        assert_eq!(backlight.red.duty, 0);
        assert_eq!(backlight.blue.duty, 0);
    }

    #[test]
    fn test_channels_scale_to_period() {
        let mut backlight = RgbBacklight::new(MockPwm::new(), MockPwm::new(), MockPwm::new());
        backlight.set_color(Color::new(255, 0, 51));

        assert_eq!(backlight.red.duty, 1000);
        assert_eq!(backlight.green.duty, 0);
        assert_eq!(backlight.blue.duty, 200);
        assert_eq!(backlight.color(), Color::new(255, 0, 51));
        assert_eq!(backlight.errors(), 0);
    }
}

//! Digit-wise edit arithmetic
//!
//! Edit mode changes one decimal digit at a time. Six positions cover
//! hours, minutes and seconds as tens/units pairs. Inputs are taken
//! modulo 100 so every function is total over `u8`.

use crate::time::TimeOfDay;

/// Number of editable digit positions
pub const EDIT_DIGITS: u8 = 6;

/// Hour tens digit. Tens of 2 is only legal with units up to 3.
pub fn step_hour_tens(hour: u8, up: bool) -> u8 {
    let h = hour % 100;
    let units = h % 10;
    if up {
        if h >= 20 || (h >= 10 && units > 3) {
            units
        } else {
            h + 10
        }
    } else if h < 10 {
        (if units > 3 { 10 } else { 20 }) + units
    } else {
        h - 10
    }
}

/// Hour units digit. Wraps at 3 when the tens digit is 2.
pub fn step_hour_units(hour: u8, up: bool) -> u8 {
    let h = hour % 100;
    let units = h % 10;
    if up {
        if units == 9 || (units >= 3 && h >= 20) {
            h - units
        } else {
            h + 1
        }
    } else if units == 0 {
        h + if h >= 20 { 3 } else { 9 }
    } else {
        h - 1
    }
}

/// Tens digit of a field whose largest value is `max` (59 or 99)
pub fn step_tens(value: u8, max: u8, up: bool) -> u8 {
    let v = value % 100;
    let top = (max % 100) / 10 * 10;
    if up {
        if v >= top {
            v % 10
        } else {
            v + 10
        }
    } else if v < 10 {
        top + v % 10
    } else {
        v - 10
    }
}

/// Units digit, wraps 0-9 without touching the tens digit
pub fn step_units(value: u8, up: bool) -> u8 {
    let v = value % 100;
    let units = v % 10;
    if up {
        if units == 9 {
            v - 9
        } else {
            v + 1
        }
    } else if units == 0 {
        v + 9
    } else {
        v - 1
    }
}

/// Step one digit of a field with the given maximum
pub fn step_field(value: u8, max: u8, tens: bool, up: bool) -> u8 {
    if tens {
        step_tens(value, max, up)
    } else {
        step_units(value, up)
    }
}

/// Apply one digit edit to a time of day
///
/// Digits count from the left: 0-1 hour, 2-3 minute, 4-5 second.
/// Every field is reduced modulo 100; positions past 5 change nothing else.
pub fn step_digit(time: TimeOfDay, digit: u8, up: bool) -> TimeOfDay {
    let mut t = TimeOfDay::new(time.hour % 100, time.minute % 100, time.second % 100);
    match digit {
        0 => t.hour = step_hour_tens(t.hour, up),
        1 => t.hour = step_hour_units(t.hour, up),
        2 => t.minute = step_tens(t.minute, 59, up),
        3 => t.minute = step_units(t.minute, up),
        4 => t.second = step_tens(t.second, 59, up),
        5 => t.second = step_units(t.second, up),
        _ => {}
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hour_tens_wrap_table() {
        assert_eq!(step_hour_tens(23, true), 3);
        assert_eq!(step_hour_tens(3, true), 13);
        assert_eq!(step_hour_tens(13, true), 23);
        assert_eq!(step_hour_tens(14, true), 4);
        assert_eq!(step_hour_tens(0, false), 20);
        assert_eq!(step_hour_tens(5, false), 15);
        assert_eq!(step_hour_tens(21, false), 11);
    }

    #[test]
    fn test_hour_units_wrap_table() {
        assert_eq!(step_hour_units(23, true), 20);
        assert_eq!(step_hour_units(19, true), 10);
        assert_eq!(step_hour_units(20, false), 23);
        assert_eq!(step_hour_units(10, false), 19);
        assert_eq!(step_hour_units(0, false), 9);
        assert_eq!(step_hour_units(22, true), 23);
    }

    #[test]
    fn test_sixty_tens_wraps() {
        for v in 50..=59u8 {
            assert_eq!(step_tens(v, 59, true), v % 10);
        }
        for v in 0..=9u8 {
            assert_eq!(step_tens(v, 59, false), 50 + v);
        }
        assert_eq!(step_tens(34, 59, true), 44);
    }

    #[test]
    fn test_hundred_tens_wraps() {
        assert_eq!(step_tens(95, 99, true), 5);
        assert_eq!(step_tens(5, 99, false), 95);
    }

    #[test]
    fn test_step_digit_positions() {
        let t = TimeOfDay::new(12, 34, 56);
        assert_eq!(step_digit(t, 0, true), TimeOfDay::new(22, 34, 56));
        assert_eq!(step_digit(t, 3, false), TimeOfDay::new(12, 33, 56));
        assert_eq!(step_digit(t, 4, true), TimeOfDay::new(12, 34, 6));
        assert_eq!(step_digit(t, 5, true), TimeOfDay::new(12, 34, 57));
        assert_eq!(step_digit(t, 6, true), t);
    }

    #[test]
    fn test_step_digit_reduces_untouched_fields() {
        let t = TimeOfDay::new(100, 205, 99);
        assert_eq!(step_digit(t, 0, false), TimeOfDay::new(20, 5, 99));
        assert_eq!(step_digit(t, 5, true), TimeOfDay::new(0, 5, 90));
        assert_eq!(step_digit(t, 7, true), TimeOfDay::new(0, 5, 99));
    }

    proptest! {
        #[test]
        fn prop_units_keep_tens(v in 0u8..100, up in any::<bool>()) {
            prop_assert_eq!(step_units(v, up) / 10, v / 10);
            prop_assert_eq!(step_hour_units(v, up) / 10, v / 10);
        }

        #[test]
        fn prop_tens_keep_units(v in 0u8..100, up in any::<bool>()) {
            prop_assert_eq!(step_tens(v, 59, up) % 10, v % 10);
            prop_assert_eq!(step_hour_tens(v, up) % 10, v % 10);
        }

        #[test]
        fn prop_total_over_bytes(v in any::<u8>(), digit in 0u8..8, up in any::<bool>()) {
            let t = TimeOfDay::new(v, v, v);
            let stepped = step_digit(t, digit, up);
            prop_assert!(stepped.hour < 100 && stepped.minute < 100 && stepped.second < 100);
        }

        #[test]
        fn prop_valid_time_stays_valid(
            h in 0u8..24,
            m in 0u8..60,
            s in 0u8..60,
            digit in 0u8..EDIT_DIGITS,
            up in any::<bool>(),
        ) {
            let stepped = step_digit(TimeOfDay::new(h, m, s), digit, up);
            prop_assert!(stepped.is_valid());
        }

        #[test]
        fn prop_up_then_down_restores(
            h in 0u8..24,
            m in 0u8..60,
            s in 0u8..60,
            digit in 1u8..EDIT_DIGITS,
        ) {
            let t = TimeOfDay::new(h, m, s);
            prop_assert_eq!(step_digit(step_digit(t, digit, true), digit, false), t);
        }
    }
}

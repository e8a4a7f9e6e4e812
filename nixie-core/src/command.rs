//! Serial command lines
//!
//! Lines end with `\n` or `\r`:
//!
//! - `F<tubes>[.<dots>]` flash up to six tubes. `0`-`9` light a digit,
//!   `-` or space leave the tube dark, `*` lights every cathode. The
//!   optional dot mask is one digit 0-3.
//! - `C<seconds>` start the countdown
//! - `X` cancel the countdown

use heapless::Vec;

use crate::config::MAX_LINE_LEN;
use crate::display::{DotMask, TUBE_COUNT};
use crate::tube::{ALL_TUBES, NO_TUBES};

/// Longest countdown that fits on the tubes (99:59:59)
pub const MAX_COUNTDOWN_S: u32 = 99 * 3_600 + 59 * 60 + 59;

/// Serial command parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line had no command letter
    Empty,
    /// Unrecognised command letter
    UnknownCommand,
    /// Character that is not a tube selector
    InvalidDigit,
    /// More than six tube selectors
    TooLong,
    /// Number missing, malformed or out of range
    InvalidNumber,
    /// Line exceeded the receive buffer and was dropped
    LineOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialCommand {
    Flash { tubes: [u8; TUBE_COUNT], dots: DotMask },
    Countdown { seconds: u32 },
    CancelCountdown,
}

/// Parse one line without its terminator
pub fn parse_line(line: &[u8]) -> Result<SerialCommand, CommandError> {
    let (&cmd, rest) = line.split_first().ok_or(CommandError::Empty)?;
    match cmd.to_ascii_uppercase() {
        b'F' => {
            let (tubes, dots) = parse_flash_payload(rest)?;
            Ok(SerialCommand::Flash { tubes, dots })
        }
        b'C' => {
            let seconds = parse_number(rest)?;
            if seconds == 0 || seconds > MAX_COUNTDOWN_S {
                return Err(CommandError::InvalidNumber);
            }
            Ok(SerialCommand::Countdown { seconds })
        }
        b'X' if rest.is_empty() => Ok(SerialCommand::CancelCountdown),
        _ => Err(CommandError::UnknownCommand),
    }
}

/// Parse the tube characters (and optional dot mask) of a flash line
pub fn parse_flash_payload(payload: &[u8]) -> Result<([u8; TUBE_COUNT], DotMask), CommandError> {
    let (digits, dots) = match payload.iter().position(|&b| b == b'.') {
        Some(i) => (&payload[..i], Some(&payload[i + 1..])),
        None => (payload, None),
    };

    if digits.len() > TUBE_COUNT {
        return Err(CommandError::TooLong);
    }

    let mut tubes = [NO_TUBES; TUBE_COUNT];
    for (tube, &ch) in tubes.iter_mut().zip(digits) {
        *tube = match ch {
            b'0'..=b'9' => ch - b'0',
            b' ' | b'-' => NO_TUBES,
            b'*' => ALL_TUBES,
            _ => return Err(CommandError::InvalidDigit),
        };
    }

    let dots = match dots {
        None => DotMask::NONE,
        Some(&[d @ b'0'..=b'3']) => DotMask::from_bits(d - b'0'),
        Some(_) => return Err(CommandError::InvalidDigit),
    };

    Ok((tubes, dots))
}

fn parse_number(digits: &[u8]) -> Result<u32, CommandError> {
    if digits.is_empty() {
        return Err(CommandError::InvalidNumber);
    }
    digits.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return Err(CommandError::InvalidNumber);
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or(CommandError::InvalidNumber)
    })
}

/// Collects received bytes into lines and parses them
#[derive(Debug, Default)]
pub struct LineAssembler {
    line: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte; returns a result when it completed a non-empty line
    pub fn feed(&mut self, byte: u8) -> Option<Result<SerialCommand, CommandError>> {
        match byte {
            b'\n' | b'\r' => {
                let overflowed = core::mem::take(&mut self.overflowed);
                if overflowed {
                    self.line.clear();
                    return Some(Err(CommandError::LineOverflow));
                }
                if self.line.is_empty() {
                    return None;
                }
                let result = parse_line(&self.line);
                self.line.clear();
                Some(result)
            }
            _ => {
                if !self.overflowed && self.line.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }
}

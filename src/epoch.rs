//! Day-of-year epoch parsing and formatting.
//!
//! The ephemeris feed stamps each sample with `YYYY-DDDTHH:MM:SS[.f]Z`:
//! four digit year, three digit day of year (1 is January 1st),
//! time of day, optional fractional seconds and the UTC designator.
//! Every [Epoch] in this crate is obtained through [parse_epoch],
//! so a given string always maps to the very same instant.
use crate::{error::ParsingError, prelude::Epoch};

/// Cumulative number of days at the start of each month, common year.
const MONTH_START_DOY: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Maximal number of fractional digits (nanosecond resolution)
const MAX_FRACTIONAL_DIGITS: usize = 9;

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Converts (year, day of year) to (month, day of month)
fn month_day(year: i32, doy: u16) -> (u8, u8) {
    let leap = u16::from(is_leap_year(year));
    let month = (1..12)
        .rev()
        .find(|&m| doy > MONTH_START_DOY[m] + if m >= 2 { leap } else { 0 })
        .map(|m| m + 1)
        .unwrap_or(1);
    let start = MONTH_START_DOY[month - 1] + if month > 2 { leap } else { 0 };
    (month as u8, (doy - start) as u8)
}

/// Converts (year, month, day of month) to day of year
fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    let leap = u16::from(is_leap_year(year) && month > 2);
    MONTH_START_DOY[usize::from(month) - 1] + leap + u16::from(day)
}

/// Parses a fixed width, all digits field
fn digits<T: std::str::FromStr>(field: Option<&str>, err: ParsingError) -> Result<T, ParsingError> {
    let field = field.ok_or(err.clone())?;
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err);
    }
    field.parse::<T>().map_err(|_| err)
}

/// Parses the feed's `YYYY-DDDTHH:MM:SS[.f]Z` representation
/// into an [Epoch] expressed in UTC.
/// Between 0 and 9 fractional digits are accepted. Leap seconds (`:60`) are rejected:
/// they have no distinct UTC representation.
pub fn parse_epoch(raw: &str) -> Result<Epoch, ParsingError> {
    let s = raw.trim();

    // literal separators
    if s.len() < 18
        || s.get(4..5) != Some("-")
        || s.get(8..9) != Some("T")
        || s.get(11..12) != Some(":")
        || s.get(14..15) != Some(":")
    {
        return Err(ParsingError::EpochFormat(raw.to_string()));
    }

    let year = digits::<i32>(s.get(0..4), ParsingError::Year)?;
    let doy = digits::<u16>(s.get(5..8), ParsingError::DayOfYear)?;
    let hours = digits::<u8>(s.get(9..11), ParsingError::TimeOfDay)?;
    let minutes = digits::<u8>(s.get(12..14), ParsingError::TimeOfDay)?;
    let seconds = digits::<u8>(s.get(15..17), ParsingError::TimeOfDay)?;

    if doy == 0 || doy > days_in_year(year) {
        return Err(ParsingError::DayOfYearRange(doy));
    }

    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(ParsingError::TimeOfDay);
    }

    let remainder = s.get(17..).ok_or(ParsingError::TrailingLiteral)?;

    let (fraction, literal) = match remainder.strip_prefix('.') {
        Some(rem) => {
            let width = rem.bytes().take_while(|b| b.is_ascii_digit()).count();
            if width == 0 || width > MAX_FRACTIONAL_DIGITS {
                return Err(ParsingError::FractionalSeconds);
            }
            (Some(&rem[..width]), &rem[width..])
        },
        None => (None, remainder),
    };

    if literal != "Z" {
        return Err(ParsingError::TrailingLiteral);
    }

    let nanos = match fraction {
        Some(fraction) => {
            let value = digits::<u32>(Some(fraction), ParsingError::FractionalSeconds)?;
            value * 10_u32.pow((MAX_FRACTIONAL_DIGITS - fraction.len()) as u32)
        },
        None => 0,
    };

    let (month, day) = month_day(year, doy);

    Epoch::maybe_from_gregorian_utc(year, month, day, hours, minutes, seconds, nanos)
        .map_err(|_| ParsingError::EpochFormat(raw.to_string()))
}

/// Formats [Epoch] to the canonical `YYYY-DDDTHH:MM:SS.fffZ` representation,
/// which is the one used by the ephemeris feed. Sub millisecond digits are truncated.
pub fn format_epoch(epoch: &Epoch) -> String {
    let (year, month, day, hours, minutes, seconds, nanos) = epoch.to_gregorian_utc();
    format!(
        "{:04}-{:03}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        day_of_year(year, month, day),
        hours,
        minutes,
        seconds,
        nanos / 1_000_000,
    )
}

#[cfg(test)]
mod test {
    use super::{day_of_year, month_day};
    #[test]
    fn day_of_year_conversions() {
        for (year, doy, month, day) in [
            (2025, 1, 1, 1),
            (2025, 31, 1, 31),
            (2025, 32, 2, 1),
            (2025, 59, 2, 28),
            (2025, 60, 3, 1),
            (2024, 60, 2, 29),
            (2024, 61, 3, 1),
            (2025, 365, 12, 31),
            (2024, 366, 12, 31),
            (2000, 366, 12, 31),
        ] {
            assert_eq!(month_day(year, doy), (month, day), "{}-{:03}", year, doy);
            assert_eq!(day_of_year(year, month, day), doy, "{}-{}-{}", year, month, day);
        }
    }
}

use std::fmt;
use std::str::FromStr;

use log::warn;

use super::{Dataset, DatasetError};

/// One end of a trim range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimBound {
    /// 0-based scan index, inclusive
    Scan(usize),
    /// Retention time in minutes, inclusive
    Time(f64),
}

impl TrimBound {
    /// Bound at a retention time given in minutes
    pub fn minutes(minutes: f64) -> Self {
        TrimBound::Time(minutes)
    }

    /// Bound at a retention time given in seconds
    pub fn seconds(seconds: f64) -> Self {
        TrimBound::Time(seconds / 60.0)
    }
}

impl From<usize> for TrimBound {
    fn from(index: usize) -> Self {
        TrimBound::Scan(index)
    }
}

/// Parses a time bound: `"12.5m"` is minutes, `"750s"` or `"750"` is seconds.
impl FromStr for TrimBound {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || DatasetError::InvalidTimeBound(s.to_string());
        let (number, in_minutes) = match text.strip_suffix(&['m', 'M'][..]) {
            Some(rest) => (rest, true),
            None => (text.strip_suffix(&['s', 'S'][..]).unwrap_or(text), false),
        };
        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(if in_minutes {
            TrimBound::minutes(value)
        } else {
            TrimBound::seconds(value)
        })
    }
}

impl fmt::Display for TrimBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrimBound::Scan(index) => write!(f, "scan {}", index),
            TrimBound::Time(minutes) => write!(f, "{}m", minutes),
        }
    }
}

/// Resolve bounds to an inclusive `(first, last)` scan range.
pub(super) fn resolve_range(
    dataset: &Dataset,
    begin: Option<TrimBound>,
    end: Option<TrimBound>,
) -> Result<(usize, usize), DatasetError> {
    if begin.is_none() && end.is_none() {
        return Err(DatasetError::MissingBound);
    }
    let n = dataset.len();
    if n == 0 {
        return Err(DatasetError::EmptySelection("dataset has no scans".to_string()));
    }
    let times = dataset.time_list();

    let first = match begin {
        None => 0,
        Some(TrimBound::Scan(index)) => index,
        Some(TrimBound::Time(t)) => times.partition_point(|&x| x < t),
    };

    let last = match end {
        None => n - 1,
        Some(TrimBound::Scan(index)) if index >= n => {
            warn!("End scan {} beyond last scan {}; trimming to end", index, n - 1);
            n - 1
        }
        Some(TrimBound::Scan(index)) => index,
        Some(TrimBound::Time(t)) => match times.partition_point(|&x| x <= t) {
            0 => {
                return Err(DatasetError::EmptySelection(format!(
                    "end {} precedes the first scan",
                    TrimBound::Time(t)
                )));
            }
            count => count - 1,
        },
    };

    if first >= n || first > last {
        return Err(DatasetError::EmptySelection(format!(
            "begin {} is after end {}",
            begin.map_or_else(|| "start".to_string(), |b| b.to_string()),
            end.map_or_else(|| "end".to_string(), |b| b.to_string()),
        )));
    }

    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_bounds() {
        assert_eq!("12.5m".parse::<TrimBound>().unwrap(), TrimBound::Time(12.5));
        assert_eq!("90s".parse::<TrimBound>().unwrap(), TrimBound::Time(1.5));
        assert_eq!(" 30 ".parse::<TrimBound>().unwrap(), TrimBound::Time(0.5));
        assert!("abc".parse::<TrimBound>().is_err());
        assert!("m".parse::<TrimBound>().is_err());
        assert!("infm".parse::<TrimBound>().is_err());
    }

    #[test]
    fn test_scan_bound_from_index() {
        assert_eq!(TrimBound::from(4), TrimBound::Scan(4));
    }
}

//! Resolution catalog and selection parsing
//!
//! Maps a user's resolution choice to the ordered list of logical resolutions
//! that go into the override. Named choices carry known-good scaling ladders
//! for their aspect ratio; anything else containing an `x` is parsed as a
//! free-form list of WIDTHxHEIGHT pairs.

use std::fmt;

use crate::error::{HiDpiError, HiDpiResult};

/// A logical resolution in points (pre-doubling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The fixed set of named resolution choices.
///
/// Each carries a hardcoded scaling ladder tuned for its panel; the lists are
/// ordered from largest to smallest logical size and are emitted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedResolution {
    R1920x1080,
    /// 1920x1080 panels that come up underscaled with the stock ladder.
    R1920x1080Fix,
    R1920x1200,
    R2560x1440,
    R3000x2000,
    R3440x1440,
}

impl NamedResolution {
    pub const ALL: [NamedResolution; 6] = [
        NamedResolution::R1920x1080,
        NamedResolution::R1920x1080Fix,
        NamedResolution::R1920x1200,
        NamedResolution::R2560x1440,
        NamedResolution::R3000x2000,
        NamedResolution::R3440x1440,
    ];

    /// The user-facing label, matched exactly during parsing.
    pub fn label(self) -> &'static str {
        match self {
            NamedResolution::R1920x1080 => "1920x1080",
            NamedResolution::R1920x1080Fix => "1920x1080 (fix underscaled)",
            NamedResolution::R1920x1200 => "1920x1200",
            NamedResolution::R2560x1440 => "2560x1440",
            NamedResolution::R3000x2000 => "3000x2000",
            NamedResolution::R3440x1440 => "3440x1440",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|named| named.label() == label)
    }

    /// The scaling ladder for this choice, largest first.
    pub fn ladder(self) -> &'static [Resolution] {
        match self {
            NamedResolution::R1920x1080 => const {
                &[
                    Resolution::new(1680, 945),
                    Resolution::new(1440, 810),
                    Resolution::new(1280, 720),
                    Resolution::new(1024, 576),
                ]
            },
            NamedResolution::R1920x1080Fix => const {
                &[
                    Resolution::new(1680, 945),
                    Resolution::new(1424, 802),
                    Resolution::new(1280, 720),
                    Resolution::new(1024, 576),
                ]
            },
            NamedResolution::R1920x1200 => const {
                &[
                    Resolution::new(1920, 1200),
                    Resolution::new(1680, 1050),
                    Resolution::new(1440, 900),
                    Resolution::new(1280, 800),
                    Resolution::new(1024, 640),
                ]
            },
            NamedResolution::R2560x1440 => const {
                &[
                    Resolution::new(2560, 1440),
                    Resolution::new(2048, 1152),
                    Resolution::new(1920, 1080),
                    Resolution::new(1680, 945),
                    Resolution::new(1440, 810),
                    Resolution::new(1280, 720),
                ]
            },
            NamedResolution::R3000x2000 => const {
                &[
                    Resolution::new(3000, 2000),
                    Resolution::new(2880, 1920),
                    Resolution::new(2250, 1500),
                    Resolution::new(1920, 1280),
                    Resolution::new(1680, 1050),
                    Resolution::new(1440, 900),
                    Resolution::new(1280, 800),
                ]
            },
            NamedResolution::R3440x1440 => const {
                &[
                    Resolution::new(3440, 1440),
                    Resolution::new(2752, 1152),
                    Resolution::new(2580, 1080),
                    Resolution::new(2365, 990),
                    Resolution::new(1935, 810),
                    Resolution::new(1720, 720),
                ]
            },
        }
    }
}

/// A validated resolution choice: one of the named ladders, or a custom
/// ordered list parsed from user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSelection {
    Named(NamedResolution),
    Custom(Vec<Resolution>),
}

impl ResolutionSelection {
    /// Parse user input into a selection.
    ///
    /// Named labels match exactly. Any other input containing `x` is custom:
    /// commas and spaces both separate entries, tokens are trimmed, empty
    /// tokens dropped, and every remaining token must be WIDTHxHEIGHT with
    /// both dimensions positive. One bad token fails the whole request.
    pub fn parse(input: &str) -> HiDpiResult<Self> {
        if let Some(named) = NamedResolution::from_label(input) {
            return Ok(ResolutionSelection::Named(named));
        }

        if input.contains('x') {
            let resolutions = input
                .replace(',', " ")
                .split(' ')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(parse_pair)
                .collect::<HiDpiResult<Vec<Resolution>>>()?;
            return Ok(ResolutionSelection::Custom(resolutions));
        }

        Err(HiDpiError::InvalidSelection(
            "invalid resolution format".to_string(),
        ))
    }

    /// The ordered logical resolutions this selection stands for.
    pub fn expand(&self) -> Vec<Resolution> {
        match self {
            ResolutionSelection::Named(named) => named.ladder().to_vec(),
            ResolutionSelection::Custom(resolutions) => resolutions.clone(),
        }
    }
}

impl fmt::Display for ResolutionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSelection::Named(named) => f.write_str(named.label()),
            ResolutionSelection::Custom(resolutions) => {
                let mut first = true;
                for resolution in resolutions {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{resolution}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

fn parse_pair(token: &str) -> HiDpiResult<Resolution> {
    let invalid = || {
        HiDpiError::InvalidSelection(format!(
            "invalid resolution format in '{token}'. Use WIDTHxHEIGHT (e.g., 1856x1044)"
        ))
    };

    let parts: Vec<&str> = token.split('x').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }

    let width: u32 = parts[0].parse().map_err(|_| invalid())?;
    let height: u32 = parts[1].parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok(Resolution::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(selection: &ResolutionSelection) -> Vec<(u32, u32)> {
        selection
            .expand()
            .into_iter()
            .map(|r| (r.width, r.height))
            .collect()
    }

    #[test]
    fn test_named_1920x1080_ladder() {
        let selection = ResolutionSelection::parse("1920x1080").unwrap();
        assert_eq!(
            selection,
            ResolutionSelection::Named(NamedResolution::R1920x1080)
        );
        assert_eq!(
            pairs(&selection),
            vec![(1680, 945), (1440, 810), (1280, 720), (1024, 576)]
        );
    }

    #[test]
    fn test_named_underscaled_fix_ladder() {
        let selection = ResolutionSelection::parse("1920x1080 (fix underscaled)").unwrap();
        assert_eq!(
            pairs(&selection),
            vec![(1680, 945), (1424, 802), (1280, 720), (1024, 576)]
        );
    }

    #[test]
    fn test_named_2560x1440_ladder() {
        let selection = ResolutionSelection::parse("2560x1440").unwrap();
        assert_eq!(
            pairs(&selection),
            vec![
                (2560, 1440),
                (2048, 1152),
                (1920, 1080),
                (1680, 945),
                (1440, 810),
                (1280, 720)
            ]
        );
    }

    #[test]
    fn test_named_1920x1200_ladder() {
        let selection = ResolutionSelection::parse("1920x1200").unwrap();
        assert_eq!(
            pairs(&selection),
            vec![
                (1920, 1200),
                (1680, 1050),
                (1440, 900),
                (1280, 800),
                (1024, 640)
            ]
        );
    }

    #[test]
    fn test_every_label_round_trips() {
        for named in NamedResolution::ALL {
            let selection = ResolutionSelection::parse(named.label()).unwrap();
            assert_eq!(selection, ResolutionSelection::Named(named));
        }
    }

    #[test]
    fn test_custom_comma_and_space_separators() {
        let selection = ResolutionSelection::parse("1856x1044, 1600x900").unwrap();
        assert_eq!(pairs(&selection), vec![(1856, 1044), (1600, 900)]);

        let selection = ResolutionSelection::parse("1856x1044 1600x900").unwrap();
        assert_eq!(pairs(&selection), vec![(1856, 1044), (1600, 900)]);
    }

    #[test]
    fn test_custom_bad_token_fails_whole_request() {
        let err = ResolutionSelection::parse("1856x1044,bad").unwrap_err();
        assert!(err.to_string().contains("'bad'"), "got: {err}");
    }

    #[test]
    fn test_custom_zero_dimension_rejected() {
        assert!(ResolutionSelection::parse("0x576").is_err());
        assert!(ResolutionSelection::parse("1024x0").is_err());
    }

    #[test]
    fn test_custom_three_part_token_rejected() {
        let err = ResolutionSelection::parse("19x20x30").unwrap_err();
        assert!(err.to_string().contains("'19x20x30'"));
    }

    #[test]
    fn test_selection_without_x_rejected() {
        let err = ResolutionSelection::parse("widescreen").unwrap_err();
        assert_eq!(err.to_string(), "invalid resolution format");
    }

    #[test]
    fn test_negative_dimension_rejected() {
        assert!(ResolutionSelection::parse("-1856x1044").is_err());
    }
}

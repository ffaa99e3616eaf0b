//! Encoding channels understood by the scatter resolver.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A Vega-Lite encoding channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Mark color.
    Color,
    /// Mark size.
    Size,
    /// Mark opacity.
    Opacity,
    /// Mark shape.
    Shape,
}

impl Channel {
    /// All channels, in encoding order.
    pub const ALL: [Channel; 6] =
        [Channel::X, Channel::Y, Channel::Color, Channel::Size, Channel::Opacity, Channel::Shape];

    /// The Vega-Lite channel name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Color => "color",
            Channel::Size => "size",
            Channel::Opacity => "opacity",
            Channel::Shape => "shape",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::unimplemented(format!("encoding channel `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(channel.as_str().parse::<Channel>().unwrap(), channel);
        }
    }

    #[test]
    fn test_unknown_channel_is_unimplemented() {
        let err = "tooltip".parse::<Channel>().unwrap_err();
        assert!(matches!(err, Error::Unimplemented(_)));
        assert!(err.to_string().contains("tooltip"));
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Opacity.to_string(), "opacity");
    }
}

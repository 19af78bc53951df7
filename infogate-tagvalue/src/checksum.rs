/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX CheckSum (tag 10).
//!
//! The checksum is the byte sum of everything before `10=`, modulo 256,
//! sent as three zero-padded digits.

use std::fmt;

/// Value of a FIX CheckSum field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum(u8);

impl Checksum {
    /// Computes the checksum of `data`.
    ///
    /// # Arguments
    /// * `data` - The frame bytes preceding the `10=` field
    ///
    /// # Example
    /// ```
    /// use infogate_tagvalue::Checksum;
    ///
    /// let checksum = Checksum::of(b"8=FIX.4.4\x019=5\x0135=0\x01");
    /// assert_eq!(Checksum::parse(&checksum.to_ascii()), Some(checksum));
    /// ```
    #[inline]
    #[must_use]
    pub fn of(data: &[u8]) -> Self {
        Self(data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)))
    }

    /// Parses the three-digit wire form.
    ///
    /// # Returns
    /// `None` unless `bytes` is exactly three digits with a value up to 255.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let [d0, d1, d2] = bytes else {
            return None;
        };
        if !(d0.is_ascii_digit() && d1.is_ascii_digit() && d2.is_ascii_digit()) {
            return None;
        }
        let value =
            u32::from(d0 - b'0') * 100 + u32::from(d1 - b'0') * 10 + u32::from(d2 - b'0');
        u8::try_from(value).ok().map(Self)
    }

    /// Returns the three-digit wire form.
    #[inline]
    #[must_use]
    pub const fn to_ascii(self) -> [u8; 3] {
        [
            b'0' + self.0 / 100,
            b'0' + (self.0 / 10) % 10,
            b'0' + self.0 % 10,
        ]
    }

    /// Returns the numeric value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_of() {
        assert_eq!(Checksum::of(b"").value(), 0);
        assert_eq!(Checksum::of(b"ABC").value(), 198);
        let data = vec![255u8; 1000];
        assert_eq!(Checksum::of(&data).value(), ((255u32 * 1000) % 256) as u8);
    }

    #[test]
    fn test_checksum_ascii() {
        assert_eq!(Checksum(0).to_ascii(), *b"000");
        assert_eq!(Checksum(42).to_ascii(), *b"042");
        assert_eq!(Checksum(255).to_string(), "255");
    }

    #[test]
    fn test_checksum_parse() {
        assert_eq!(Checksum::parse(b"042"), Some(Checksum(42)));
        assert_eq!(Checksum::parse(b"255"), Some(Checksum(255)));
        assert_eq!(Checksum::parse(b"256"), None);
        assert_eq!(Checksum::parse(b"42"), None);
        assert_eq!(Checksum::parse(b"0420"), None);
        assert_eq!(Checksum::parse(b"4X2"), None);
    }
}

//! Behavioral command flags packed into a bitmask.
//!
//! The manifest carries a command's flags as a plain integer. [`FlagSet`]
//! decodes it against the closed [`Flag`] enumeration and renders the result
//! as the sorted, comma-joined list of names used in the generated docs.

use std::fmt;

/// A named behavioral attribute of a command.
///
/// # Examples
///
/// ```
/// use command_api_core::Flag;
///
/// assert_eq!(Flag::Hidden.bit(), 1 << 5);
/// assert_eq!(Flag::Mgr.name(), "mgr");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Not forwarded to the leader.
    NoForward,
    /// Superseded by another command.
    Obsolete,
    /// Scheduled for removal.
    Deprecated,
    /// Served by the manager daemon.
    Mgr,
    /// Intended for repeated polling.
    Poll,
    /// Never documented.
    Hidden,
}

impl Flag {
    /// Every known flag, in bit order.
    pub const ALL: [Flag; 6] = [
        Flag::NoForward,
        Flag::Obsolete,
        Flag::Deprecated,
        Flag::Mgr,
        Flag::Poll,
        Flag::Hidden,
    ];

    /// Returns the bit value of this flag.
    pub const fn bit(self) -> u64 {
        match self {
            Flag::NoForward => 1 << 0,
            Flag::Obsolete => 1 << 1,
            Flag::Deprecated => 1 << 2,
            Flag::Mgr => 1 << 3,
            Flag::Poll => 1 << 4,
            Flag::Hidden => 1 << 5,
        }
    }

    /// Returns the name printed in the generated docs.
    pub const fn name(self) -> &'static str {
        match self {
            Flag::NoForward => "no_forward",
            Flag::Obsolete => "obsolete",
            Flag::Deprecated => "deprecated",
            Flag::Mgr => "mgr",
            Flag::Poll => "poll",
            Flag::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded set of command flags.
///
/// A flag is a member when its bit is fully contained in the mask, so a
/// future flag made of several OR'd bits does not disturb the single-bit
/// legacy flags. Unknown bits are ignored.
///
/// Members are kept sorted by name; the [`Display`](fmt::Display) form joins
/// them with `", "`.
///
/// # Examples
///
/// ```
/// use command_api_core::{Flag, FlagSet};
///
/// let flags = FlagSet::from_bits(Flag::Poll.bit() | Flag::Deprecated.bit() | 1 << 40);
/// assert_eq!(flags.to_string(), "deprecated, poll");
/// assert!(flags.contains(Flag::Poll));
/// assert!(!flags.contains(Flag::Hidden));
///
/// assert!(FlagSet::from_bits(0).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlagSet {
    members: Vec<Flag>,
}

impl FlagSet {
    /// Decodes a raw bitmask.
    pub fn from_bits(bits: u64) -> Self {
        let mut members: Vec<Flag> = Flag::ALL
            .into_iter()
            .filter(|flag| bits & flag.bit() == flag.bit())
            .collect();
        members.sort_by_key(|flag| flag.name());
        Self { members }
    }

    /// Returns `true` when no known flag is set.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Exact membership test.
    pub fn contains(&self, flag: Flag) -> bool {
        self.members.contains(&flag)
    }

    /// Legacy membership test by name.
    ///
    /// Checks whether `name` occurs anywhere in the rendered text, so a name
    /// that is a substring of another member's name also matches. Prefer
    /// [`contains`](Self::contains).
    ///
    /// # Examples
    ///
    /// ```
    /// use command_api_core::{Flag, FlagSet};
    ///
    /// let flags = FlagSet::from_bits(Flag::NoForward.bit());
    /// assert!(flags.mentions("no_forward"));
    /// assert!(flags.mentions("forward"));
    /// ```
    pub fn mentions(&self, name: &str) -> bool {
        self.to_string().contains(name)
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, flag) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
        }
        Ok(())
    }
}

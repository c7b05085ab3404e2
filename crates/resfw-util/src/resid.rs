//! Resource-identifier packing and unpacking.
//!
//! A resource identifier is a `u32` laid out as `0xPPTTEEEE`: package ID
//! in bits 31–24 (1-based, 0 = not yet assigned), type ID in bits 23–16
//! (1-based, 0 = no type), entry ID in bits 15–0 (0-based). The layout is
//! wire-compatible with compiled resource tables, so the shift amounts and
//! masks here must not change.
//!
//! Every function in this module is a pure, total function over the full
//! `u32` domain. Out-of-range logical fields (a type byte of 0, say) are
//! ordinary values detectable via [`is_valid`] and [`is_internal`], not
//! errors.

use std::fmt;

/// OR a package ID into the top byte of `resid`.
///
/// This merges rather than replaces: callers assigning a fresh package
/// pass a `resid` whose top byte is already zero. Downstream consumers
/// rely on the OR semantics, so it stays a plain OR.
#[inline]
pub fn fix_package_id(resid: u32, package_id: u8) -> u32 {
    resid | (u32::from(package_id) << 24)
}

/// Extract the package ID (bits 31–24).
#[inline]
pub fn package_id(resid: u32) -> u8 {
    (resid >> 24) as u8
}

/// Extract the type ID (bits 23–16).
///
/// Type IDs are 1-based; a return of 0 means "no type".
#[inline]
pub fn type_id(resid: u32) -> u8 {
    (resid >> 16) as u8
}

/// Extract the entry ID (bits 15–0). Entry IDs are 0-based.
#[inline]
pub fn entry_id(resid: u32) -> u16 {
    resid as u16
}

/// Pack the three fields into a resource identifier.
#[inline]
pub fn make(package_id: u8, type_id: u8, entry_id: u16) -> u32 {
    (u32::from(package_id) << 24) | (u32::from(type_id) << 16) | u32::from(entry_id)
}

/// Whether `resid` is an internally synthesized placeholder: the package
/// byte is set but the type byte is not. Such IDs never appear in a
/// finalized resource table.
#[inline]
pub fn is_internal(resid: u32) -> bool {
    (resid & 0xffff_0000) != 0 && (resid & 0x00ff_0000) == 0
}

/// Whether `resid` is a fully assigned identifier: both the package byte
/// and the type byte are non-zero.
#[inline]
pub fn is_valid(resid: u32) -> bool {
    (resid & 0x00ff_0000) != 0 && (resid & 0xff00_0000) != 0
}

/// A packed resource identifier.
///
/// Thin newtype over the raw `u32` for call sites that pass identifiers
/// around; the free functions in this module remain the primitive API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResId(pub u32);

impl ResId {
    /// Pack the three fields into an identifier.
    pub fn new(package_id: u8, type_id: u8, entry_id: u16) -> Self {
        Self(make(package_id, type_id, entry_id))
    }

    /// The package ID (top byte).
    pub fn package_id(self) -> u8 {
        package_id(self.0)
    }

    /// The type ID (second byte); 0 means "no type".
    pub fn type_id(self) -> u8 {
        type_id(self.0)
    }

    /// The entry ID (low 16 bits).
    pub fn entry_id(self) -> u16 {
        entry_id(self.0)
    }

    /// A copy with `package_id` OR-merged into the top byte.
    ///
    /// See [`fix_package_id`] for the merge semantics.
    #[must_use]
    pub fn with_package_id(self, package_id: u8) -> Self {
        Self(fix_package_id(self.0, package_id))
    }

    /// Whether both the package and type bytes are assigned.
    pub fn is_valid(self) -> bool {
        is_valid(self.0)
    }

    /// Whether this is an internally synthesized placeholder.
    pub fn is_internal(self) -> bool {
        is_internal(self.0)
    }
}

impl fmt::Display for ResId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<u32> for ResId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<ResId> for u32 {
    fn from(id: ResId) -> Self {
        id.0
    }
}

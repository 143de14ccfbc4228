use bitflags::bitflags;

bitflags! {
    /// Bits stored in the mask of a public signature.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SignatureFlags: i64 {
        /// The declaration, or one of its containers, is `expect`.
        const IS_EXPECT = 1;
    }
}

impl SignatureFlags {
    /// `flag` when `on`, empty otherwise.
    #[inline]
    pub const fn encode(flag: Self, on: bool) -> Self {
        if on { flag } else { Self::empty() }
    }
}

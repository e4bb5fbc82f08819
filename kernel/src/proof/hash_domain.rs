//! Typed domain separators for canonical hashing.
//!
//! Every digest in lodestar picks its prefix from [`HashDomain`]; no other
//! module spells out a `LODESTAR::` byte string. One macro invocation
//! generates the enum, `as_bytes()`, `ALL` and `Display`, so adding a domain
//! is a one-line change.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            ///
            /// Generated from the same list as the enum.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Run report hashing (the determinism digest of one strategy run).
    RunReport => b"LODESTAR::RUN_REPORT::V1\0",

    /// Strategy snapshot hashing (engine choice plus its policy).
    StrategySnapshot => b"LODESTAR::STRATEGY_SNAPSHOT::V1\0",

    /// World fixture hashing (the serialized definition of a sample domain).
    WorldFixture => b"LODESTAR::WORLD_FIXTURE::V1\0",

    /// Benchmark determinism guard.
    BenchGuard => b"LODESTAR::BENCH_GUARD::V1\0",
}

#![allow(unused_imports)]

mod definitions {
    /// Stable stand-in for the integer `isolate_highest_one` intrinsic.
    pub trait IsolateHighestOne: Sized {
        fn isolate_highest_one(self) -> Self;
    }

    macro_rules! isolate_highest_one {
        ($($t:ty),* $(,)?) => {$(
            #[cfg(not(feature = "isolate_most_least_significant_one"))]
            impl IsolateHighestOne for $t {
                // Smear the highest set bit into every lower position, then keep
                // only the top one.
                #[inline]
                fn isolate_highest_one(self) -> Self {
                    let mut n = self;
                    let mut shift = 1;
                    while shift < <$t>::BITS {
                        n |= n >> shift;
                        shift <<= 1;
                    }
                    n & !(n >> 1)
                }
            }
        )*};
    }

    isolate_highest_one!(u8, u16, u32, u64, u128, usize);
}

pub(crate) use definitions::IsolateHighestOne as _;

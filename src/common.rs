use std::num::NonZeroU64;

pub type Int = i64;
pub type UInt = u64;
pub type NonZeroUInt = NonZeroU64;

pub type Float = f64;

mod force_big_int;

pub use force_big_int::*;

mod big_int;
mod column_value;

pub use big_int::*;
pub use column_value::*;

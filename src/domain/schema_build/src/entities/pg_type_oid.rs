use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Catalog identifier of a PostgreSQL type (`pg_type.oid`).
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PgTypeOid(pub u32);

impl PgTypeOid {
    pub const BOOL: Self = Self(16);
    pub const NAME: Self = Self(19);
    pub const INT8: Self = Self(20);
    pub const INT2: Self = Self(21);
    pub const INT4: Self = Self(23);
    pub const TEXT: Self = Self(25);
    pub const JSON: Self = Self(114);
    pub const FLOAT4: Self = Self(700);
    pub const FLOAT8: Self = Self(701);
    pub const BPCHAR: Self = Self(1042);
    pub const VARCHAR: Self = Self(1043);
    pub const DATE: Self = Self(1082);
    pub const TIMESTAMP: Self = Self(1114);
    pub const TIMESTAMPTZ: Self = Self(1184);
    pub const NUMERIC: Self = Self(1700);
    pub const UUID: Self = Self(2950);
    pub const JSONB: Self = Self(3802);
}

impl Display for PgTypeOid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PgTypeOid {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

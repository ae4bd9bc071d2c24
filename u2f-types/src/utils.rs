#[macro_use]
pub(crate) mod repr_enum;

//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never deals with nullable columns or placeholder years.

pub mod member;

#[cfg(test)]
mod test;

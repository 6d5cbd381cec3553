/// Price in quote currency units
/// Prices are model quantities fed through exp/ln, so plain f64 is used
pub type Price = f64;

/// Cash balance in quote currency units
pub type Cash = f64;

/// Signed inventory in whole units (positive = long, negative = short)
pub type Inventory = i64;

/// Seed for a trial's random sources
pub type Seed = u64;

//! Value objects - Immutable objects defined by their attributes

mod life_gauge;

pub use life_gauge::LifeGauge;

pub mod interpolator;

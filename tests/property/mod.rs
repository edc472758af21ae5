//! Property-based tests over randomly shaped queries

mod sample_shape;

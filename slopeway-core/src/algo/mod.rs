//! Graph algorithms that derive views from the base slope graph

pub mod threshold;

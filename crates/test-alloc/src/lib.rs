//! Demo crate for alloctap; see the examples.

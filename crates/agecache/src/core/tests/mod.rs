//! Tests for the memory cache engine

mod aging;

//! The memory cache engine
//!
//! [`MemoryCache`] is a cheap-to-clone handle. All work enters through the
//! access coordinator: lookups run concurrently with each other, while sets,
//! removals, trims and clears run alone. Every operation comes in three
//! shapes: a non-blocking method returning a [`Completion`](crate::Completion),
//! a `*_with` variant taking a completion callback, and a `*_blocking` mirror.

mod age;
mod blocking;
mod builder;
mod hooks;
mod operations;
mod shared;
mod types;

pub use builder::MemoryCacheBuilder;
pub use types::MemoryCache;

#[cfg(test)]
mod tests;

//! ## Intro
//!
//! A growable vector that keeps small collections in an inline buffer and
//! moves them to the heap only when they outgrow it.
//!
//! Similar to [`SmallVec`], but the storage location is a pure function of
//! the current length: at up to `N` elements the buffer lives inline, above
//! `N` it lives on the heap, and shrinking operations migrate back inline
//! as soon as the length allows it. There is no way to pin a small vector
//! to the heap or a large one to the stack.
//!
//! Heap capacity is just as predictable. Whenever the heap buffer has to
//! grow it is sized to one and a half times the length the vector will
//! have after the pending operation; the underlying allocation never
//! doubles behind your back.
//!
//! ```
//! # use hybridvec::{HybridVec, hybridvec};
//! let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4];
//! assert!(vec.is_inline());
//!
//! // Pushing past the inline capacity migrates to the heap.
//! vec.push(5);
//! assert!(!vec.is_inline());
//! assert_eq!(vec.capacity(), 7);
//!
//! // Shrinking back to the threshold migrates inline again.
//! vec.pop();
//! assert!(vec.is_inline());
//! assert_eq!(vec.capacity(), 4);
//! ```
//!
//! `HybridVec<T>` without an explicit inline capacity holds 16 elements
//! before it spills.
//!
//! Note: when the amount of data is large this is not as good as [`Vec`]
//! because every operation carries a storage check; the payoff is the
//! allocation-free small case and the predictable capacity sequence.
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`, making it suitable for
//! embedded and no_std environments.
//!
//! ## Optional features
//!
//! ### `std`
//!
//! Implements [`std::io::Write`] for `HybridVec<u8, N>`.
//!
//! ### `serde`
//!
//! When this optional dependency is enabled,
//! [`HybridVec`] implements the [`serde::Serialize`] and [`serde::Deserialize`] traits.
//!
//! [`serde::Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`serde::Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html
//! [`SmallVec`]: https://docs.rs/smallvec/latest/smallvec
//! [`std::io::Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
//! [`Vec`]: alloc::vec::Vec
#![no_std]

extern crate alloc;

mod error;
mod growth;
mod inline;
mod utils;

pub mod hybrid_vec;

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "std")]
mod std_io;

#[doc(inline)]
pub use hybrid_vec::{HybridVec, IntoIter};

pub use error::OutOfRange;

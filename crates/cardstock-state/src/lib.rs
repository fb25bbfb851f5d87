//! Observable key-path state tree.
//!
//! A single `StateTree` instance holds the whole client-side application
//! state as one JSON document. Route guards and presentation consumers share
//! it by reference; every read and write goes through a [`Path`] into the
//! document. Writers always overwrite the whole value at a path — there is
//! no partial in-place mutation — and every write notifies subscribers of
//! that exact path.
//!
//! An absent path is the "no value yet" sentinel: [`StateTree::get`] returns
//! `None` until something is written.

mod error;
mod path;
mod tree;

pub use error::{value_type_name, StateError, StateResult};
pub use path::{parse_path, Path, Seg};
pub use tree::{StateTree, Subscription};

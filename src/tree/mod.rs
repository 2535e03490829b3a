//! Filesystem steps applied to the destination tree
//!
//! - **copy**: materialize the template into a new directory
//! - **clean**: strip version-control and build/cache directories
//! - **relocate**: move package directories to the new dotted package
//! - **rename**: rename source files named after template classes
//! - **substitute**: rewrite text files with the replacement plan
//!
//! Each step re-walks the tree from disk and assumes the previous ones ran.

pub mod clean;
pub mod copy;
pub mod relocate;
pub mod rename;
pub mod substitute;

//! Command Descriptor Tree
//!
//! The hierarchy of command labels, aliases and subcommands the product
//! exposes. Descriptors live in an arena owned by [`DescriptorTree`]; parent
//! and child links are [`DescriptorId`] indices into it.

pub mod catalog;
pub mod tree;

pub use tree::{CommandDescriptor, DescriptorId, DescriptorTree, DescriptorTreeBuilder};

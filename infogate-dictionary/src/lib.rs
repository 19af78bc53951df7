/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # InfoGate Dictionary
//!
//! Field directory for the InfoGate codec.
//!
//! This crate provides:
//! - **Schema definitions**: semantic types, field, member, group and message layouts
//! - **Directory**: validated, immutable tag lookup built once at start-up,
//!   loadable from any serde format
//! - **HNX table**: the built-in HNX InfoGate field and group definitions

pub mod directory;
pub mod hnx;
pub mod schema;

pub use directory::{Directory, DirectoryBuilder, DirectoryError};
pub use schema::{
    Cardinality, DefaultPolicy, FieldDef, GroupDef, Layout, MemberDef, MessageDef, SemanticType,
};

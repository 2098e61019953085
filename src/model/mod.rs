//! # Movie Graph Model
//!
//! Plain data types shared by every stage: builder ↔ filters ↔ null models ↔
//! analyses. This module is pure data with no I/O and no randomness.

pub mod node;
pub mod edge;
pub mod demographics;
pub mod value;
pub mod property_map;
pub mod record;

pub use node::{
    Node, NodeId, NodeKind, NodeAttributes, MovieAttributes, PersonAttributes, Role,
    unique_movie_id,
};
pub use edge::{Edge, EdgeId, EdgeKind, Direction};
pub use demographics::{Demographics, Gender, Race};
pub use value::Value;
pub use property_map::PropertyMap;
pub use record::MovieRecord;

//! Follow module - directed follower -> followed edges.
//!
//! Edges are unique per ordered pair and carry no state beyond their
//! creation time. Follower and followed lists are derived from the edge
//! set and never stored on the user.

mod edge;

pub use edge::FollowEdge;

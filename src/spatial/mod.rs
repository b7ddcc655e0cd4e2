pub mod neighbors;

pub use neighbors::{NeighborLists, are_neighbors, neighbor_lists};

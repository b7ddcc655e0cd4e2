pub mod disparity;
pub mod diversity;
pub mod threshold;

pub mod cells;
pub mod cli;
pub mod config;
pub mod ctx;
pub mod geneset;
pub mod io;
pub mod math;
pub mod pipeline;
pub mod schema;
pub mod scores;
pub mod spatial;

// Container framing structures
//
// This module provides line classification and chunk header parsing for
// .mda containers.

pub mod chunk_header;
pub mod container_line;

pub use chunk_header::{ChunkHeader, prefix_padding};
pub use container_line::{ContainerLine, LineReader};

#![forbid(unsafe_code)]

pub mod adjust;
pub mod blend;
pub mod color;
pub mod compose;
pub mod config;
pub mod core;
pub mod curves;
pub mod encode;
pub mod error;
pub mod model;
pub mod resolver;

pub use adjust::AdjustmentInstance;
pub use blend::{BlendMask, blend};
pub use color::parse_color;
pub use compose::CompositionTree;
pub use config::{build_stack, stack_from_json_str};
pub use self::core::{MaskChannel, Raster, Rgba, TileCoord};
pub use error::{TilestackError, TilestackResult};
pub use model::{Layer, Node, Stack};
pub use resolver::{MapResolver, Resolver};

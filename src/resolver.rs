use std::collections::BTreeMap;

use crate::core::{MaskChannel, Raster, TileCoord};
use crate::error::{TilestackError, TilestackResult};

/// Resolves a layer name to pixel data for one tile coordinate. This is the
/// compositor's only collaborator with I/O or latency; tile fetching,
/// caching and retry policy all live behind this trait. Any lookup failure
/// surfaces as `SourceUnavailable` and is propagated without retry.
pub trait Resolver {
    fn fetch_rgba(&self, name: &str, coord: TileCoord) -> TilestackResult<Raster>;

    fn fetch_mask(&self, name: &str, coord: TileCoord) -> TilestackResult<MaskChannel>;
}

/// In-memory resolver backed by a name -> raster table, ignoring the tile
/// coordinate. Masks are the greyscale (luma) interpretation of the stored
/// raster. Used by the test suite and handy for demos.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    tiles: BTreeMap<String, Raster>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, tile: Raster) -> &mut Self {
        self.tiles.insert(name.into(), tile);
        self
    }
}

impl Resolver for MapResolver {
    fn fetch_rgba(&self, name: &str, _coord: TileCoord) -> TilestackResult<Raster> {
        self.tiles
            .get(name)
            .cloned()
            .ok_or_else(|| TilestackError::source_unavailable(name))
    }

    fn fetch_mask(&self, name: &str, coord: TileCoord) -> TilestackResult<MaskChannel> {
        let raster = self.fetch_rgba(name, coord)?;
        Ok(MaskChannel::from_rgba_luma(&raster))
    }
}

use crate::adjust::apply_adjustments;
use crate::blend::{BlendMask, blend};
use crate::color::parse_color;
use crate::core::{Raster, TileCoord};
use crate::error::{TilestackError, TilestackResult};
use crate::model::{Layer, Node, Stack};
use crate::resolver::Resolver;

impl Node {
    /// Composite this node over `input` and return the updated raster.
    /// `input` is the partially composited accumulator from the siblings
    /// painted so far.
    pub fn render(
        &self,
        input: &Raster,
        coord: TileCoord,
        resolver: &dyn Resolver,
    ) -> TilestackResult<Raster> {
        match self {
            Node::Layer(layer) => layer.render(input, coord, resolver),
            Node::Stack(stack) => stack.render(input, coord, resolver),
        }
    }
}

impl Layer {
    /// Resolve this layer's source/color/mask and composite it over `input`.
    ///
    /// The combination branches, in precedence order:
    /// - source + color + mask: illegal.
    /// - source + mask: the source is first laid onto a transparent canvas
    ///   through the mask (opacity 1, plain mode), then that masked source
    ///   is blended over `input` self-masked with the layer's opacity/mode.
    /// - color + mask: the constant-color raster blends over `input` with
    ///   the mask as the blend field.
    /// - source + color: two self-masked passes, color beneath source.
    /// - source only / color only: a single self-masked blend.
    /// - mask only, or nothing at all: illegal.
    pub fn render(
        &self,
        input: &Raster,
        coord: TileCoord,
        resolver: &dyn Resolver,
    ) -> TilestackResult<Raster> {
        tracing::debug!(
            source = self.source.as_deref(),
            color = self.color.as_deref(),
            mask = self.mask.as_deref(),
            "render layer"
        );

        let source = match &self.source {
            Some(name) => {
                let mut raster = resolver.fetch_rgba(name, coord)?;
                apply_adjustments(&mut raster, &self.adjustments)?;
                Some(raster)
            }
            None => None,
        };

        let color = match &self.color {
            Some(spec) => Some(Raster::from_color(
                input.width(),
                input.height(),
                parse_color(spec)?,
            )),
            None => None,
        };

        let mask = match &self.mask {
            Some(name) => Some(resolver.fetch_mask(name, coord)?),
            None => None,
        };

        let opacity = self.opacity;
        let mode = self.mode.as_deref();

        match (&source, &color, &mask) {
            (Some(_), Some(_), Some(_)) => Err(TilestackError::ConflictingLayerSpec(format!(
                "\"{}\", \"{}\", \"{}\"",
                self.source.as_deref().unwrap_or_default(),
                self.color.as_deref().unwrap_or_default(),
                self.mask.as_deref().unwrap_or_default(),
            ))),
            (Some(src), None, Some(m)) => {
                let canvas = Raster::transparent(input.width(), input.height());
                let masked = blend(&canvas, src, &BlendMask::Field(m), 1.0, None)?;
                blend(input, &masked, &BlendMask::Alpha(&masked), opacity, mode)
            }
            (None, Some(fill), Some(m)) => blend(input, fill, &BlendMask::Field(m), opacity, mode),
            (Some(src), Some(fill), None) => {
                let below = blend(input, fill, &BlendMask::Alpha(fill), opacity, mode)?;
                blend(&below, src, &BlendMask::Alpha(src), opacity, mode)
            }
            (Some(src), None, None) => blend(input, src, &BlendMask::Alpha(src), opacity, mode),
            (None, Some(fill), None) => blend(input, fill, &BlendMask::Alpha(fill), opacity, mode),
            (None, None, Some(_)) => Err(TilestackError::MaskWithoutContent(
                self.mask.clone().unwrap_or_default(),
            )),
            (None, None, None) => Err(TilestackError::EmptyLayerSpec),
        }
    }
}

impl Stack {
    /// Paint each child in order over a fresh transparent scratch raster,
    /// then paste the scratch over a copy of `input`, self-masked by the
    /// scratch's own alpha. An empty stack leaves `input` unchanged.
    pub fn render(
        &self,
        input: &Raster,
        coord: TileCoord,
        resolver: &dyn Resolver,
    ) -> TilestackResult<Raster> {
        let mut scratch = Raster::transparent(input.width(), input.height());
        for child in &self.children {
            scratch = child.render(&scratch, coord, resolver)?;
        }
        blend(input, &scratch, &BlendMask::Alpha(&scratch), 1.0, None)
    }
}

/// The root of a composition, built once from configuration and reused
/// across tile renders. The resolver is passed into every render call so
/// the tree itself stays read-only and shareable.
#[derive(Clone, Debug)]
pub struct CompositionTree {
    root: Node,
}

impl CompositionTree {
    pub fn new(root: impl Into<Node>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Render one tile: evaluate the tree depth-first over a transparent
    /// canvas of the requested dimensions. Returns a full raster or fails;
    /// never partial output.
    #[tracing::instrument(skip(self, resolver))]
    pub fn render(
        &self,
        width: u32,
        height: u32,
        coord: TileCoord,
        resolver: &dyn Resolver,
    ) -> TilestackResult<Raster> {
        let canvas = Raster::transparent(width, height);
        self.root.render(&canvas, coord, resolver)
    }
}

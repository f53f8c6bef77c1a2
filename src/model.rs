use crate::adjust::AdjustmentInstance;

/// A single compositing unit: at most one of a named source layer or a solid
/// fill color, an optional named mask, an opacity, an optional blend mode
/// tag and an ordered adjustment list.
///
/// Which combinations of source/color/mask are legal is checked at render
/// time, not here; the tree-construction adapter deliberately defers that
/// policy to the compositor.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub source: Option<String>,
    pub color: Option<String>,
    pub mask: Option<String>,
    pub opacity: f32,
    pub mode: Option<String>,
    pub adjustments: Vec<AdjustmentInstance>,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            source: None,
            color: None,
            mask: None,
            opacity: 1.0,
            mode: None,
            adjustments: Vec::new(),
        }
    }
}

impl Layer {
    pub fn from_source(name: impl Into<String>) -> Self {
        Self {
            source: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn from_color(spec: impl Into<String>) -> Self {
        Self {
            color: Some(spec.into()),
            ..Self::default()
        }
    }

    pub fn with_mask(mut self, name: impl Into<String>) -> Self {
        self.mask = Some(name.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_adjustments(mut self, adjustments: Vec<AdjustmentInstance>) -> Self {
        self.adjustments = adjustments;
        self
    }
}

/// An ordered sequence of child nodes. Order is paint order: first child at
/// the bottom, last on top.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Stack {
    pub children: Vec<Node>,
}

impl Stack {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// A renderable node in the composition tree. The variant set is closed:
/// every node is either a single layer or a nested stack.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Node {
    Layer(Layer),
    Stack(Stack),
}

impl From<Layer> for Node {
    fn from(layer: Layer) -> Self {
        Node::Layer(layer)
    }
}

impl From<Stack> for Node {
    fn from(stack: Stack) -> Self {
        Node::Stack(stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_defaults_to_full_opacity_plain_mode() {
        let layer = Layer::default();
        assert_eq!(layer.opacity, 1.0);
        assert!(layer.mode.is_none());
        assert!(layer.adjustments.is_empty());
    }

    #[test]
    fn builders_populate_fields() {
        let layer = Layer::from_source("streets")
            .with_mask("halos")
            .with_opacity(0.5)
            .with_mode("hard light");
        assert_eq!(layer.source.as_deref(), Some("streets"));
        assert_eq!(layer.mask.as_deref(), Some("halos"));
        assert_eq!(layer.opacity, 0.5);
        assert_eq!(layer.mode.as_deref(), Some("hard light"));
    }

    #[test]
    fn json_roundtrip() {
        let node = Node::Stack(Stack::new(vec![
            Layer::from_color("#ff9900").into(),
            Node::Stack(Stack::new(vec![Layer::from_source("streets").into()])),
        ]));
        let s = serde_json::to_string(&node).unwrap();
        let de: Node = serde_json::from_str(&s).unwrap();
        match de {
            Node::Stack(stack) => assert_eq!(stack.children.len(), 2),
            Node::Layer(_) => panic!("expected a stack"),
        }
    }
}

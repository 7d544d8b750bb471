//! Collision layers and immutable layer filters.
//!
//! Every collider lives on exactly one [`Layer`].  Casts and overlap queries
//! take a [`LayerFilter`], a small `Copy` value built once (usually at agent
//! construction) and never mutated afterwards.

use std::fmt;

/// The layer a collider is registered on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// Ground tiles the agents stand on.
    Ground,
    /// Player-placed buildings.
    Building,
    /// Level scenery that blocks sight like a building.
    Scenery,
    /// The actor agents hunt.
    Target,
    /// Patrol agent bodies.
    Agent,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Ground,
        Layer::Building,
        Layer::Scenery,
        Layer::Target,
        Layer::Agent,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// How contacts and cast hits against this layer are treated.
    #[inline]
    pub fn classification(self) -> Classification {
        match self {
            Layer::Target                    => Classification::Target,
            Layer::Agent                     => Classification::Peer,
            Layer::Building | Layer::Scenery => Classification::Obstacle,
            Layer::Ground                    => Classification::Other,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Layer::Ground   => "ground",
            Layer::Building => "building",
            Layer::Scenery  => "scenery",
            Layer::Target   => "target",
            Layer::Agent    => "agent",
        };
        f.write_str(s)
    }
}

/// Closed classification of whatever a cast or contact touched.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    Target,
    Peer,
    Obstacle,
    Other,
}

// ── LayerFilter ───────────────────────────────────────────────────────────────

/// An immutable set of layers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerFilter(u8);

impl LayerFilter {
    pub const NONE: LayerFilter = LayerFilter(0);
    pub const ALL: LayerFilter = LayerFilter(0b1_1111);

    /// What a patrolling agent can see: the target and anything that blocks
    /// line of sight to it.  Other agents are transparent to the forward cast.
    pub const SIGHT: LayerFilter = LayerFilter::NONE
        .with(Layer::Target)
        .with(Layer::Building)
        .with(Layer::Scenery);

    /// Ground tiles only.
    pub const GROUND: LayerFilter = LayerFilter::NONE.with(Layer::Ground);

    /// Everything an agent body reacts to on contact.
    pub const CONTACT: LayerFilter = LayerFilter::NONE
        .with(Layer::Target)
        .with(Layer::Agent);

    /// Filter holding exactly `layers`.
    pub fn of(layers: &[Layer]) -> Self {
        layers.iter().fold(Self::NONE, |f, &l| f.with(l))
    }

    /// Copy of `self` with `layer` added.
    #[inline]
    pub const fn with(self, layer: Layer) -> Self {
        LayerFilter(self.0 | layer.bit())
    }

    /// Copy of `self` with `layer` removed.
    #[inline]
    pub const fn without(self, layer: Layer) -> Self {
        LayerFilter(self.0 & !layer.bit())
    }

    #[inline]
    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the member layers in declaration order.
    pub fn layers(self) -> impl Iterator<Item = Layer> {
        Layer::ALL.into_iter().filter(move |&l| self.contains(l))
    }
}

impl fmt::Debug for LayerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.layers()).finish()
    }
}

use crate::{bird::Bird, obstacle::Obstacle};

/// Identifies one drawable entity for the lifetime of a [`World`](crate::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct EntityId(u64);

impl EntityId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing [`EntityId`]s.
#[derive(Debug, Default, Clone)]
pub(crate) struct EntityIds {
    next: u64,
}

impl EntityIds {
    pub(crate) fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Visual collaborator driven by the simulation.
///
/// The world calls `draw_*` after moving an entity and `destroy` exactly once when the entity
/// leaves the simulation. Nothing the renderer does can influence the simulation.
pub trait Renderer {
    fn draw_bird(&mut self, id: EntityId, bird: &Bird);
    fn draw_obstacle(&mut self, id: EntityId, obstacle: &Obstacle);
    fn destroy(&mut self, id: EntityId);
}

/// A renderer that draws nothing, for headless training and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_bird(&mut self, _id: EntityId, _bird: &Bird) {}

    fn draw_obstacle(&mut self, _id: EntityId, _obstacle: &Obstacle) {}

    fn destroy(&mut self, _id: EntityId) {}
}

impl<R> Renderer for &mut R
where
    R: Renderer + ?Sized,
{
    fn draw_bird(&mut self, id: EntityId, bird: &Bird) {
        (**self).draw_bird(id, bird);
    }

    fn draw_obstacle(&mut self, id: EntityId, obstacle: &Obstacle) {
        (**self).draw_obstacle(id, obstacle);
    }

    fn destroy(&mut self, id: EntityId) {
        (**self).destroy(id);
    }
}

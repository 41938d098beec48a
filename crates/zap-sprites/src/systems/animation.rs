//! Animation system: advances every active sprite by one logical tick.

use crate::api::context::SpriteContext;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// What happened to a sprite's animation during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEventKind {
    FrameChanged,
    /// A Once sequence reached its end, or a ping-pong cycle returned home.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteEvent {
    pub id: EntityId,
    pub kind: SpriteEventKind,
}

/// Update every active sprite once, in scene order.
///
/// Frame changes are pushed before completions for the same sprite.
pub fn tick_sprites(scene: &mut Scene, ctx: &SpriteContext, events: &mut Vec<SpriteEvent>) {
    for sprite in scene.iter_mut() {
        if !sprite.active {
            continue;
        }
        let tick = sprite.update(ctx);
        if tick.frame_changed {
            events.push(SpriteEvent { id: sprite.id, kind: SpriteEventKind::FrameChanged });
        }
        if tick.completed {
            events.push(SpriteEvent { id: sprite.id, kind: SpriteEventKind::Completed });
        }
    }
}

/// Feed a wall-clock delta through the context's timestep and run the
/// resulting number of ticks. Returns the ticks run.
pub fn step(scene: &mut Scene, ctx: &mut SpriteContext, frame_dt: f32, events: &mut Vec<SpriteEvent>) -> u32 {
    let ticks = ctx.timestep_mut().accumulate(frame_dt);
    for _ in 0..ticks {
        tick_sprites(scene, ctx, events);
    }
    ticks
}

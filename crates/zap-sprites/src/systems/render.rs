use crate::api::context::SpriteContext;
use crate::core::scene::Scene;
use crate::renderer::traits::QuadRenderer;

/// Draw every active sprite in scene order. Returns the number of quads drawn.
///
/// Sprites that are hidden, unbound or bound to a removed atlas draw nothing.
pub fn render_scene(scene: &Scene, ctx: &SpriteContext, renderer: &mut dyn QuadRenderer) -> u32 {
    let mut drawn = 0;
    for sprite in scene.iter() {
        if !sprite.active {
            continue;
        }
        if sprite.render(ctx, renderer) {
            drawn += 1;
        }
    }
    drawn
}

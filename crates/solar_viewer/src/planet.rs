use bevy::prelude::*;
use bevy_egui::egui::Color32;
use orbit_scene::scene::Label;
use orbit_scene::NodeId;

/// Links an entity to the scene graph node it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct SceneNode(pub NodeId);

/// Text painted over the label's anchor every frame.
#[derive(Debug, Clone, Component)]
pub struct LabelText {
    pub text: String,
    pub color: Color32,
    /// Height of one line of text in world units
    pub world_height: f32,
}

impl LabelText {
    pub fn new(label: &Label) -> Self {
        let texture = &label.texture;
        let sprite_height = label.transform.scale.y as f32;

        Self {
            text: texture.text.clone(),
            color: Color32::from_rgb(texture.color.r(), texture.color.g(), texture.color.b()),
            // The glyphs take up font_size of the canvas' height
            world_height: sprite_height * texture.font_size as f32 / texture.height.max(1) as f32,
        }
    }
}

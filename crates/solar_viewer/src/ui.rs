use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::planet::LabelText;
use crate::ViewerSettings;

/// Paints each label at its anchor, sized like the sprite it stands for.
pub fn labels(
    mut egui_context: EguiContexts,
    settings: Res<ViewerSettings>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    labels: Query<(&GlobalTransform, &LabelText, &InheritedVisibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };

    let painter = egui_context
        .ctx_mut()
        .layer_painter(egui::LayerId::new(egui::Order::Background, egui::Id::new("labels")));

    for (transform, label, visibility) in labels.iter() {
        if !visibility.get() {
            continue;
        }

        let anchor = transform.translation();

        let Some(centre) = camera.world_to_viewport(camera_transform, anchor) else {
            continue;
        };

        // Screen X follows world X from straight above
        let Some(edge) =
            camera.world_to_viewport(camera_transform, anchor + Vec3::X * label.world_height)
        else {
            continue;
        };

        let size = centre.distance(edge).max(settings.min_label_size);

        painter.text(
            egui::pos2(centre.x, centre.y),
            egui::Align2::CENTER_CENTER,
            &label.text,
            egui::FontId::proportional(size),
            label.color,
        );
    }
}
